//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Translation Preferences
// ============================================================================

/// Speed factor used when the caller sends none or an out-of-range value.
pub const DEFAULT_SPEED_FACTOR: f64 = 1.0;

/// Vibration intensity used when the caller sends none or an out-of-range value.
pub const DEFAULT_INTENSITY: f64 = 0.8;

/// Slowest accepted speed factor (durations ×10).
pub const MIN_SPEED_FACTOR: f64 = 0.1;

/// Fastest accepted speed factor (durations ÷3).
pub const MAX_SPEED_FACTOR: f64 = 3.0;

// ============================================================================
// Logging
// ============================================================================

/// Characters of request text included in log lines before truncation.
pub const LOG_PREVIEW_CHARS: usize = 50;

// ============================================================================
// Cache
// ============================================================================

/// Keys returned by the cache status endpoint.
pub const STATUS_SAMPLE_KEYS: usize = 10;

/// Cache entry limit. 0 = unbounded, entries live until an explicit clear.
pub const CACHE_MAX_ENTRIES: usize = 0;

// ============================================================================
// HTTP Server
// ============================================================================

/// Default bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:5000";

/// Largest accepted request body (bytes).
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "Haptic Feedback API";
