//! Shappe Haptic: text to haptic pattern translation
//!
//! Converts text into timed vibrate/pause sequences using a Morse-like
//! short/long pulse code, with per-request speed and intensity, and
//! memoizes results per (text, speed, intensity).
//!
//! ## Architecture
//!
//! - **Haptic core**: symbol table, pattern generator, cache key derivation,
//!   result cache and the translator that ties them together
//! - **Config**: TOML service configuration with built-in defaults
//! - **API**: Axum HTTP transport (translate, cache admin, health)

pub mod api;
pub mod config;
pub mod haptic;
pub mod types;

// Re-export configuration
pub use config::ServiceConfig;

// Re-export commonly used types
pub use types::{Instruction, InstructionKind, TraceId, TranslationRequest, TranslationResult};

// Re-export the translation core
pub use haptic::{
    derive_cache_key, generate_pattern, CacheKey, CacheStats, HapticPattern, HapticTranslator,
    TranslateError, TranslationCache, TranslationSettings,
};
