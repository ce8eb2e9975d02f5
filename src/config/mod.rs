//! Service Configuration Module
//!
//! Provides server, translation, cache and logging settings loaded from a
//! TOML file.
//!
//! ## Loading Order
//!
//! 1. Explicit path (`--config` flag or `HAPTIC_CONFIG` environment variable)
//! 2. `haptic_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! The binary calls `config::init()` once at startup; request handling reads
//! the pieces it needs through `config::get()` or receives them explicitly.
//!
//! ```ignore
//! config::init(ServiceConfig::load_from(None));
//! let addr = &config::get().server.addr;
//! ```

mod service_config;
pub mod defaults;
pub mod validation;

pub use service_config::*;

use std::sync::OnceLock;

/// Global service configuration, initialized once at startup.
static SERVICE_CONFIG: OnceLock<ServiceConfig> = OnceLock::new();

/// Initialize the global service configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: ServiceConfig) {
    if SERVICE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get the global service configuration, or the built-in defaults if
/// `init()` has not run (tests, library use).
pub fn get() -> &'static ServiceConfig {
    SERVICE_CONFIG.get_or_init(ServiceConfig::default)
}
