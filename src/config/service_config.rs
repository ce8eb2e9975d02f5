//! Service Configuration - operator-tunable TOML values
//!
//! Each struct implements `Default` with the built-in constants from
//! [`super::defaults`], so a missing file or section changes nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::haptic::TranslationSettings;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "HAPTIC_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "haptic_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one service deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Preference defaults and accepted ranges
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Result cache sizing and introspection
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration using the standard search order:
    /// 1. `explicit` path, else `$HAPTIC_CONFIG`
    /// 2. `./haptic_config.toml`
    /// 3. Built-in defaults
    ///
    /// Files that fail to load or validate are skipped with a warning.
    pub fn load_from(explicit: Option<&Path>) -> Self {
        // 1. Explicit path or env var
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        if let Some(p) = requested {
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded service config");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config, falling back");
                    }
                }
            } else {
                warn!(path = %p.display(), "Config path does not exist, falling back");
            }
        }

        // 2. Check ./haptic_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded service config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Files `load_from` would try, in search order, skipping missing ones:
    /// `explicit` (else `$HAPTIC_CONFIG`), then `haptic_config.toml` in `dir`.
    pub fn candidate_paths_in(explicit: Option<&Path>, dir: &Path) -> Vec<PathBuf> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        requested
            .into_iter()
            .chain(std::iter::once(dir.join(LOCAL_CONFIG_FILE)))
            .filter(|p| p.exists())
            .collect()
    }

    /// Log format of the config `load_from` will pick, read silently so it
    /// can run before the subscriber is installed.
    pub fn peek_log_format(explicit: Option<&Path>) -> LogFormat {
        Self::peek_log_format_in(explicit, Path::new("."))
    }

    /// [`Self::peek_log_format`] with the local config looked up in `dir`.
    pub fn peek_log_format_in(explicit: Option<&Path>, dir: &Path) -> LogFormat {
        Self::candidate_paths_in(explicit, dir)
            .iter()
            .find_map(|path| {
                let raw = std::fs::read_to_string(path).ok()?;
                let config: Self = toml::from_str(&raw).ok()?;
                config.validate().ok()?;
                Some(config.logging.format)
            })
            .unwrap_or_default()
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys only produce warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate every section, collecting all problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let t = &self.translation;
        for (name, value) in [
            ("translation.default_speed", t.default_speed),
            ("translation.default_intensity", t.default_intensity),
            ("translation.min_speed", t.min_speed),
            ("translation.max_speed", t.max_speed),
        ] {
            if !value.is_finite() {
                errors.push(format!("{name} must be a finite number (got {value})"));
            }
        }

        if t.min_speed <= 0.0 {
            errors.push(format!(
                "translation.min_speed ({}) must be > 0 (used as divisor)",
                t.min_speed
            ));
        }
        if t.min_speed > t.max_speed {
            errors.push(format!(
                "translation.min_speed ({}) must be <= max_speed ({})",
                t.min_speed, t.max_speed
            ));
        }
        if !(t.min_speed..=t.max_speed).contains(&t.default_speed) {
            errors.push(format!(
                "translation.default_speed ({}) must lie within [{}, {}]",
                t.default_speed, t.min_speed, t.max_speed
            ));
        }
        if !(0.0..=1.0).contains(&t.default_intensity) {
            errors.push(format!(
                "translation.default_intensity ({}) must lie within [0, 1]",
                t.default_intensity
            ));
        }

        if self.server.max_body_bytes == 0 {
            errors.push("server.max_body_bytes must be > 0".to_string());
        }
        if self.server.addr.trim().is_empty() {
            errors.push("server.addr must not be empty".to_string());
        }
        if self.cache.status_sample_keys == 0 {
            errors.push("cache.status_sample_keys must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `HAPTIC_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}
fn default_max_body_bytes() -> usize {
    defaults::MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// ============================================================================
// Translation
// ============================================================================

/// Preference defaults and the speed range outside of which the default
/// is substituted. Intensity is always accepted within [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationConfig {
    #[serde(default = "default_speed")]
    pub default_speed: f64,
    #[serde(default = "default_intensity")]
    pub default_intensity: f64,
    #[serde(default = "default_min_speed")]
    pub min_speed: f64,
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
}

fn default_speed() -> f64 { defaults::DEFAULT_SPEED_FACTOR }
fn default_intensity() -> f64 { defaults::DEFAULT_INTENSITY }
fn default_min_speed() -> f64 { defaults::MIN_SPEED_FACTOR }
fn default_max_speed() -> f64 { defaults::MAX_SPEED_FACTOR }

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            default_speed: default_speed(),
            default_intensity: default_intensity(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
        }
    }
}

impl TranslationConfig {
    /// Settings handed to the translator
    pub fn to_settings(&self) -> TranslationSettings {
        TranslationSettings {
            default_speed: self.default_speed,
            default_intensity: self.default_intensity,
            speed_range: self.min_speed..=self.max_speed,
            intensity_range: 0.0..=1.0,
        }
    }
}

// ============================================================================
// Cache
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Entry limit with least-recently-used eviction. 0 = unbounded.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,

    /// Keys listed by the status endpoint
    #[serde(default = "default_status_sample_keys")]
    pub status_sample_keys: usize,
}

fn default_cache_max_entries() -> usize { defaults::CACHE_MAX_ENTRIES }
fn default_status_sample_keys() -> usize { defaults::STATUS_SAMPLE_KEYS }

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_max_entries(),
            status_sample_keys: default_status_sample_keys(),
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.addr, "0.0.0.0:5000");
        assert_eq!(config.translation.default_speed, 1.0);
        assert_eq!(config.translation.default_intensity, 0.8);
        assert_eq!(config.cache.max_entries, 0);
        assert_eq!(config.cache.status_sample_keys, 10);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServiceConfig::from_toml_str(
            r#"
[server]
addr = "127.0.0.1:9000"

[logging]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:9000");
        assert_eq!(config.server.max_body_bytes, defaults::MAX_BODY_BYTES);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.translation, TranslationConfig::default());
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let mut config = ServiceConfig::default();
        config.translation.min_speed = 2.0;
        config.translation.max_speed = 1.0;
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("min_speed")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_outside_range_rejected() {
        let mut config = ServiceConfig::default();
        config.translation.default_intensity = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_min_speed_rejected() {
        let mut config = ServiceConfig::default();
        config.translation.min_speed = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(
            ServiceConfig::from_toml_str("[server\naddr ="),
            Err(ConfigError::Parse(..))
        ));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = ServiceConfig::default().to_toml().unwrap();
        assert_eq!(ServiceConfig::from_toml_str(&text).unwrap(), ServiceConfig::default());
    }

    #[test]
    fn test_settings_from_config() {
        let settings = TranslationConfig::default().to_settings();
        assert_eq!(settings, TranslationSettings::default());
    }
}
