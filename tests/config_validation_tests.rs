//! Config Validation Tests
//!
//! Typo detection, range validation and file loading for `ServiceConfig`,
//! exercised independently from the HTTP layer.

use std::io::Write;

use shappe_haptic::config::validation::{known_config_keys, suggest_correction, validate_unknown_keys};
use shappe_haptic::config::{ConfigError, LogFormat, ServiceConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_translation_key_warns_with_suggestion() {
    let toml_str = r#"
[translation]
defualt_speed = 1.2
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("defualt_speed"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("translation.default_speed")
    );
}

#[test]
fn typo_in_cache_section_warns() {
    let toml_str = r#"
[cache]
max_entires = 100
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("cache.max_entries"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[server]
addr = "127.0.0.1:8080"
max_body_bytes = 4096

[translation]
default_speed = 1.0
default_intensity = 0.5
min_speed = 0.2
max_speed = 2.0

[cache]
max_entries = 500
status_sample_keys = 5

[logging]
format = "json"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
}

#[test]
fn completely_unknown_key_has_no_suggestion() {
    let warnings = validate_unknown_keys("[zzzzzz]\nqqqqqqqq = 1\n");
    assert!(!warnings.is_empty());
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
}

#[test]
fn suggestion_respects_distance_limit() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("server.adr", &known).as_deref(),
        Some("server.addr")
    );
    assert_eq!(suggest_correction("server.listen_address", &known), None);
}

#[test]
fn unknown_keys_do_not_fail_parsing() {
    let config = ServiceConfig::from_toml_str("[server]\nadr = \"1.2.3.4:1\"\n").unwrap();
    assert_eq!(config.server.addr, ServiceConfig::default().server.addr);
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn default_config_is_valid() {
    assert!(ServiceConfig::default().validate().is_ok());
}

#[test]
fn inverted_speed_range_is_rejected() {
    let toml_str = r#"
[translation]
min_speed = 2.0
max_speed = 1.0
default_speed = 1.5
"#;
    match ServiceConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("min_speed")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn all_problems_are_collected() {
    let toml_str = r#"
[server]
max_body_bytes = 0

[translation]
default_intensity = 1.5

[cache]
status_sample_keys = 0
"#;
    match ServiceConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3, "{errors:?}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn load_from_file_reads_all_sections() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[server]\naddr = \"127.0.0.1:9999\"\n\n[cache]\nmax_entries = 7\n\n[logging]\nformat = \"json\""
    )
    .unwrap();

    let config = ServiceConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.server.addr, "127.0.0.1:9999");
    assert_eq!(config.cache.max_entries, 7);
    assert_eq!(config.logging.format, LogFormat::Json);
    // Untouched sections keep their defaults
    assert_eq!(config.translation, ServiceConfig::default().translation);
}

#[test]
fn load_from_file_reports_parse_error_with_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server\naddr = ").unwrap();

    match ServiceConfig::load_from_file(file.path()) {
        Err(ConfigError::Parse(path, _)) => assert_eq!(path, file.path()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn load_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("haptic.toml");
    std::fs::write(&path, "[translation]\ndefault_intensity = 0.3\n").unwrap();

    let config = ServiceConfig::load_from(Some(path.as_path()));
    assert_eq!(config.translation.default_intensity, 0.3);
}

#[test]
fn load_from_invalid_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[translation]\nmin_speed = 0.0\n").unwrap();

    let config = ServiceConfig::load_from(Some(path.as_path()));
    assert_eq!(config, ServiceConfig::default());
}

#[test]
fn local_config_file_sets_log_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("haptic_config.toml"), "[logging]\nformat = \"json\"\n").unwrap();

    assert_eq!(ServiceConfig::peek_log_format_in(None, dir.path()), LogFormat::Json);
}

#[test]
fn explicit_config_wins_over_local_for_log_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("haptic_config.toml"), "[logging]\nformat = \"json\"\n").unwrap();
    let explicit = dir.path().join("explicit.toml");
    std::fs::write(&explicit, "[logging]\nformat = \"text\"\n").unwrap();

    assert_eq!(
        ServiceConfig::peek_log_format_in(Some(explicit.as_path()), dir.path()),
        LogFormat::Text
    );
}

#[test]
fn invalid_explicit_config_falls_through_to_local_log_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("haptic_config.toml"), "[logging]\nformat = \"json\"\n").unwrap();
    let explicit = dir.path().join("bad.toml");
    std::fs::write(&explicit, "[translation]\nmin_speed = 0.0\n").unwrap();

    assert_eq!(
        ServiceConfig::peek_log_format_in(Some(explicit.as_path()), dir.path()),
        LogFormat::Json
    );
}

#[test]
fn no_config_file_means_text_logs() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert_eq!(ServiceConfig::peek_log_format_in(Some(missing.as_path()), dir.path()), LogFormat::Text);
}

#[test]
fn toml_round_trip_preserves_config() {
    let mut config = ServiceConfig::default();
    config.cache.max_entries = 42;
    let text = config.to_toml().unwrap();
    assert_eq!(ServiceConfig::from_toml_str(&text).unwrap(), config);
}
