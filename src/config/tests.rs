//! Configuration tests
//!
//! The round-trip test guards the TOML template: when a field is added to
//! `Config`, it has to appear in `to_toml()` and parse back.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let restored = Config::from_sources(parsed.unwrap(), no_env);
    assert_eq!(restored, config);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let config = Config {
        api_url: "http://localhost:9000/products".to_string(),
        fetch_limit: 30,
        page_size: 20,
        request_timeout_secs: 0,
        progress_interval_ms: 50,
        theme: "nord".to_string(),
        enable_tui: true,
        logging: LoggingConfig {
            level: "debug".to_string(),
            file_enabled: true,
            file_dir: PathBuf::from("/tmp/shopview-logs"),
            file_rotation: LogRotation::Hourly,
            file_prefix: "sv".to_string(),
        },
    };

    let parsed = Config::parse_file_config(&config.to_toml()).unwrap();
    assert_eq!(Config::from_sources(parsed, no_env), config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let parsed = Config::parse_file_config("").unwrap();
    assert_eq!(Config::from_sources(parsed, no_env), Config::default());
}

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file_config(
        r#"
api_url = "http://file.test/products"
page_size = 20
theme = "light"
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("SHOPVIEW_API_URL", "http://env.test/products"),
        ("SHOPVIEW_PAGE_SIZE", "30"),
        ("SHOPVIEW_NO_TUI", "1"),
    ]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.api_url, "http://env.test/products");
    assert_eq!(config.page_size, 30);
    assert_eq!(config.theme, "light"); // not overridden
    assert!(!config.enable_tui);
}

#[test]
fn test_invalid_numbers_fall_back() {
    let file = Config::parse_file_config("page_size = 0\nfetch_limit = 0").unwrap();
    let env = env_from(&[("SHOPVIEW_FETCH_LIMIT", "lots")]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.fetch_limit, DEFAULT_FETCH_LIMIT);
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(Config::parse_file_config("page_size = \"ten\"").is_err());
    assert!(Config::parse_file_config("[logging\nlevel = 1").is_err());
}

#[test]
fn test_log_rotation_parsing() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}
