//! Loading session configuration from disk.

use libardo_session::{SessionConfig, Theme, init_tracing};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_from_file() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("session.toml");
    std::fs::write(
        &path,
        "opponent_delay_ms = 120\ndefault_theme = \"fire\"\n",
    )
    .expect("write");

    let config = SessionConfig::from_file(&path).expect("valid config");
    assert_eq!(config.opponent_delay(), Duration::from_millis(120));
    assert_eq!(*config.default_theme(), Theme::Fire);
    assert_eq!(*config.opponent_seed(), None);
}

#[test]
fn test_load_or_default_without_file() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let config = SessionConfig::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config, SessionConfig::default());
}

#[test]
fn test_from_file_reports_missing_file() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let err = SessionConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("session.toml");
    std::fs::write(&path, "opponent_delay_ms = \"soon\"").expect("write");
    assert!(SessionConfig::load_or_default(&path).is_err());
}
