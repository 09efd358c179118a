mod common;

use common::temp_config;
use std::path::PathBuf;
use std::time::Duration;
use termlock::config::{Config, ConfigError, RestoreMode};

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.saver.interval_minutes, 5);
    assert_eq!(config.saver.interval(), Duration::from_secs(300));
    assert_eq!(config.saver.restore, RestoreMode::Buffer);
    assert!(config.saver.clear_on_blank);
    assert!(config.saver.password_check);
    assert_eq!(config.saver.buffer_capacity, 2000);
    assert!(config.saver.replay_rows.is_none());
    assert!(config.saver.replay_cols.is_none());

    assert_eq!(config.auth.service, "login");
    assert!(config.auth.command.is_empty());
    assert!(config.auth.password_sha256.is_none());
    assert!(config.logging.file.is_none());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("termlock/config.toml"));
}

#[test]
fn test_validation_passes_for_default() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_load_full_file() {
    let (_dir, path) = temp_config(
        r#"
[saver]
interval_minutes = 2
restore = "formfeed"
clear_on_blank = false
buffer_capacity = 4096
replay_rows = 30

[auth]
service = "screensaver"
command = ["/usr/local/libexec/check-pass", "--quiet"]

[logging]
file = "/tmp/termlock.log"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.saver.interval_minutes, 2);
    assert_eq!(config.saver.restore, RestoreMode::FormFeed);
    assert!(!config.saver.clear_on_blank);
    assert!(config.saver.password_check);
    assert_eq!(config.saver.buffer_capacity, 4096);
    assert_eq!(config.saver.replay_rows, Some(30));
    assert_eq!(config.saver.replay_cols, None);
    assert_eq!(config.auth.service, "screensaver");
    assert_eq!(
        config.auth.command,
        vec!["/usr/local/libexec/check-pass", "--quiet"]
    );
    assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/termlock.log")));
}

#[test]
fn test_partial_file_uses_defaults() {
    let (_dir, path) = temp_config("[saver]\nrestore = \"c\"\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.saver.restore, RestoreMode::Capabilities);
    assert_eq!(config.saver.interval_minutes, 5);
    assert_eq!(config.auth.service, "login");
}

#[test]
fn test_empty_file_is_default() {
    let (_dir, path) = temp_config("");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[saver\ninterval_minutes = ");
    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_unknown_restore_mode_is_parse_error() {
    let (_dir, path) = temp_config("[saver]\nrestore = \"sideways\"\n");
    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_validation_fails_zero_interval() {
    let (_dir, path) = temp_config("[saver]\ninterval_minutes = 0\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("interval_minutes"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_validation_fails_zero_capacity() {
    let mut config = Config::default();
    config.saver.buffer_capacity = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_validation_fails_zero_replay_size() {
    let (_dir, path) = temp_config("[saver]\nreplay_rows = 0\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("replay_rows"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }

    let mut config = Config::default();
    config.saver.replay_cols = Some(0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));

    config.saver.replay_cols = Some(132);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_fails_bad_digest() {
    let mut config = Config::default();
    config.auth.password_sha256 = Some("not-a-digest".to_string());
    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("password_sha256"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }

    config.auth.password_sha256 = Some("ab".repeat(32));
    assert!(config.validate().is_ok());
}
