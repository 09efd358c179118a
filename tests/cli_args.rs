//! Tests for CLI argument parsing and startup failures, run against the
//! actual binary.

mod common;

use common::temp_config;
use std::process::{Command, Stdio};

fn termlock_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_termlock"))
}

#[test]
fn test_help_lists_options() {
    let output = termlock_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--restore"));
    assert!(stdout.contains("--no-clear"));
    assert!(stdout.contains("--interval"));
    assert!(stdout.contains("--no-password"));
    assert!(stdout.contains("--service"));
}

#[test]
fn test_zero_interval_is_rejected() {
    let output = termlock_cmd()
        .args(["-i", "0"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_unknown_restore_mode_is_rejected() {
    let output = termlock_cmd()
        .args(["-b", "sideways"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sideways"));
}

#[test]
fn test_not_a_terminal_exits_with_error() {
    let (_dir, path) = temp_config("");
    let output = termlock_cmd()
        .arg("--config")
        .arg(&path)
        .arg("-p")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Can run on terminals only"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_missing_provider_exits_with_error() {
    let (_dir, path) = temp_config("");
    let output = termlock_cmd()
        .arg("--config")
        .arg(&path)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no authentication provider"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_invalid_config_file_exits_with_error() {
    let (_dir, path) = temp_config("[saver]\ninterval_minutes = 0\n");
    let output = termlock_cmd()
        .arg("--config")
        .arg(&path)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interval_minutes"));
}

#[test]
fn test_log_file_is_created() {
    let (dir, path) = temp_config("");
    let log = dir.path().join("termlock.log");
    let output = termlock_cmd()
        .arg("--config")
        .arg(&path)
        .arg("-p")
        .arg("--log-file")
        .arg(&log)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(log.exists());
}
