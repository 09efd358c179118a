use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::screen::DEFAULT_CAPACITY;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub saver: SaverConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the screen is brought back after an unlock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RestoreMode {
    /// Leave the screen as it is.
    #[value(alias = "n")]
    #[serde(alias = "n")]
    None,
    /// Send a form feed to the shell so it redraws.
    #[value(name = "formfeed", alias = "f")]
    #[serde(alias = "f")]
    FormFeed,
    /// Replay the recorded last screen.
    #[default]
    #[value(alias = "b")]
    #[serde(alias = "b")]
    Buffer,
    /// Blank on the alternate screen and switch back on unlock.
    #[value(alias = "c")]
    #[serde(alias = "c")]
    Capabilities,
}

/// Screensaver behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaverConfig {
    /// Idle minutes before the screen blanks (default: 5).
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    /// Restore method on unlock (default: buffer).
    #[serde(default)]
    pub restore: RestoreMode,
    /// Clear the screen when blanking (default: true).
    #[serde(default = "default_true")]
    pub clear_on_blank: bool,
    /// Require a password to unlock (default: true).
    #[serde(default = "default_true")]
    pub password_check: bool,
    /// Bytes of output kept for replay (default: 2000).
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    /// Screen height used for replay; the live terminal height when unset.
    #[serde(default)]
    pub replay_rows: Option<u16>,
    /// Screen width used for replay; the live terminal width when unset.
    #[serde(default)]
    pub replay_cols: Option<u16>,
}

/// Credential checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Service name handed to the provider (default: "login").
    #[serde(default = "default_service")]
    pub service: String,
    /// Helper program and leading arguments; identity and service are
    /// appended and the password is written to its stdin.
    #[serde(default)]
    pub command: Vec<String>,
    /// Hex SHA-256 of the unlock password, used when no helper is set.
    #[serde(default)]
    pub password_sha256: Option<String>,
}

/// Diagnostic logging. Nothing is logged unless a file is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_interval_minutes() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_buffer_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_service() -> String {
    "login".to_string()
}

impl SaverConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            restore: RestoreMode::default(),
            clear_on_blank: true,
            password_check: true,
            buffer_capacity: default_buffer_capacity(),
            replay_rows: None,
            replay_cols: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            command: Vec::new(),
            password_sha256: None,
        }
    }
}
