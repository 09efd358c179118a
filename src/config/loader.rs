use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/termlock/config.toml` on Unix, or the equivalent
    /// from `dirs::config_dir()`. Falls back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("termlock").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The idle interval is at least one minute
    /// - The screen buffer holds at least one byte
    /// - A replay size override is not zero
    /// - A stored password digest is 64 hex characters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.saver.interval_minutes < 1 {
            return Err(ConfigError::ValidationError {
                message: "interval_minutes must be at least 1".to_string(),
            });
        }

        if self.saver.buffer_capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "buffer_capacity must be greater than 0".to_string(),
            });
        }

        if self.saver.replay_rows == Some(0) || self.saver.replay_cols == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "replay_rows and replay_cols must be greater than 0".to_string(),
            });
        }

        if let Some(digest) = &self.auth.password_sha256 {
            let digest = digest.trim();
            if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::ValidationError {
                    message: "password_sha256 must be 64 hex characters".to_string(),
                });
            }
        }

        Ok(())
    }
}
