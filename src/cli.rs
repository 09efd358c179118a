use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, ConfigError, RestoreMode};

/// Screen saver and lock for terminal sessions.
///
/// Runs your shell inside a pseudo-terminal, blanks the screen after a period
/// without activity and asks for a password before showing it again.
#[derive(Debug, Parser)]
#[command(name = "termlock", version)]
pub struct Cli {
    /// Screen restore after unlock
    #[arg(short = 'b', long = "restore", value_enum, value_name = "MODE")]
    pub restore: Option<RestoreMode>,

    /// Do not clear the screen when blanking
    #[arg(short = 'c', long = "no-clear")]
    pub no_clear: bool,

    /// Wait this many idle minutes before blanking
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: Option<u64>,

    /// Disable the password check; any key unlocks
    #[arg(short = 'p', long = "no-password")]
    pub no_password: bool,

    /// Authentication service name
    #[arg(short = 'P', long = "service", value_name = "NAME")]
    pub service: Option<String>,

    /// Configuration file (default: ~/.config/termlock/config.toml)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append diagnostics to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the configuration file and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(restore) = self.restore {
            config.saver.restore = restore;
        }
        if self.no_clear {
            config.saver.clear_on_blank = false;
        }
        if let Some(minutes) = self.interval {
            config.saver.interval_minutes = minutes;
        }
        if self.no_password {
            config.saver.password_check = false;
        }
        if let Some(service) = &self.service {
            config.auth.service = service.clone();
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
    }
}
