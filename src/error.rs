//! Errors that stop the screensaver before its event loop starts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Can run on terminals only")]
    NotATerminal,

    #[error("Failed to query window size: {0}")]
    WindowSize(#[source] std::io::Error),

    #[error("Failed to open pty: {0}")]
    OpenPty(String),

    #[error("Failed to spawn shell '{shell}': {reason}")]
    Spawn { shell: String, reason: String },

    #[error("Failed to set terminal mode: {0}")]
    TerminalMode(#[source] std::io::Error),

    #[error("Failed to install signal handler: {0}")]
    Signals(#[source] std::io::Error),

    #[error("Password check is enabled but no authentication provider is configured (set auth.command or auth.password_sha256, or pass --no-password)")]
    NoAuthenticator,

    #[error("auth.password_sha256 is not a valid SHA-256 hex digest")]
    InvalidDigest,
}
