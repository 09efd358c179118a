//! Credential verification providers.

use std::ffi::CStr;
use std::io::Write;
use std::process::{Command, Stdio};

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::error::SetupError;

/// Checks a candidate secret for `identity` under `service`.
///
/// Called synchronously from the event loop while the terminal is locked.
pub trait Authenticator {
    fn authenticate(&self, identity: &str, service: &str, secret: &[u8]) -> bool;
}

/// Delegates verification to an external helper program.
///
/// The helper is run as `program [args..] <identity> <service>` with the
/// secret followed by a newline on its stdin. Exit status 0 accepts.
#[derive(Debug, Clone)]
pub struct CommandAuthenticator {
    program: String,
    args: Vec<String>,
}

impl CommandAuthenticator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn run(&self, identity: &str, service: &str, secret: &[u8]) -> std::io::Result<bool> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(identity)
            .arg(service)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A helper that exits before reading closes the pipe; its exit
            // status still decides.
            let _ = stdin
                .write_all(secret)
                .and_then(|()| stdin.write_all(b"\n"));
        }
        Ok(child.wait()?.success())
    }
}

impl Authenticator for CommandAuthenticator {
    fn authenticate(&self, identity: &str, service: &str, secret: &[u8]) -> bool {
        match self.run(identity, service, secret) {
            Ok(accepted) => {
                tracing::info!(service, accepted, "authentication helper finished");
                accepted
            }
            Err(e) => {
                tracing::warn!("authentication helper '{}' failed: {}", self.program, e);
                false
            }
        }
    }
}

/// Compares the SHA-256 of the secret against a stored digest.
pub struct DigestAuthenticator {
    digest: [u8; 32],
}

impl DigestAuthenticator {
    /// Parse a 64-character hex digest. Returns `None` if malformed.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        if hex.len() != 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let mut digest = [0u8; 32];
        for (idx, byte) in digest.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16).ok()?;
        }
        Some(Self { digest })
    }
}

impl Authenticator for DigestAuthenticator {
    fn authenticate(&self, _identity: &str, _service: &str, secret: &[u8]) -> bool {
        let mut hasher = Sha256::new();
        hasher.update(secret);
        let candidate = hasher.finalize();
        candidate.as_slice().ct_eq(&self.digest).into()
    }
}

impl std::fmt::Debug for DigestAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DigestAuthenticator([REDACTED])")
    }
}

/// Pick the provider described by `config`.
///
/// A helper command takes precedence over a stored digest.
pub fn from_config(config: &AuthConfig) -> Result<Box<dyn Authenticator>, SetupError> {
    if let Some((program, args)) = config.command.split_first() {
        return Ok(Box::new(CommandAuthenticator::new(
            program.clone(),
            args.to_vec(),
        )));
    }
    if let Some(hex) = &config.password_sha256 {
        return DigestAuthenticator::from_hex(hex)
            .map(|auth| Box::new(auth) as Box<dyn Authenticator>)
            .ok_or(SetupError::InvalidDigest);
    }
    Err(SetupError::NoAuthenticator)
}

/// Login name of the user at the controlling terminal.
pub fn current_identity() -> String {
    // SAFETY: getlogin returns either null or a pointer to a static
    // NUL-terminated buffer that stays valid until the next call.
    let login = unsafe {
        let ptr = libc::getlogin();
        if ptr.is_null() {
            None
        } else {
            Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
        }
    };
    login
        .filter(|name| !name.is_empty())
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("LOGNAME").ok())
        .unwrap_or_else(|| "unknown".to_string())
}
