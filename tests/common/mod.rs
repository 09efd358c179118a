//! Shared test utilities.

#![allow(dead_code)]

use std::cell::Cell;
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use tempfile::TempDir;
use termlock::config::{RestoreMode, SaverConfig};
use termlock::event_loop::ShellPty;
use termlock::lock::{Authenticator, LockMachine};
use termlock::saver::Saver;
use termlock::screen::ScreenGeometry;

pub const PASSWORD: &[u8] = b"correct horse";

/// Accepts exactly [`PASSWORD`] and counts calls.
pub struct MockAuthenticator {
    pub calls: Rc<Cell<usize>>,
}

impl Authenticator for MockAuthenticator {
    fn authenticate(&self, _identity: &str, _service: &str, secret: &[u8]) -> bool {
        self.calls.set(self.calls.get() + 1);
        secret == PASSWORD
    }
}

/// A saver with a one-minute interval and the mock authenticator.
pub fn saver(restore: RestoreMode, now: Instant) -> (Saver, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let config = SaverConfig {
        interval_minutes: 1,
        restore,
        ..SaverConfig::default()
    };
    let machine = LockMachine::new(
        Some(Box::new(MockAuthenticator {
            calls: Rc::clone(&calls),
        })),
        "tester",
        "login",
    );
    (
        Saver::new(&config, machine, ScreenGeometry::default(), now),
        calls,
    )
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Shell side of the loop backed by a socket pair instead of a pty.
///
/// The test keeps `shell_end`; dropping it plays the shell exiting.
pub struct SocketShell {
    pty: UnixStream,
    pub shell_end: Option<UnixStream>,
    pub eofs: usize,
    pub forwarded: Vec<u8>,
}

impl SocketShell {
    pub fn new() -> Self {
        let (pty, shell_end) = UnixStream::pair().expect("Failed to create socket pair");
        Self {
            pty,
            shell_end: Some(shell_end),
            eofs: 0,
            forwarded: Vec::new(),
        }
    }

    /// Collect whatever the shell was sent, then close its end.
    pub fn hang_up(&mut self) {
        if let Some(mut end) = self.shell_end.take() {
            end.set_nonblocking(true).expect("Failed to set nonblocking");
            let mut buf = [0u8; 256];
            while let Ok(n) = end.read(&mut buf) {
                if n == 0 {
                    break;
                }
                self.forwarded.extend_from_slice(&buf[..n]);
            }
        }
    }
}

impl ShellPty for SocketShell {
    fn master_fd(&self) -> RawFd {
        self.pty.as_raw_fd()
    }

    fn read_output(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.pty.read(buf)
    }

    fn pty_writer(&mut self) -> &mut (dyn Write + Send) {
        &mut self.pty
    }

    // a shell that exits on ^D
    fn send_eof(&mut self) -> io::Result<bool> {
        self.eofs += 1;
        self.hang_up();
        Ok(true)
    }

    fn sync_window_size(&self) {}
}
