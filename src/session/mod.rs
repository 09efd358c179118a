//! The proxied shell session: pty pair, child process and terminal mode.

mod exit;
mod signals;
mod terminal_guard;

pub use exit::{exit_code_from_wait_status, send_signal, wait_for_pid};
pub use signals::SignalFlags;
pub use terminal_guard::TerminalModeGuard;

use crossterm::terminal::size as terminal_size;
use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::io::{self, IsTerminal, Read, Write};
use std::os::unix::io::RawFd;

use crate::error::SetupError;
use crate::event_loop::ShellPty;

/// Shell used when `$SHELL` is unset.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Resolve the shell to run from an optional `$SHELL` value.
pub fn shell_from_env(value: Option<String>) -> String {
    value
        .filter(|shell| !shell.is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

/// Owns the pty master, the shell running on the slave side and the saved
/// mode of the controlling terminal.
pub struct Session {
    master: Box<dyn MasterPty + Send>,
    reader: Box<dyn Read + Send>,
    writer: Box<dyn Write + Send>,
    child: Box<dyn Child + Send + Sync>,
    master_fd: RawFd,
    terminal: TerminalModeGuard,
}

impl Session {
    /// Open a pty sized like the controlling terminal, put the controlling
    /// terminal in raw mode and start the user's login shell on the pty.
    pub fn acquire() -> Result<Self, SetupError> {
        if !io::stdin().is_terminal() {
            return Err(SetupError::NotATerminal);
        }
        let (cols, rows) = terminal_size().map_err(SetupError::WindowSize)?;

        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| SetupError::OpenPty(e.to_string()))?;

        let master = pair.master;
        let master_fd = master
            .as_raw_fd()
            .ok_or_else(|| SetupError::OpenPty("pty master has no file descriptor".to_string()))?;
        let reader = master
            .try_clone_reader()
            .map_err(|e| SetupError::OpenPty(e.to_string()))?;
        let writer = master
            .take_writer()
            .map_err(|e| SetupError::OpenPty(e.to_string()))?;

        // nothing may fail once the shell runs
        let terminal = TerminalModeGuard::acquire()?;

        let shell = shell_from_env(std::env::var("SHELL").ok());
        let mut cmd = CommandBuilder::new(&shell);
        cmd.arg("-l");
        if let Ok(cwd) = std::env::current_dir() {
            cmd.cwd(cwd);
        }

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| SetupError::Spawn {
                shell: shell.clone(),
                reason: e.to_string(),
            })?;
        drop(pair.slave);
        tracing::info!(shell = %shell, pid = ?child.process_id(), cols, rows, "shell started");

        Ok(Self {
            master,
            reader,
            writer,
            child,
            master_fd,
            terminal,
        })
    }

    /// Forward bytes to the shell.
    pub fn write_input(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()
    }

    /// Hang up on the shell. Used when the loop ends while it still runs.
    ///
    /// The signal is sent directly so the shell is still ours to reap.
    pub fn kill_child(&mut self) {
        let result = match self.child.process_id() {
            Some(pid) => send_signal(pid as libc::pid_t, libc::SIGHUP),
            None => self.child.kill(),
        };
        if let Err(e) = result {
            tracing::debug!("kill shell: {}", e);
        }
    }

    /// Restore the controlling terminal's saved mode. Idempotent.
    pub fn release(&self) {
        self.terminal.restore();
    }

    /// Restore the terminal, close the master and reap the shell.
    ///
    /// Returns the shell's exit code, or its terminating signal number.
    pub fn wait_for_exit(mut self) -> i32 {
        self.release();
        drop(self.writer);
        drop(self.reader);
        drop(self.master);

        let code = match self.child.process_id() {
            Some(pid) => wait_for_pid(pid as libc::pid_t),
            None => self.child.wait().map(|status| status.exit_code() as i32),
        };
        match code {
            Ok(code) => {
                tracing::info!(code, "shell exited");
                code
            }
            Err(e) => {
                tracing::error!("waiting for shell failed: {}", e);
                1
            }
        }
    }
}

impl ShellPty for Session {
    fn master_fd(&self) -> RawFd {
        self.master_fd
    }

    fn read_output(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }

    fn pty_writer(&mut self) -> &mut (dyn Write + Send) {
        self.writer.as_mut()
    }

    fn send_eof(&mut self) -> io::Result<bool> {
        match canonical_eof_char(self.master_fd)? {
            Some(eof) => {
                self.write_input(&[eof])?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn sync_window_size(&self) {
        let Ok((cols, rows)) = terminal_size() else {
            return;
        };
        let size = PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };
        match self.master.resize(size) {
            Ok(()) => tracing::debug!(cols, rows, "pty resized"),
            Err(e) => tracing::warn!("pty resize failed: {}", e),
        }
    }
}

/// The EOF character of the terminal behind `fd`, or `None` when it is not
/// in canonical mode and so has no EOF character in effect.
pub fn canonical_eof_char(fd: RawFd) -> io::Result<Option<u8>> {
    // SAFETY: termios is plain data and tcgetattr fully initialises it on
    // success; on failure it is not read.
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    if termios.c_lflag & libc::ICANON == 0 {
        return Ok(None);
    }
    Ok(Some(termios.c_cc[libc::VEOF]))
}
