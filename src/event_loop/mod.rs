//! The single-threaded I/O loop between the controlling terminal and the
//! shell's pty.
//!
//! Each tick waits up to [`TICK`] for input or output, handles whatever is
//! ready (input first), then runs the idle check. Signals are only looked at
//! between ticks.

mod poller;

pub use poller::{Poller, Readiness};

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::time::{Duration, Instant};

use crate::saver::Saver;
use crate::screen::ScreenGeometry;
use crate::session::SignalFlags;

/// Upper bound on one readiness wait.
pub const TICK: Duration = Duration::from_millis(64);

const IO_BUFFER: usize = 64 * 1024;

/// Why the loop stopped.
#[derive(Debug)]
pub enum LoopExit {
    /// The shell closed its side of the pty.
    ChildExited,
    /// SIGTERM or SIGHUP arrived.
    Terminated,
    /// An unexpected I/O error.
    Error(io::Error),
}

/// Replay geometry: configured values win, the live terminal size fills in
/// the rest, 24x80 when neither is known.
pub fn replay_geometry(rows: Option<u16>, cols: Option<u16>) -> ScreenGeometry {
    let fallback = ScreenGeometry::default();
    let live = crossterm::terminal::size()
        .ok()
        .filter(|&(cols, rows)| cols > 0 && rows > 0);
    ScreenGeometry {
        rows: rows
            .or(live.map(|(_, rows)| rows))
            .unwrap_or(fallback.rows),
        cols: cols
            .or(live.map(|(cols, _)| cols))
            .unwrap_or(fallback.cols),
    }
}

/// The shell side of the proxy as the loop sees it.
pub trait ShellPty {
    /// Descriptor polled for shell output.
    fn master_fd(&self) -> RawFd;

    /// Read shell output. Only called once the master is readable.
    fn read_output(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Writer feeding the shell's input.
    fn pty_writer(&mut self) -> &mut (dyn Write + Send);

    /// Pass end-of-input on to the shell. Returns whether anything was
    /// written.
    fn send_eof(&mut self) -> io::Result<bool>;

    /// Follow a size change of the controlling terminal.
    fn sync_window_size(&self);
}

/// Duplicate `fd` with close-on-exec set, so helpers spawned later do not
/// inherit it.
pub fn dup_cloexec(fd: RawFd) -> io::Result<File> {
    // SAFETY: fcntl with F_DUPFD_CLOEXEC has no memory-safety preconditions.
    let dup = unsafe { libc::fcntl(fd, libc::F_DUPFD_CLOEXEC, 0) };
    if dup < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: dup was just returned by fcntl and is owned by nobody else.
    Ok(unsafe { File::from_raw_fd(dup) })
}

/// Unbuffered handle on stdin, so single-byte reads line up with poll.
pub fn open_input() -> io::Result<File> {
    dup_cloexec(libc::STDIN_FILENO)
}

/// Run until the shell goes away, a termination signal arrives or I/O fails.
///
/// `fixed` holds the configured replay size overrides; unset dimensions
/// follow the terminal when it is resized.
pub fn run<S, I, T>(
    shell: &mut S,
    mut input: I,
    term: &mut T,
    saver: &mut Saver,
    signals: &SignalFlags,
    fixed: (Option<u16>, Option<u16>),
) -> LoopExit
where
    S: ShellPty + ?Sized,
    I: Read + AsRawFd,
    T: Write,
{
    let mut poller = Poller::new(input.as_raw_fd(), shell.master_fd());
    let mut buf = vec![0u8; IO_BUFFER];

    loop {
        if signals.termination_requested() {
            return LoopExit::Terminated;
        }
        if signals.take_resize() {
            shell.sync_window_size();
            saver.set_geometry(replay_geometry(fixed.0, fixed.1));
        }

        let ready = match poller.wait(TICK) {
            Ok(ready) => ready,
            Err(e) => return LoopExit::Error(e),
        };

        if ready.input {
            let len = saver.input_read_len(buf.len());
            match input.read(&mut buf[..len]) {
                Ok(0) => {
                    tracing::info!("end of input");
                    if let Err(e) = shell.send_eof() {
                        tracing::warn!("forwarding end of input failed: {}", e);
                    }
                    poller.close_input();
                }
                Ok(n) => {
                    saver.note_activity(Instant::now());
                    if let Err(e) = saver.handle_input(&buf[..n], term, shell.pty_writer()) {
                        return LoopExit::Error(e);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return LoopExit::Error(e),
            }
        }

        if ready.output {
            match shell.read_output(&mut buf) {
                Ok(0) => return LoopExit::ChildExited,
                Ok(n) => {
                    saver.note_activity(Instant::now());
                    if let Err(e) = saver.handle_output(&buf[..n], term) {
                        return LoopExit::Error(e);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                // EIO once the slave side is closed
                Err(e) => {
                    tracing::debug!("pty read ended: {}", e);
                    return LoopExit::ChildExited;
                }
            }
        }

        if let Err(e) = saver.tick(Instant::now(), term) {
            return LoopExit::Error(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_geometry_wins() {
        let geometry = replay_geometry(Some(30), Some(100));
        assert_eq!(geometry, ScreenGeometry { rows: 30, cols: 100 });
    }

    #[test]
    fn duplicated_input_is_close_on_exec() {
        let (stream, _peer) = std::os::unix::net::UnixStream::pair().unwrap();
        let dup = dup_cloexec(stream.as_raw_fd()).unwrap();
        assert_ne!(dup.as_raw_fd(), stream.as_raw_fd());
        // SAFETY: the descriptor is owned by `dup` for the whole call.
        let flags = unsafe { libc::fcntl(dup.as_raw_fd(), libc::F_GETFD) };
        assert!(flags >= 0);
        assert_ne!(flags & libc::FD_CLOEXEC, 0);
    }

    #[test]
    fn dup_of_bad_descriptor_fails() {
        assert!(dup_cloexec(-1).is_err());
    }

    #[test]
    fn geometry_is_never_zero_sized_by_default() {
        let geometry = replay_geometry(None, None);
        assert!(geometry.cols > 0 && geometry.rows > 0);
    }
}
