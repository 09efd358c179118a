use std::io;
use std::os::unix::io::RawFd;
use std::time::Duration;

/// Which sides of the proxy have something to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    pub input: bool,
    pub output: bool,
}

/// Readiness wait over the controlling terminal and the pty master.
pub struct Poller {
    input_fd: Option<RawFd>,
    output_fd: RawFd,
}

impl Poller {
    pub fn new(input_fd: RawFd, output_fd: RawFd) -> Self {
        Self {
            input_fd: Some(input_fd),
            output_fd,
        }
    }

    /// Stop watching the input side, e.g. after end-of-file.
    pub fn close_input(&mut self) {
        self.input_fd = None;
    }

    /// Block up to `timeout` for either side to become readable.
    ///
    /// An interrupted wait reports nothing ready. Hang-ups and errors count
    /// as readable so the following read observes them.
    pub fn wait(&self, timeout: Duration) -> io::Result<Readiness> {
        let events = libc::POLLIN;
        let mut fds = [
            libc::pollfd {
                fd: self.output_fd,
                events,
                revents: 0,
            },
            libc::pollfd {
                // poll skips negative descriptors
                fd: self.input_fd.unwrap_or(-1),
                events,
                revents: 0,
            },
        ];
        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as libc::c_int;

        // SAFETY: `fds` is a valid array of two pollfd entries for the
        // duration of the call.
        let ret = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout_ms) };
        if ret < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(Readiness::default());
            }
            return Err(err);
        }

        let readable = |fd: &libc::pollfd| {
            fd.fd >= 0 && fd.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0
        };
        Ok(Readiness {
            input: readable(&fds[1]),
            output: readable(&fds[0]),
        })
    }
}
