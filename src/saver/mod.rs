//! Screensaver logic driven by the event loop.
//!
//! [`Saver`] sees every byte crossing the proxy and every tick. It owns the
//! recorder, the lock machine and the display flags, and writes to whatever
//! sinks it is handed, so it runs the same against a real terminal or a
//! `Vec<u8>`.

mod held;
mod term;

pub use held::{HeldOutput, HELD_CAPACITY};

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::config::{RestoreMode, SaverConfig};
use crate::lock::{KeyOutcome, LockMachine, LockState, INCORRECT_NOTICE, PROMPT, UNLOCKED_NOTICE};
use crate::screen::{ScreenGeometry, ScreenRecorder};

const FORM_FEED: u8 = 0x0c;
const MASK: &[u8] = b"*";
const ERASE_MASK: &[u8] = b"\x08 \x08";
const SUBMIT_ECHO: &[u8] = b"\n\r";

pub struct Saver {
    interval: Duration,
    restore: RestoreMode,
    clear_on_blank: bool,
    geometry: ScreenGeometry,
    recorder: ScreenRecorder,
    machine: LockMachine,
    held: HeldOutput,
    blanked: bool,
    revealed: bool,
    cursor_visible: bool,
    alternate_screen: bool,
    last_activity: Instant,
}

impl Saver {
    pub fn new(
        config: &SaverConfig,
        machine: LockMachine,
        geometry: ScreenGeometry,
        now: Instant,
    ) -> Self {
        Self {
            interval: config.interval(),
            restore: config.restore,
            clear_on_blank: config.clear_on_blank,
            geometry,
            recorder: ScreenRecorder::new(config.buffer_capacity),
            machine,
            held: HeldOutput::new(HELD_CAPACITY),
            blanked: false,
            revealed: false,
            cursor_visible: true,
            alternate_screen: false,
            last_activity: now,
        }
    }

    pub fn is_blanked(&self) -> bool {
        self.blanked
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn lock_state(&self) -> LockState {
        self.machine.state()
    }

    pub fn recorder(&self) -> &ScreenRecorder {
        &self.recorder
    }

    pub fn held_len(&self) -> usize {
        self.held.len()
    }

    pub fn set_geometry(&mut self, geometry: ScreenGeometry) {
        self.geometry = geometry;
    }

    /// How many input bytes to read at once. Keystrokes are taken one at a
    /// time while blanked.
    pub fn input_read_len(&self, max: usize) -> usize {
        if self.blanked {
            1
        } else {
            max
        }
    }

    /// Reset the idle timer.
    pub fn note_activity(&mut self, now: Instant) {
        self.last_activity = now;
    }

    /// Route keyboard input: straight to the shell when the screen is live,
    /// through the lock machine when blanked.
    pub fn handle_input<T: Write, P: Write + ?Sized>(
        &mut self,
        bytes: &[u8],
        term: &mut T,
        pty: &mut P,
    ) -> io::Result<()> {
        if !self.blanked {
            pty.write_all(bytes)?;
            return pty.flush();
        }

        for &byte in bytes {
            match self.machine.handle_key(byte, self.revealed) {
                KeyOutcome::Peek => self.reveal(term)?,
                KeyOutcome::Prompt => {
                    if !self.revealed {
                        self.reveal(term)?;
                    }
                    self.show_cursor(term)?;
                    term.write_all(PROMPT)?;
                }
                KeyOutcome::Masked => term.write_all(MASK)?,
                KeyOutcome::Erased => term.write_all(ERASE_MASK)?,
                KeyOutcome::Ignored => {}
                KeyOutcome::Rejected { had_input } => {
                    term.write_all(SUBMIT_ECHO)?;
                    if had_input {
                        term.write_all(INCORRECT_NOTICE)?;
                    }
                    term.write_all(PROMPT)?;
                }
                KeyOutcome::Unlocked { authenticated } => {
                    if authenticated {
                        term.write_all(SUBMIT_ECHO)?;
                        term::clear_line(term)?;
                        term.write_all(UNLOCKED_NOTICE)?;
                    }
                    self.unlock(term, pty)?;
                    // whatever else arrived with the unlocking key is dropped
                    break;
                }
            }
        }
        term.flush()
    }

    /// Route shell output: always recorded, shown only while the screen is
    /// live. The first output of a blank cycle reveals the last screen.
    pub fn handle_output<T: Write>(&mut self, bytes: &[u8], term: &mut T) -> io::Result<()> {
        if self.blanked && !self.revealed {
            self.reveal(term)?;
        }
        self.recorder.record(bytes);
        if self.blanked {
            self.held.push(bytes);
        } else {
            term.write_all(bytes)?;
        }
        term.flush()
    }

    /// Idle check. Blanks the screen once the interval has passed without
    /// activity, unless it is already blanked and not revealed.
    ///
    /// Returns whether a blank transition happened.
    pub fn tick<T: Write>(&mut self, now: Instant, term: &mut T) -> io::Result<bool> {
        if now.saturating_duration_since(self.last_activity) <= self.interval {
            return Ok(false);
        }
        if self.blanked && !self.revealed {
            return Ok(false);
        }
        self.blank(term)?;
        Ok(true)
    }

    /// Put the display back in a usable state before exiting.
    pub fn finish<T: Write>(&mut self, term: &mut T) -> io::Result<()> {
        if self.alternate_screen {
            term::leave_alternate_screen(term)?;
            self.alternate_screen = false;
        }
        self.show_cursor(term)?;
        if self.blanked {
            term.write_all(&self.held.take())?;
        }
        term.flush()
    }

    fn blank<T: Write>(&mut self, term: &mut T) -> io::Result<()> {
        match self.restore {
            RestoreMode::Capabilities => {
                term::enter_alternate_screen(term)?;
                self.alternate_screen = true;
                term::clear_screen(term)?;
            }
            _ if self.clear_on_blank => term::clear_screen(term)?,
            _ => {}
        }
        if self.cursor_visible {
            term::hide_cursor(term)?;
            self.cursor_visible = false;
        }
        self.blanked = true;
        self.revealed = false;
        self.machine.rearm();
        tracing::info!(restore = ?self.restore, "screen blanked");
        term.flush()
    }

    fn reveal<T: Write>(&mut self, term: &mut T) -> io::Result<()> {
        self.replay(term)?;
        self.show_cursor(term)?;
        self.revealed = true;
        tracing::debug!("last screen revealed");
        Ok(())
    }

    fn replay<T: Write>(&mut self, term: &mut T) -> io::Result<()> {
        term.write_all(&self.recorder.replay(self.geometry))?;
        // the replay already shows everything held so far
        self.held.clear();
        Ok(())
    }

    fn unlock<T: Write, P: Write + ?Sized>(&mut self, term: &mut T, pty: &mut P) -> io::Result<()> {
        self.show_cursor(term)?;
        match self.restore {
            RestoreMode::None => {}
            RestoreMode::FormFeed => {
                pty.write_all(&[FORM_FEED])?;
                pty.flush()?;
            }
            RestoreMode::Capabilities => {
                if self.alternate_screen {
                    term::leave_alternate_screen(term)?;
                    self.alternate_screen = false;
                }
            }
            RestoreMode::Buffer => {
                if !self.revealed {
                    self.replay(term)?;
                }
            }
        }
        term.write_all(&self.held.take())?;
        self.blanked = false;
        self.revealed = false;
        self.machine.rearm();
        tracing::info!("screen restored");
        Ok(())
    }

    fn show_cursor<T: Write>(&mut self, term: &mut T) -> io::Result<()> {
        if !self.cursor_visible {
            term::show_cursor(term)?;
            self.cursor_visible = true;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Saver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Saver")
            .field("interval", &self.interval)
            .field("restore", &self.restore)
            .field("blanked", &self.blanked)
            .field("revealed", &self.revealed)
            .field("cursor_visible", &self.cursor_visible)
            .field("machine", &self.machine)
            .finish()
    }
}
