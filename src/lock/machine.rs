use super::auth::Authenticator;
use super::password::PasswordBuffer;
use super::state::LockState;

pub const PROMPT: &[u8] = b"\rpassword: ";
pub const INCORRECT_NOTICE: &[u8] = b"password incorrect\n\r";
pub const UNLOCKED_NOTICE: &[u8] = b"terminal unlocked\n\r";

const PEEK_KEY: u8 = b' ';

/// What a keystroke meant to a locked terminal.
///
/// The caller turns each outcome into terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Peek key before anything was revealed this cycle: show the last
    /// screen, stay armed.
    Peek,
    /// First keystroke of the cycle: reveal if needed and show the prompt.
    Prompt,
    /// A password byte was stored; echo a mask character.
    Masked,
    /// The last password byte was removed; erase one mask character.
    Erased,
    /// Nothing to do (backspace on empty input, or a full buffer).
    Ignored,
    /// Credentials were refused; `had_input` is false for an empty submit.
    Rejected { had_input: bool },
    /// The lock is open. `authenticated` is false when password checking
    /// is disabled.
    Unlocked { authenticated: bool },
}

/// Keystroke interpreter for a blanked terminal.
///
/// Without an authenticator every keystroke unlocks.
pub struct LockMachine {
    state: LockState,
    password: PasswordBuffer,
    authenticator: Option<Box<dyn Authenticator>>,
    identity: String,
    service: String,
}

impl LockMachine {
    pub fn new(
        authenticator: Option<Box<dyn Authenticator>>,
        identity: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            state: LockState::LockedFirstAttempt,
            password: PasswordBuffer::default(),
            authenticator,
            identity: identity.into(),
            service: service.into(),
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn password_len(&self) -> usize {
        self.password.len()
    }

    pub fn checks_password(&self) -> bool {
        self.authenticator.is_some()
    }

    /// Interpret one keystroke. `revealed` tells whether the last screen has
    /// already been shown during this blank cycle.
    pub fn handle_key(&mut self, byte: u8, revealed: bool) -> KeyOutcome {
        let Some(authenticator) = self.authenticator.as_deref() else {
            self.state = LockState::Unlocked;
            return KeyOutcome::Unlocked {
                authenticated: false,
            };
        };

        match self.state {
            LockState::Unlocked => KeyOutcome::Ignored,
            LockState::LockedFirstAttempt => {
                if byte == PEEK_KEY && !revealed {
                    return KeyOutcome::Peek;
                }
                self.state = LockState::Locked;
                KeyOutcome::Prompt
            }
            LockState::Locked => match byte {
                b'\r' | b'\n' => {
                    let had_input = !self.password.is_empty();
                    let accepted = authenticator.authenticate(
                        &self.identity,
                        &self.service,
                        self.password.expose(),
                    );
                    self.password.clear();
                    if accepted {
                        tracing::info!(identity = %self.identity, "terminal unlocked");
                        self.state = LockState::Unlocked;
                        KeyOutcome::Unlocked {
                            authenticated: true,
                        }
                    } else {
                        tracing::warn!(identity = %self.identity, "authentication failed");
                        KeyOutcome::Rejected { had_input }
                    }
                }
                0x08 | 0x7f => {
                    if self.password.pop() {
                        KeyOutcome::Erased
                    } else {
                        KeyOutcome::Ignored
                    }
                }
                _ => {
                    if self.password.push(byte) {
                        KeyOutcome::Masked
                    } else {
                        KeyOutcome::Ignored
                    }
                }
            },
        }
    }

    /// Arm for the next blank cycle, discarding any partial password.
    pub fn rearm(&mut self) {
        self.password.clear();
        self.state = LockState::LockedFirstAttempt;
    }
}

impl std::fmt::Debug for LockMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockMachine")
            .field("state", &self.state)
            .field("password", &self.password)
            .field("checks_password", &self.checks_password())
            .field("service", &self.service)
            .finish()
    }
}
