//! Lock state machine and credential checking.
//!
//! The machine decides what each keystroke means while the screen is
//! blanked; writing the prompt, echoing and replaying the screen are left
//! to the caller so the machine can be driven without a terminal.

pub mod auth;
mod machine;
mod password;
mod state;

pub use auth::{Authenticator, CommandAuthenticator, DigestAuthenticator};
pub use machine::{KeyOutcome, LockMachine, INCORRECT_NOTICE, PROMPT, UNLOCKED_NOTICE};
pub use password::{PasswordBuffer, PASSWORD_CAPACITY};
pub use state::LockState;
