//! Terminal screensaver and lock.
//!
//! The user's shell runs on a pseudo-terminal behind a single-threaded
//! proxy loop. After a period without activity the screen is blanked and
//! keystrokes go to a lock prompt instead of the shell; the shell keeps
//! running and its output is recorded so the last screen can be replayed.

pub mod cli;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod lock;
pub mod logging;
pub mod runtime;
pub mod saver;
pub mod screen;
pub mod session;
