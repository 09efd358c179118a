use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::{Arc, Mutex};

use crate::error::SetupError;

/// Holds the controlling terminal in raw mode and puts the saved mode back
/// exactly once: on [`restore`](Self::restore), on drop, or from the panic
/// hook, whichever comes first.
pub struct TerminalModeGuard {
    cleanup: Arc<Mutex<Option<Box<dyn FnOnce() + Send + 'static>>>>,
}

impl TerminalModeGuard {
    /// Save the current terminal mode and switch to raw mode with echo off.
    pub fn acquire() -> Result<Self, SetupError> {
        enable_raw_mode().map_err(SetupError::TerminalMode)?;
        let guard = Self::with_cleanup(|| {
            let _ = disable_raw_mode();
        });
        guard.install_panic_hook();
        Ok(guard)
    }

    fn with_cleanup<F: FnOnce() + Send + 'static>(cleanup: F) -> Self {
        let cleanup: Box<dyn FnOnce() + Send + 'static> = Box::new(cleanup);
        Self {
            cleanup: Arc::new(Mutex::new(Some(cleanup))),
        }
    }

    fn install_panic_hook(&self) {
        let cleanup = Arc::clone(&self.cleanup);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Ok(mut slot) = cleanup.lock() {
                if let Some(cleanup) = slot.take() {
                    cleanup();
                }
            }
            default_hook(info);
        }));
    }

    pub fn restore(&self) {
        if let Ok(mut slot) = self.cleanup.lock() {
            if let Some(cleanup) = slot.take() {
                cleanup();
                tracing::debug!("terminal mode restored");
            }
        }
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        self.restore();
    }
}
