use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::signal::{SIGHUP, SIGTERM, SIGWINCH};
use signal_hook::flag;

use crate::error::SetupError;

/// Signals the event loop polls for once per tick.
///
/// Handlers only set flags; nothing runs on a separate thread.
pub struct SignalFlags {
    resized: Arc<AtomicBool>,
    terminate: Arc<AtomicBool>,
}

impl SignalFlags {
    pub fn register() -> Result<Self, SetupError> {
        let resized = Arc::new(AtomicBool::new(false));
        let terminate = Arc::new(AtomicBool::new(false));
        flag::register(SIGWINCH, Arc::clone(&resized)).map_err(SetupError::Signals)?;
        for signal in [SIGTERM, SIGHUP] {
            flag::register(signal, Arc::clone(&terminate)).map_err(SetupError::Signals)?;
        }
        Ok(Self { resized, terminate })
    }

    /// True once per window-size change.
    pub fn take_resize(&self) -> bool {
        self.resized.swap(false, Ordering::Relaxed)
    }

    pub fn termination_requested(&self) -> bool {
        self.terminate.load(Ordering::Relaxed)
    }
}
