/// Where the lock is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// Input flows to the shell. Only held for the duration of an unlock.
    Unlocked,
    /// Password entry in progress.
    Locked,
    /// Armed after a blank; the next keystroke brings up the prompt.
    #[default]
    LockedFirstAttempt,
}

impl LockState {
    pub fn is_locked(self) -> bool {
        !matches!(self, Self::Unlocked)
    }
}
