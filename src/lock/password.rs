use zeroize::{Zeroize, ZeroizeOnDrop};

/// Largest password accepted, matching the PAM response limit.
pub const PASSWORD_CAPACITY: usize = 512;

/// Bounded accumulator for a password being typed.
///
/// Contents are wiped on [`clear`](Self::clear) and on drop, and never
/// shown by `Debug`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PasswordBuffer {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    capacity: usize,
}

impl PasswordBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one byte. Returns `false` and drops the byte when full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.bytes.len() >= self.capacity {
            return false;
        }
        self.bytes.push(byte);
        true
    }

    /// Remove the last byte. Returns `false` if the buffer was empty.
    pub fn pop(&mut self) -> bool {
        match self.bytes.pop() {
            Some(mut byte) => {
                byte.zeroize();
                true
            }
            None => false,
        }
    }

    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.zeroize();
    }
}

impl Default for PasswordBuffer {
    fn default() -> Self {
        Self::new(PASSWORD_CAPACITY)
    }
}

impl std::fmt::Debug for PasswordBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PasswordBuffer([REDACTED, {} bytes])", self.bytes.len())
    }
}
