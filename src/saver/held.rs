use std::collections::VecDeque;

/// Default amount of background output kept while blanked.
pub const HELD_CAPACITY: usize = 64 * 1024;

/// Shell output produced while the screen is blanked, waiting to be shown.
///
/// Bounded; the oldest bytes are dropped first.
#[derive(Debug, Clone)]
pub struct HeldOutput {
    bytes: VecDeque<u8>,
    capacity: usize,
}

impl HeldOutput {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, data: &[u8]) {
        if data.len() >= self.capacity {
            self.bytes.clear();
            self.bytes.extend(&data[data.len() - self.capacity..]);
            return;
        }
        let overflow = (self.bytes.len() + data.len()).saturating_sub(self.capacity);
        self.bytes.drain(..overflow);
        self.bytes.extend(data);
    }

    pub fn take(&mut self) -> Vec<u8> {
        self.bytes.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
