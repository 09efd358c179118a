use super::lines::{line_index, ScreenGeometry};

/// Default window size, in bytes.
pub const DEFAULT_CAPACITY: usize = 2000;

/// Fixed-capacity window over the most recent shell output.
///
/// The window always holds exactly the last `capacity` bytes written, left
/// padded with zeros until that many bytes have been produced. Every write
/// drops the oldest bytes and appends the newest ones in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRecorder {
    window: Vec<u8>,
}

impl ScreenRecorder {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: vec![0; capacity.max(1)],
        }
    }

    pub fn capacity(&self) -> usize {
        self.window.len()
    }

    /// Shift the window left by `bytes.len()` and append `bytes`.
    ///
    /// Writes longer than the window keep only their tail.
    pub fn record(&mut self, bytes: &[u8]) {
        let capacity = self.window.len();
        if bytes.len() >= capacity {
            self.window.copy_from_slice(&bytes[bytes.len() - capacity..]);
            return;
        }
        self.window.copy_within(bytes.len().., 0);
        let start = capacity - bytes.len();
        self.window[start..].copy_from_slice(bytes);
    }

    /// Raw window contents, padding included.
    pub fn window(&self) -> &[u8] {
        &self.window
    }

    /// Window contents with the leading zero padding skipped.
    pub fn contents(&self) -> &[u8] {
        let start = self
            .window
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(self.window.len());
        &self.window[start..]
    }

    /// Rebuild what was last visible on a `geometry`-sized screen.
    ///
    /// Lines are taken from the most recent backwards while their combined
    /// row count stays below the screen height; the kept lines are emitted
    /// in their original order. The newest line is always emitted, even if it
    /// alone is taller than the screen. Cursor movement inside a line is not
    /// tracked.
    pub fn replay(&self, geometry: ScreenGeometry) -> Vec<u8> {
        let contents = self.contents();
        let spans = line_index(contents, geometry.cols);

        let mut used = 0usize;
        let mut first = spans.len();
        for (idx, span) in spans.iter().enumerate().rev() {
            if used + span.rows >= usize::from(geometry.rows) {
                break;
            }
            used += span.rows;
            first = idx;
        }
        if first == spans.len() && !spans.is_empty() {
            first = spans.len() - 1;
        }

        match spans.get(first) {
            Some(span) => contents[span.start..].to_vec(),
            None => Vec::new(),
        }
    }
}

impl Default for ScreenRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
