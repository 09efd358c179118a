/// Visible screen size used when rebuilding the last screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub rows: u16,
    pub cols: u16,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// One newline-delimited line of recorded output.
///
/// `start..end` covers the line including its trailing `\n`, if any.
/// `rows` is how many screen rows the line occupies once wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
    pub rows: usize,
}

/// Split `contents` into lines and compute the rows each one occupies at
/// `cols` columns.
///
/// Bytes after the last newline form a final partial line.
pub fn line_index(contents: &[u8], cols: u16) -> Vec<LineSpan> {
    let cols = usize::from(cols.max(1));
    let mut spans = Vec::new();
    let mut start = 0;

    for (idx, &byte) in contents.iter().enumerate() {
        if byte == b'\n' {
            spans.push(LineSpan {
                start,
                end: idx + 1,
                rows: 1 + (idx - start) / cols,
            });
            start = idx + 1;
        }
    }
    if start < contents.len() {
        spans.push(LineSpan {
            start,
            end: contents.len(),
            rows: 1 + (contents.len() - start) / cols,
        });
    }
    spans
}
