//! Recorded output window and last-screen reconstruction.

mod lines;
mod recorder;

pub use lines::{line_index, LineSpan, ScreenGeometry};
pub use recorder::{ScreenRecorder, DEFAULT_CAPACITY};
