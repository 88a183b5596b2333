//! Source spans handed over by the host.
//!
//! Hosts address declarations by byte offset; edits are reported back in the
//! same coordinates so no line map is needed on this side.

/// A half-open byte range `[start, start + length)` in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TextSpan {
    pub start: u32,
    pub length: u32,
}

impl TextSpan {
    pub const fn new(start: u32, length: u32) -> Self {
        TextSpan { start, length }
    }
}
