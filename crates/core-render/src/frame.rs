//! Per-frame screen description handed from composition to the writer.

use core_syntax::Highlight;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRow {
    /// Visible slice of a line's render bytes with one class per byte.
    Text {
        bytes: Vec<u8>,
        classes: Vec<Highlight>,
    },
    /// Row past the end of the buffer, drawn as `~`.
    Filler,
    /// Centered banner, already padded (leading `~` included).
    Welcome(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<ScreenRow>,
    /// Exactly `cols` bytes wide.
    pub status: String,
    /// Possibly empty; never wider than `cols`.
    pub message: String,
    /// Cursor cell as (column, row).
    pub cursor: (u16, u16),
}
