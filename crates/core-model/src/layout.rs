//! Terminal geometry split into the text area and the two bars below it.
//!
//! Rows are laid out top to bottom as `text_rows()` lines of buffer text, one
//! status bar, one message bar. Coordinates are terminal cells (`u16`) to match
//! the crossterm APIs the renderer feeds them to.

/// Lines reserved under the text area (status bar + message bar).
pub const BAR_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows available for buffer text; zero on a degenerate terminal.
    pub fn text_rows(&self) -> usize {
        self.height.saturating_sub(BAR_ROWS) as usize
    }

    pub fn text_cols(&self) -> usize {
        self.width as usize
    }

    pub fn status_row(&self) -> u16 {
        self.height.saturating_sub(BAR_ROWS)
    }

    pub fn message_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }
}
