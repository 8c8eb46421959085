//! High-level editor model: the session state plus the single view onto it.
//!
//! A `View` owns presentation state (cursor, rendered cursor column, scroll
//! offsets) while `EditorState` owns the buffer and file binding. Keeping them
//! apart lets the dispatcher borrow both mutably at once through
//! `EditorModel::split_state_and_view`.
//!
//! Invariants (must hold after every `View::scroll`):
//! * `cursor.line <= buffer.line_count()` (the virtual line past the end is
//!   a legal cursor target).
//! * `cursor.byte <= line_len(cursor.line)`.
//! * `row_offset <= cursor.line < row_offset + text_rows` when `text_rows > 0`.
//! * `col_offset <= rx < col_offset + text_cols` when `text_cols > 0`.

use core_state::EditorState;
use core_text::{Buffer, Position};

mod layout;
pub use layout::{BAR_ROWS, Layout};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub cursor: Position,
    /// Rendered column of the cursor, refreshed by `scroll`.
    pub rx: usize,
    pub row_offset: usize,
    pub col_offset: usize,
}

impl View {
    pub fn new(cursor: Position) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Pull the cursor back inside the buffer after an edit or motion.
    pub fn clamp_cursor(&mut self, buffer: &Buffer) {
        self.cursor
            .clamp_to(buffer.line_count(), |l| buffer.line_len(l));
    }

    /// Recompute `rx` and adjust both offsets so the cursor is on screen.
    /// Returns true if either offset changed.
    pub fn scroll(&mut self, buffer: &Buffer, layout: &Layout, vertical_margin: usize) -> bool {
        self.clamp_cursor(buffer);
        self.rx = buffer.logical_to_rendered(self.cursor.line, self.cursor.byte);
        let mut moved = false;
        if let Some(first) = compute_scroll_intent(
            self.row_offset,
            self.cursor.line,
            layout.text_rows(),
            vertical_margin,
        ) {
            self.row_offset = first;
            moved = true;
        }
        if let Some(first) = compute_scroll_intent(self.col_offset, self.rx, layout.text_cols(), 0)
        {
            self.col_offset = first;
            moved = true;
        }
        if moved {
            tracing::trace!(
                target: "model.scroll",
                row_offset = self.row_offset,
                col_offset = self.col_offset,
                line = self.cursor.line,
                rx = self.rx,
                "scroll"
            );
        }
        moved
    }
}

pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self::with_view(View::default(), state)
    }

    /// Helper constructor allowing an already prepared view (cursor/offsets) to be injected.
    pub fn with_view(view: View, state: EditorState) -> Self {
        Self { state, view }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Disjoint mutable borrows of the state and its view.
    pub fn split_state_and_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Scroll the view against the current buffer.
    pub fn scroll(&mut self, layout: &Layout, vertical_margin: usize) -> bool {
        let (state, view) = self.split_state_and_view();
        view.scroll(state.buffer(), layout, vertical_margin)
    }
}

/// Compute the desired new first visible line to keep the cursor within the
/// vertical viewport subject to a top/bottom margin.
///
/// Inputs:
/// - first: current first visible line (top of viewport)
/// - cursor_line: current cursor line (0-based)
/// - text_height: number of text rows available (excludes status/message bars)
/// - margin: desired margin in rows (will be conservatively clamped to at most text_height/2)
///
/// Returns Some(new_first) if a scroll is needed, else None when the cursor is
/// already within the permitted band. The same computation serves columns with
/// a zero margin.
pub fn compute_scroll_intent(
    first: usize,
    cursor_line: usize,
    text_height: usize,
    margin: usize,
) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    let m = margin.min(text_height / 2);
    let top = first;
    let bottom = first + text_height;
    if cursor_line < top + m {
        let new_first = cursor_line.saturating_sub(m);
        if new_first != first {
            return Some(new_first);
        }
    } else if cursor_line + m >= bottom {
        let new_first = cursor_line + m + 1 - text_height;
        if new_first != first {
            return Some(new_first);
        }
    }
    None
}
