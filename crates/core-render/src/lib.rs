//! Frame composition and emission.
//!
//! Every cycle rebuilds the whole frame from the model:
//! 1. `viewport::visible_rows` cuts the buffer to the scrolled window.
//! 2. `status` formats the status bar and the live message.
//! 3. The cursor cell is the view's cursor minus the scroll offsets.
//! 4. `writer::emit` turns the frame into crossterm commands and flushes once.
//!
//! Callers scroll the view (`core-model::View::scroll`) before building.

use std::time::Instant;

use core_model::{EditorModel, Layout};

pub mod frame;
pub mod status;
pub mod style;
pub mod viewport;
pub mod writer;

pub use frame::{Frame, ScreenRow};
pub use writer::emit;

/// Snapshot the model into a `Frame` for `layout`.
pub fn build_frame(model: &EditorModel, layout: &Layout, now: Instant) -> Frame {
    let state = model.state();
    let view = model.view();
    let cols = layout.text_cols();
    let cursor_x = view.rx.saturating_sub(view.col_offset);
    let cursor_y = view.cursor.line.saturating_sub(view.row_offset);
    Frame {
        rows: viewport::visible_rows(state, view, layout),
        status: status::compose_status(state, view, cols),
        message: status::compose_message(state, now, cols),
        cursor: (
            u16::try_from(cursor_x).unwrap_or(u16::MAX),
            u16::try_from(cursor_y).unwrap_or(u16::MAX),
        ),
    }
}
