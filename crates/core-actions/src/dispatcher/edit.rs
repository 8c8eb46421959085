//! Text mutation. Every edit goes through `Buffer`, which keeps render and
//! highlight data current; this layer only decides where the edit lands and
//! where the cursor ends up.

use super::DispatchResult;
use super::motion::handle_motion;
use crate::{EditKind, MotionKind};
use core_model::View;
use core_state::EditorState;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState, view: &mut View) -> DispatchResult {
    let before = view.cursor;
    let changed = match kind {
        EditKind::InsertByte(b) => insert_byte(state, view, b),
        EditKind::InsertNewline => insert_newline(state, view),
        EditKind::Backspace => backspace(state, view),
        EditKind::DeleteForward => {
            handle_motion(MotionKind::Right, state.buffer(), view, 0);
            backspace(state, view)
        }
    };
    tracing::trace!(target: "actions.dispatch", op = ?kind, changed, line = before.line, byte = before.byte, to_line = view.cursor.line, to_byte = view.cursor.byte, "edit");
    if changed || view.cursor != before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

fn insert_byte(state: &mut EditorState, view: &mut View, b: u8) -> bool {
    let buffer = state.buffer_mut();
    if view.cursor.line == buffer.line_count() {
        buffer.insert_line(view.cursor.line, Vec::new());
    }
    buffer.insert_char(view.cursor.line, view.cursor.byte, b);
    view.cursor.byte += 1;
    true
}

fn insert_newline(state: &mut EditorState, view: &mut View) -> bool {
    let buffer = state.buffer_mut();
    if view.cursor.byte == 0 {
        buffer.insert_line(view.cursor.line, Vec::new());
    } else {
        buffer.split_line(view.cursor.line, view.cursor.byte);
    }
    view.cursor.line += 1;
    view.cursor.byte = 0;
    true
}

/// No-op on the virtual line and at the very start of the buffer.
fn backspace(state: &mut EditorState, view: &mut View) -> bool {
    let buffer = state.buffer_mut();
    let cur = &mut view.cursor;
    if cur.line >= buffer.line_count() || (cur.line == 0 && cur.byte == 0) {
        return false;
    }
    if cur.byte > 0 {
        buffer.delete_char(cur.line, cur.byte - 1);
        cur.byte -= 1;
    } else {
        cur.byte = buffer.line_len(cur.line - 1);
        buffer.merge_with_previous(cur.line);
        cur.line -= 1;
    }
    true
}
