//! Cursor motion. Horizontal moves wrap across line ends; vertical moves keep
//! the byte column and snap it to the target line's length afterwards.

use super::DispatchResult;
use crate::MotionKind;
use core_model::View;
use core_text::Buffer;

pub(crate) fn handle_motion(
    kind: MotionKind,
    buffer: &Buffer,
    view: &mut View,
    page_rows: usize,
) -> DispatchResult {
    let before = view.cursor;
    match kind {
        MotionKind::PageUp => {
            view.cursor.line = view.row_offset;
            for _ in 0..page_rows {
                step(MotionKind::Up, buffer, view);
            }
        }
        MotionKind::PageDown => {
            let bottom = (view.row_offset + page_rows).saturating_sub(1);
            view.cursor.line = bottom.min(buffer.line_count());
            for _ in 0..page_rows {
                step(MotionKind::Down, buffer, view);
            }
        }
        other => step(other, buffer, view),
    }
    snap_column(buffer, view);
    tracing::trace!(target: "actions.dispatch", ?kind, from_line = before.line, from_byte = before.byte, to_line = view.cursor.line, to_byte = view.cursor.byte, "motion");
    if view.cursor == before {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}

fn step(kind: MotionKind, buffer: &Buffer, view: &mut View) {
    let cur = &mut view.cursor;
    let on_line = cur.line < buffer.line_count();
    match kind {
        MotionKind::Left => {
            if cur.byte > 0 {
                cur.byte -= 1;
            } else if cur.line > 0 {
                cur.line -= 1;
                cur.byte = buffer.line_len(cur.line);
            }
        }
        MotionKind::Right => {
            if on_line {
                if cur.byte < buffer.line_len(cur.line) {
                    cur.byte += 1;
                } else {
                    cur.line += 1;
                    cur.byte = 0;
                }
            }
        }
        MotionKind::Up => cur.line = cur.line.saturating_sub(1),
        MotionKind::Down => {
            if cur.line < buffer.line_count() {
                cur.line += 1;
            }
        }
        MotionKind::LineStart => cur.byte = 0,
        MotionKind::LineEnd => {
            if on_line {
                cur.byte = buffer.line_len(cur.line);
            }
        }
        MotionKind::PageUp | MotionKind::PageDown => {}
    }
}

/// The virtual line past the end has length 0.
fn snap_column(buffer: &Buffer, view: &mut View) {
    let len = buffer.line_len(view.cursor.line);
    if view.cursor.byte > len {
        view.cursor.byte = len;
    }
}
