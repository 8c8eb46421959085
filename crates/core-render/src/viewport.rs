//! Visible window into the buffer.
//!
//! The offsets themselves are maintained by `core-model::View::scroll`; this
//! module only cuts the buffer down to what fits on screen:
//! * rows `[row_offset, row_offset + text_rows)` of the buffer,
//! * rendered columns `[col_offset, col_offset + cols)` of each of them.

use core_model::{Layout, View};
use core_state::EditorState;

use crate::frame::ScreenRow;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Banner text before padding.
pub fn welcome_text() -> String {
    format!("Tiny editor -- version {VERSION}")
}

/// One `ScreenRow` per text row of `layout`. The welcome banner replaces the
/// text only for an untouched session with no file behind it.
pub fn visible_rows(state: &EditorState, view: &View, layout: &Layout) -> Vec<ScreenRow> {
    let buffer = state.buffer();
    let rows = layout.text_rows();
    let cols = layout.text_cols();
    let show_welcome = state.file_name().is_none() && buffer.is_blank() && !buffer.is_dirty();
    (0..rows)
        .map(|y| {
            let file_row = y + view.row_offset;
            if show_welcome {
                return if y == rows / 3 {
                    ScreenRow::Welcome(centered_welcome(cols))
                } else {
                    ScreenRow::Filler
                };
            }
            match buffer.line(file_row) {
                Some(line) => {
                    let start = view.col_offset.min(line.render().len());
                    let end = (start + cols).min(line.render().len());
                    ScreenRow::Text {
                        bytes: line.render()[start..end].to_vec(),
                        classes: line.highlights()[start..end].to_vec(),
                    }
                }
                None => ScreenRow::Filler,
            }
        })
        .collect()
}

fn centered_welcome(cols: usize) -> String {
    let mut text = welcome_text();
    text.truncate(cols);
    let padding = (cols - text.len()) / 2;
    if padding == 0 {
        return text;
    }
    let mut out = String::with_capacity(cols);
    out.push('~');
    out.push_str(&" ".repeat(padding - 1));
    out.push_str(&text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_syntax::Highlight;
    use core_text::{Buffer, Position};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> ScreenRow {
        ScreenRow::Text {
            bytes: s.as_bytes().to_vec(),
            classes: vec![Highlight::Normal; s.len()],
        }
    }

    #[test]
    fn rows_past_end_are_filler() {
        let buf = Buffer::from_records(["a", "b"]);
        let rows = visible_rows(&EditorState::new(buf), &View::default(), &Layout::new(10, 6));
        assert_eq!(rows, vec![text("a"), text("b"), ScreenRow::Filler, ScreenRow::Filler]);
    }

    #[test]
    fn row_offset_skips_lines() {
        let buf = Buffer::from_records(["0", "1", "2", "3"]);
        let view = View {
            row_offset: 2,
            ..View::default()
        };
        let rows = visible_rows(&EditorState::new(buf), &view, &Layout::new(10, 5));
        assert_eq!(rows, vec![text("2"), text("3"), ScreenRow::Filler]);
    }

    #[test]
    fn columns_are_clipped_to_window() {
        let buf = Buffer::from_records(["abcdefgh", "ab", "\tx"]);
        let view = View {
            col_offset: 3,
            ..View::new(Position::origin())
        };
        let rows = visible_rows(&EditorState::new(buf), &view, &Layout::new(4, 5));
        assert_eq!(rows, vec![text("defg"), text(""), text("    ")]);
    }

    #[test]
    fn blank_clean_buffer_shows_welcome_a_third_down() {
        let buf = Buffer::new();
        let rows = visible_rows(&EditorState::new(buf), &View::default(), &Layout::new(80, 11));
        assert_eq!(rows.len(), 9);
        let idx = rows
            .iter()
            .position(|r| matches!(r, ScreenRow::Welcome(_)))
            .unwrap();
        assert_eq!(idx, 3);
        let ScreenRow::Welcome(w) = &rows[idx] else {
            unreachable!()
        };
        assert!(w.starts_with('~'));
        assert!(w.ends_with(&welcome_text()));
        assert_eq!(w.len(), (80 - welcome_text().len()) / 2 + welcome_text().len());
    }

    #[test]
    fn empty_file_shows_its_line_instead_of_welcome() {
        let mut st = EditorState::new(Buffer::from_bytes(b"\n"));
        st.bind_file("empty.txt");
        let rows = visible_rows(&st, &View::default(), &Layout::new(80, 11));
        assert_eq!(rows[0], text(""));
        assert!(rows[1..].iter().all(|r| *r == ScreenRow::Filler));
    }

    #[test]
    fn welcome_truncates_on_narrow_terminal() {
        let w = centered_welcome(5);
        assert_eq!(w.as_str(), &welcome_text()[..5]);
    }

    #[test]
    fn edited_buffer_hides_welcome() {
        let mut buf = Buffer::new();
        buf.insert_char(0, 0, b'x');
        buf.delete_char(0, 0);
        let rows = visible_rows(&EditorState::new(buf), &View::default(), &Layout::new(80, 11));
        assert!(rows.iter().all(|r| !matches!(r, ScreenRow::Welcome(_))));
        assert_eq!(rows[0], text(""));
    }
}
