//! Status bar and message bar composition.
//!
//! Status bar layout, padded or cut to exactly `cols` bytes:
//! `<name, at most 20 chars> - <n> lines[ (modified)]` on the left and
//! `<file type> | <line>/<n>` flush right. The right half is dropped when the
//! two would overlap.

use std::time::Instant;

use core_model::View;
use core_state::EditorState;

/// Everything the status bar shows, detached from the state it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusContext<'a> {
    pub name: &'a str,
    pub line_count: usize,
    pub dirty: bool,
    pub file_type: &'a str,
    /// 1-based cursor line.
    pub line: usize,
}

pub fn format_status(ctx: &StatusContext<'_>, cols: usize) -> String {
    let name: String = ctx.name.chars().take(20).collect();
    let mut left = format!("{name} - {} lines", ctx.line_count);
    if ctx.dirty {
        left.push_str(" (modified)");
    }
    let right = format!("{} | {}/{}", ctx.file_type, ctx.line, ctx.line_count);

    let mut out = truncate_bytes(&left, cols).to_string();
    if out.len() + right.len() <= cols {
        let pad = cols - out.len() - right.len();
        out.push_str(&" ".repeat(pad));
        out.push_str(&right);
    } else {
        let pad = cols - out.len();
        out.push_str(&" ".repeat(pad));
    }
    out
}

pub fn compose_status(state: &EditorState, view: &View, cols: usize) -> String {
    let name = state.display_name();
    let ctx = StatusContext {
        name: &name,
        line_count: state.buffer().line_count(),
        dirty: state.buffer().is_dirty(),
        file_type: state.file_type(),
        line: view.cursor.line + 1,
    };
    format_status(&ctx, cols)
}

/// Live message text cut to `cols`, or empty once it has expired.
pub fn compose_message(state: &EditorState, now: Instant, cols: usize) -> String {
    state
        .status_text(now)
        .map(|t| truncate_bytes(t, cols).to_string())
        .unwrap_or_default()
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Buffer, Position};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn ctx(name: &str, dirty: bool) -> StatusContext<'_> {
        StatusContext {
            name,
            line_count: 3,
            dirty,
            file_type: "c",
            line: 2,
        }
    }

    #[test]
    fn right_side_is_flush_right() {
        let s = format_status(&ctx("a.c", false), 30);
        assert_eq!(s, format!("a.c - 3 lines{}c | 2/3", " ".repeat(10)));
        assert_eq!(s.len(), 30);
    }

    #[test]
    fn dirty_marker_and_name_cut_at_twenty() {
        let s = format_status(&ctx("abcdefghijklmnopqrstuvwxyz.c", true), 60);
        assert!(s.starts_with("abcdefghijklmnopqrst - 3 lines (modified)"), "{s}");
        assert!(s.ends_with("c | 2/3"));
        assert_eq!(s.len(), 60);
    }

    #[test]
    fn narrow_terminal_drops_right_side() {
        let s = format_status(&ctx("a.c", false), 16);
        assert_eq!(s, "a.c - 3 lines   ");
        let s = format_status(&ctx("a.c", false), 5);
        assert_eq!(s, "a.c -");
    }

    #[test]
    fn compose_reads_state_and_view() {
        let mut st = EditorState::new(Buffer::from_records(["x", "y"]));
        let view = View::new(Position::new(2, 0));
        let s = compose_status(&st, &view, 40);
        assert!(s.starts_with("[No Name] - 2 lines"));
        assert!(s.ends_with("no ft | 3/2"));
        st.bind_file("m.rs");
        st.buffer_mut().insert_char(0, 0, b'z');
        let s = compose_status(&st, &view, 40);
        assert!(s.starts_with("m.rs - 2 lines (modified)"));
        assert!(s.ends_with("rust | 3/2"));
    }

    #[test]
    fn message_expires_and_truncates() {
        let mut st = EditorState::new(Buffer::new());
        st.set_ephemeral("HELP: Ctrl-S = save", Duration::from_secs(5));
        let now = Instant::now();
        assert_eq!(compose_message(&st, now, 4), "HELP");
        assert_eq!(compose_message(&st, now, 80), "HELP: Ctrl-S = save");
        assert_eq!(compose_message(&st, now + Duration::from_secs(6), 80), "");
    }
}
