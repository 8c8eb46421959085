//! Line-oriented text buffer with a cached render and highlight per line.
//!
//! Every line owns three views of itself:
//! * `raw`: the bytes as they will be written back to disk.
//! * `render`: `raw` with tabs expanded, what the screen shows.
//! * `hl`: one `Highlight` per `render` byte, plus the block-comment state the
//!   line ends in.
//!
//! All mutations go through `Buffer`, which keeps the derived views in sync and
//! re-runs highlighting on successors while the carried-out comment state keeps
//! changing. Out-of-range edits are ignored (and traced) instead of panicking.

use std::collections::VecDeque;

use core_syntax::{Highlight, Syntax, highlight_line};

pub mod render;

pub use render::{DEFAULT_TAB_STOP, cx_to_rx, expand_tabs, rx_to_cx};

/// One stored line and its derived views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    raw: Vec<u8>,
    render: Vec<u8>,
    hl: Vec<Highlight>,
    open_comment: bool,
}

impl Line {
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
    pub fn render(&self) -> &[u8] {
        &self.render
    }
    pub fn highlights(&self) -> &[Highlight] {
        &self.hl
    }
    /// Whether this line ends inside an unterminated block comment.
    pub fn open_comment(&self) -> bool {
        self.open_comment
    }
    pub fn len(&self) -> usize {
        self.raw.len()
    }
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// A position inside a buffer expressed as (line index, byte offset within that line).
///
/// `line == line_count` is the virtual line past the end; its length is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if self.line > line_count {
            self.line = line_count;
        }
        let max_len = if self.line == line_count {
            0
        } else {
            line_len_fn(self.line)
        };
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

/// Ordered sequence of lines. Never empty once constructed through the public API.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Line>,
    dirty: u64,
    syntax: Option<&'static Syntax>,
    tab_stop: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// A buffer holding a single empty line.
    pub fn new() -> Self {
        Self::from_records(Vec::<Vec<u8>>::new())
    }

    /// Build from already-split records (no line terminators). An empty input
    /// still yields one empty line.
    pub fn from_records<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Vec<u8>>,
    {
        let mut buf = Self {
            lines: Vec::new(),
            dirty: 0,
            syntax: None,
            tab_stop: DEFAULT_TAB_STOP,
        };
        for raw in records {
            buf.lines.push(Line {
                raw: raw.into(),
                ..Line::default()
            });
        }
        if buf.lines.is_empty() {
            buf.lines.push(Line::default());
        }
        for idx in 0..buf.lines.len() {
            buf.update_line(idx);
        }
        buf
    }

    /// Split file bytes on `\n`, dropping one trailing `\r` per record. A final
    /// `\n` does not produce an extra empty record.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        if bytes.is_empty() {
            return Self::new();
        }
        Self::from_records(
            body.split(|b| *b == b'\n')
                .map(|rec| rec.strip_suffix(b"\r").unwrap_or(rec).to_vec()),
        )
    }

    /// Every line followed by `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.lines.iter().map(|l| l.raw.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(&line.raw);
            out.push(b'\n');
        }
        out
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Raw length of `idx`, zero for the virtual line and anything past it.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Line::len)
    }

    /// True for the state `new()` produces: one empty line.
    pub fn is_blank(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].raw.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Swap the active rule set and re-highlight every line in order.
    pub fn set_syntax(&mut self, syntax: Option<&'static Syntax>) {
        self.syntax = syntax;
        self.refresh_all();
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.tab_stop = tab_stop.max(1);
        self.refresh_all();
    }

    /// Insert a new line at `at` (`at == line_count` appends).
    pub fn insert_line(&mut self, at: usize, raw: impl Into<Vec<u8>>) {
        if at > self.lines.len() {
            tracing::trace!(target: "text.buffer", at, count = self.lines.len(), "insert_line out of range");
            return;
        }
        let seed = at > 0 && self.lines[at - 1].open_comment;
        self.lines.insert(
            at,
            Line {
                raw: raw.into(),
                open_comment: seed,
                ..Line::default()
            },
        );
        self.rehighlight_from(at);
        self.dirty += 1;
    }

    /// Remove line `at`. Removing the only line leaves a single empty line.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            tracing::trace!(target: "text.buffer", at, count = self.lines.len(), "delete_line out of range");
            return;
        }
        let removed = self.lines.remove(at);
        self.dirty += 1;
        if self.lines.is_empty() {
            self.lines.push(Line::default());
            self.update_line(0);
            return;
        }
        let carried_in = at > 0 && self.lines[at - 1].open_comment;
        if at < self.lines.len() && carried_in != removed.open_comment {
            self.rehighlight_from(at);
        }
    }

    /// Insert `byte` before column `at`; `at == len` appends, anything further
    /// is ignored.
    pub fn insert_char(&mut self, line: usize, at: usize, byte: u8) {
        let Some(l) = self.lines.get_mut(line) else {
            tracing::trace!(target: "text.buffer", line, "insert_char out of range");
            return;
        };
        if at > l.raw.len() {
            tracing::trace!(target: "text.buffer", line, at, len = l.raw.len(), "insert_char column out of range");
            return;
        }
        l.raw.insert(at, byte);
        self.rehighlight_from(line);
        self.dirty += 1;
    }

    /// Remove the byte at column `at`; ignored when `at` is outside the line.
    pub fn delete_char(&mut self, line: usize, at: usize) {
        let Some(l) = self.lines.get_mut(line) else {
            tracing::trace!(target: "text.buffer", line, "delete_char out of range");
            return;
        };
        if at >= l.raw.len() {
            tracing::trace!(target: "text.buffer", line, at, len = l.raw.len(), "delete_char column out of range");
            return;
        }
        l.raw.remove(at);
        self.rehighlight_from(line);
        self.dirty += 1;
    }

    /// Append `bytes` to the end of `line`.
    pub fn append_bytes(&mut self, line: usize, bytes: &[u8]) {
        let Some(l) = self.lines.get_mut(line) else {
            tracing::trace!(target: "text.buffer", line, "append_bytes out of range");
            return;
        };
        l.raw.extend_from_slice(bytes);
        self.rehighlight_from(line);
        self.dirty += 1;
    }

    /// Break `line` at column `at`; the tail becomes a new line directly below.
    /// A column past the end is ignored.
    pub fn split_line(&mut self, line: usize, at: usize) {
        let Some(l) = self.lines.get_mut(line) else {
            tracing::trace!(target: "text.buffer", line, "split_line out of range");
            return;
        };
        if at > l.raw.len() {
            tracing::trace!(target: "text.buffer", line, at, len = l.raw.len(), "split_line column out of range");
            return;
        }
        let tail = l.raw.split_off(at);
        // Cutting through a comment marker can flip the head's state even
        // though neither half opens or closes anything on its own.
        self.rehighlight_from(line);
        self.insert_line(line + 1, tail);
    }

    /// Join `line` onto the end of its predecessor and drop it.
    pub fn merge_with_previous(&mut self, line: usize) {
        if line == 0 || line >= self.lines.len() {
            tracing::trace!(target: "text.buffer", line, "merge_with_previous out of range");
            return;
        }
        let raw = std::mem::take(&mut self.lines[line].raw);
        self.append_bytes(line - 1, &raw);
        self.delete_line(line);
    }

    /// Logical (raw) column to rendered column.
    pub fn logical_to_rendered(&self, line: usize, cx: usize) -> usize {
        self.lines
            .get(line)
            .map_or(0, |l| cx_to_rx(&l.raw, cx, self.tab_stop))
    }

    /// Rendered column back to the raw column covering it.
    pub fn rendered_to_logical(&self, line: usize, rx: usize) -> usize {
        self.lines
            .get(line)
            .map_or(0, |l| rx_to_cx(&l.raw, rx, self.tab_stop))
    }

    /// Classes currently attached to `line`, if it exists.
    pub fn highlights(&self, line: usize) -> Option<&[Highlight]> {
        self.lines.get(line).map(|l| l.hl.as_slice())
    }

    /// Replace the classes on `line` wholesale. The length must match the
    /// rendered length; otherwise nothing changes and `false` is returned.
    pub fn set_highlights(&mut self, line: usize, classes: Vec<Highlight>) -> bool {
        match self.lines.get_mut(line) {
            Some(l) if l.render.len() == classes.len() => {
                l.hl = classes;
                true
            }
            _ => false,
        }
    }

    /// Overwrite the classes in rendered range `range` on `line`. The range is
    /// clipped to the line.
    pub fn paint_highlight(&mut self, line: usize, range: std::ops::Range<usize>, class: Highlight) {
        if let Some(l) = self.lines.get_mut(line) {
            let end = range.end.min(l.hl.len());
            let start = range.start.min(end);
            l.hl[start..end].fill(class);
        }
    }

    fn refresh_all(&mut self) {
        for idx in 0..self.lines.len() {
            self.update_line(idx);
        }
    }

    /// Recompute render and classes for `idx` from its raw bytes and the
    /// predecessor's comment state. Returns whether `open_comment` flipped.
    fn update_line(&mut self, idx: usize) -> bool {
        let carried_in = idx > 0 && self.lines[idx - 1].open_comment;
        let syntax = self.syntax;
        let tab_stop = self.tab_stop;
        let line = &mut self.lines[idx];
        line.render = expand_tabs(&line.raw, tab_stop);
        let out = highlight_line(&line.render, syntax, carried_in);
        line.hl = out.classes;
        let changed = line.open_comment != out.open_comment;
        line.open_comment = out.open_comment;
        changed
    }

    /// Re-highlight `start`, then keep walking forward while the comment
    /// state carried out of each line changes. Returns how many lines were
    /// recomputed.
    fn rehighlight_from(&mut self, start: usize) -> usize {
        let mut queue = VecDeque::from([start]);
        let mut visited = 0;
        while let Some(idx) = queue.pop_front() {
            if idx >= self.lines.len() {
                continue;
            }
            visited += 1;
            if self.update_line(idx) {
                queue.push_back(idx + 1);
            }
        }
        if visited > 1 {
            tracing::trace!(target: "text.buffer", start, visited, "comment cascade");
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_syntax::select_syntax;

    fn raw_lines(b: &Buffer) -> Vec<&[u8]> {
        b.lines().map(Line::raw).collect()
    }

    fn c_buffer(lines: &[&str]) -> Buffer {
        let mut b = Buffer::from_records(lines.iter().map(|s| s.as_bytes().to_vec()));
        b.set_syntax(select_syntax("x.c"));
        b
    }

    #[test]
    fn new_buffer_has_one_empty_line() {
        let b = Buffer::new();
        assert_eq!(b.line_count(), 1);
        assert!(b.is_blank());
        assert!(!b.is_dirty());
    }

    #[test]
    fn from_bytes_splits_and_trims_cr() {
        let b = Buffer::from_bytes(b"a\r\nb\n\nc");
        assert_eq!(raw_lines(&b), vec![&b"a"[..], b"b", b"", b"c"]);
        let b = Buffer::from_bytes(b"one\ntwo\n");
        assert_eq!(b.line_count(), 2);
        assert!(Buffer::from_bytes(b"").is_blank());
        assert_eq!(Buffer::from_bytes(b"\n").line_count(), 1);
    }

    #[test]
    fn to_bytes_terminates_every_line() {
        let b = Buffer::from_records(["x", "", "y"]);
        assert_eq!(b.to_bytes(), b"x\n\ny\n");
        assert_eq!(Buffer::new().to_bytes(), b"\n");
    }

    #[test]
    fn render_tracks_raw_edits() {
        let mut b = Buffer::from_records(["\tx"]);
        assert_eq!(b.line(0).unwrap().render(), b"        x");
        b.insert_char(0, 0, b'a');
        assert_eq!(b.line(0).unwrap().render(), b"a       x");
        assert_eq!(b.line(0).unwrap().highlights().len(), 9);
    }

    #[test]
    fn insert_char_at_length_appends_and_marks_dirty() {
        let mut b = Buffer::from_records(["ab"]);
        b.insert_char(0, 2, b'c');
        assert_eq!(b.line(0).unwrap().raw(), b"abc");
        assert!(b.is_dirty());
        b.mark_clean();
        assert!(!b.is_dirty());
    }

    #[test]
    fn columns_past_the_end_are_ignored() {
        let mut b = Buffer::from_records(["ab"]);
        b.insert_char(0, 99, b'c');
        b.insert_char(0, 3, b'c');
        b.split_line(0, 99);
        b.split_line(0, 3);
        assert_eq!(raw_lines(&b), vec![&b"ab"[..]]);
        assert_eq!(b.line_count(), 1);
        assert!(!b.is_dirty());
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut b = Buffer::from_records(["ab"]);
        b.insert_char(5, 0, b'x');
        b.delete_char(0, 2);
        b.delete_char(3, 0);
        b.delete_line(1);
        b.insert_line(3, "z");
        b.split_line(4, 0);
        b.merge_with_previous(0);
        assert_eq!(raw_lines(&b), vec![&b"ab"[..]]);
        assert!(!b.is_dirty());
    }

    #[test]
    fn insert_line_at_end_appends() {
        let mut b = Buffer::from_records(["a"]);
        b.insert_line(1, "b");
        assert_eq!(raw_lines(&b), vec![&b"a"[..], b"b"]);
    }

    #[test]
    fn deleting_only_line_leaves_empty_line() {
        let mut b = Buffer::from_records(["only"]);
        b.delete_line(0);
        assert!(b.is_blank());
        assert!(b.is_dirty());
    }

    #[test]
    fn split_and_merge() {
        let mut b = Buffer::from_records(["hello world"]);
        b.split_line(0, 5);
        assert_eq!(raw_lines(&b), vec![&b"hello"[..], b" world"]);
        b.merge_with_previous(1);
        assert_eq!(raw_lines(&b), vec![&b"hello world"[..]]);
    }

    #[test]
    fn split_at_start_pushes_whole_line_down() {
        let mut b = Buffer::from_records(["abc"]);
        b.split_line(0, 0);
        assert_eq!(raw_lines(&b), vec![&b""[..], b"abc"]);
    }

    #[test]
    fn opening_comment_cascades_until_closed() {
        let mut b = c_buffer(&["int a;", "int b;", "x */ int c;", "int d;"]);
        assert!(b.line(1).unwrap().highlights()[0] == Highlight::Keyword2);
        b.insert_char(0, 0, b'*');
        b.insert_char(0, 0, b'/');
        assert!(b.line(0).unwrap().open_comment());
        assert!(b.line(1).unwrap().highlights().iter().all(|h| *h == Highlight::MlComment));
        assert!(!b.line(2).unwrap().open_comment());
        assert_eq!(b.line(3).unwrap().highlights()[0], Highlight::Keyword2);
    }

    #[test]
    fn closing_comment_uncascades() {
        let mut b = c_buffer(&["/* a", "b", "c"]);
        assert!(b.line(2).unwrap().open_comment());
        b.append_bytes(0, b" */");
        assert!(!b.line(0).unwrap().open_comment());
        assert!(!b.line(2).unwrap().open_comment());
        assert!(b.line(1).unwrap().highlights().iter().all(|h| *h == Highlight::Normal));
    }

    #[test]
    fn inserted_line_inherits_open_comment() {
        let mut b = c_buffer(&["/* a", "b */"]);
        b.insert_line(1, "int");
        assert!(b.line(1).unwrap().highlights().iter().all(|h| *h == Highlight::MlComment));
        assert!(b.line(1).unwrap().open_comment());
        assert!(!b.line(2).unwrap().open_comment());
    }

    #[test]
    fn deleting_comment_opener_recomputes_successor() {
        let mut b = c_buffer(&["/* a", "int", "x */"]);
        b.delete_line(0);
        assert_eq!(b.line(0).unwrap().highlights()[0], Highlight::Keyword2);
        assert!(!b.line(0).unwrap().open_comment());
    }

    #[test]
    fn cascade_reports_visited_lines() {
        let mut b = c_buffer(&["a", "b", "c", "d"]);
        b.lines[0].raw = b"/*".to_vec();
        assert_eq!(b.rehighlight_from(0), 4);
        assert_eq!(b.rehighlight_from(0), 1, "nothing flips the second time");
    }

    #[test]
    fn column_mapping_on_virtual_line_is_zero() {
        let b = Buffer::from_records(["\tx"]);
        assert_eq!(b.logical_to_rendered(0, 1), 8);
        assert_eq!(b.rendered_to_logical(0, 3), 0);
        assert_eq!(b.logical_to_rendered(1, 4), 0);
        assert_eq!(b.rendered_to_logical(1, 4), 0);
    }

    #[test]
    fn set_highlights_rejects_length_mismatch() {
        let mut b = Buffer::from_records(["abc"]);
        assert!(!b.set_highlights(0, vec![Highlight::Match]));
        assert!(b.set_highlights(0, vec![Highlight::Match; 3]));
        assert_eq!(b.highlights(0).unwrap(), &[Highlight::Match; 3]);
        assert!(!b.set_highlights(4, vec![]));
    }

    #[test]
    fn paint_highlight_clips_range() {
        let mut b = Buffer::from_records(["abcd"]);
        b.paint_highlight(0, 2..10, Highlight::Match);
        assert_eq!(
            b.highlights(0).unwrap(),
            &[Highlight::Normal, Highlight::Normal, Highlight::Match, Highlight::Match]
        );
    }

    #[test]
    fn tab_stop_change_rerenders() {
        let mut b = Buffer::from_records(["\tx"]);
        b.set_tab_stop(4);
        assert_eq!(b.line(0).unwrap().render(), b"    x");
        b.set_tab_stop(0);
        assert_eq!(b.tab_stop(), 1);
        assert_eq!(b.line(0).unwrap().render(), b" x");
    }

    #[test]
    fn position_clamps_to_virtual_line() {
        let mut p = Position::new(7, 9);
        p.clamp_to(3, |_| 5);
        assert_eq!(p, Position::new(3, 0));
        let mut p = Position::new(1, 9);
        p.clamp_to(3, |_| 5);
        assert_eq!(p, Position::new(1, 5));
    }
}
