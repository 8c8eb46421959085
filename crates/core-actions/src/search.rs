//! Incremental find.
//!
//! Each query update scans the rendered lines, wrapping at both ends, and
//! paints the first hit with `Highlight::Match`. The painted line's own
//! classes are kept aside and put back before the next scan, so at most one
//! line carries the overlay at any time.

use core_model::EditorModel;
use core_syntax::Highlight;
use core_text::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// What happened in the prompt since the last call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchInput {
    /// Query text changed.
    Typed,
    Next,
    Previous,
    Cancel,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedHighlight {
    pub line: usize,
    pub classes: Vec<Highlight>,
}

#[derive(Debug, Default)]
pub struct SearchController {
    last_match: Option<usize>,
    direction: SearchDirection,
    saved: Option<SavedHighlight>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Line currently carrying the match overlay.
    pub fn overlay_line(&self) -> Option<usize> {
        self.saved.as_ref().map(|s| s.line)
    }

    /// Feed one prompt event. Returns the matched line when the cursor moved.
    pub fn on_input(&mut self, model: &mut EditorModel, query: &str, input: SearchInput) -> Option<usize> {
        self.restore_overlay(model.state_mut().buffer_mut());
        match input {
            SearchInput::Cancel | SearchInput::Confirm => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
                return None;
            }
            SearchInput::Next => self.direction = SearchDirection::Forward,
            SearchInput::Previous => self.direction = SearchDirection::Backward,
            SearchInput::Typed => self.last_match = None,
        }
        if query.is_empty() {
            return None;
        }
        let (state, view) = model.split_state_and_view();
        let buffer = state.buffer_mut();
        let Some((line, rx)) = self.scan(buffer, query.as_bytes()) else {
            tracing::trace!(target: "actions.search", query, ?input, "no match");
            return None;
        };
        self.last_match = Some(line);
        view.cursor.line = line;
        view.cursor.byte = buffer.rendered_to_logical(line, rx);
        view.row_offset = line;
        if let Some(classes) = buffer.highlights(line) {
            self.saved = Some(SavedHighlight {
                line,
                classes: classes.to_vec(),
            });
        }
        buffer.paint_highlight(line, rx..rx + query.len(), Highlight::Match);
        tracing::trace!(target: "actions.search", query, line, rx, direction = ?self.direction, "match");
        Some(line)
    }

    /// Visit every line once starting next to `last_match`; returns the line
    /// and rendered column of the first hit.
    fn scan(&self, buffer: &Buffer, needle: &[u8]) -> Option<(usize, usize)> {
        let n = buffer.line_count();
        if n == 0 {
            return None;
        }
        let mut current = self.last_match;
        for _ in 0..n {
            let next = match (current, self.direction) {
                (None, SearchDirection::Forward) => 0,
                (None, SearchDirection::Backward) => n - 1,
                (Some(c), SearchDirection::Forward) => (c + 1) % n,
                (Some(c), SearchDirection::Backward) => c.checked_sub(1).unwrap_or(n - 1),
            };
            current = Some(next);
            let render = buffer.line(next).map(|l| l.render()).unwrap_or_default();
            if let Some(rx) = find_bytes(render, needle) {
                return Some((next, rx));
            }
        }
        None
    }

    fn restore_overlay(&mut self, buffer: &mut Buffer) {
        if let Some(saved) = self.saved.take() {
            buffer.set_highlights(saved.line, saved.classes);
        }
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
