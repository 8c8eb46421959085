//! Key sequences driven through the dispatcher end to end.

use core_actions::Dispatcher;
use core_events::{KeyCode, KeyEvent};
use core_model::{EditorModel, Layout};
use core_state::EditorState;
use core_syntax::Highlight;
use core_text::{Buffer, Position};
use pretty_assertions::assert_eq;

struct Session {
    model: EditorModel,
    dispatcher: Dispatcher,
    layout: Layout,
}

impl Session {
    fn new(lines: &[&str]) -> Self {
        Self {
            model: EditorModel::new(EditorState::new(Buffer::from_records(
                lines.iter().map(|l| l.as_bytes().to_vec()),
            ))),
            dispatcher: Dispatcher::new(2),
            layout: Layout::new(40, 12),
        }
    }

    fn key(&mut self, key: KeyEvent) {
        self.dispatcher.handle_key(&mut self.model, &key, &self.layout);
        self.model.scroll(&self.layout, 0);
    }

    fn code(&mut self, code: KeyCode) {
        self.key(KeyEvent::plain(code));
    }

    fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '\n' => self.code(KeyCode::Enter),
                '\t' => self.code(KeyCode::Tab),
                c => self.code(KeyCode::Char(c)),
            }
        }
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.model.state().buffer().to_bytes()).into_owned()
    }
}

#[test]
fn typing_into_an_empty_buffer() {
    let mut s = Session::new(&[]);
    s.type_str("int main\n{\treturn 0;\n}");
    assert_eq!(s.text(), "int main\n{\treturn 0;\n}\n");
    assert_eq!(s.model.view().cursor, Position::new(2, 1));
    assert!(s.model.state().buffer().is_dirty());
}

#[test]
fn backspace_across_lines_then_delete_forward() {
    let mut s = Session::new(&["ab", "cd"]);
    s.code(KeyCode::Down);
    s.code(KeyCode::Backspace);
    assert_eq!(s.text(), "abcd\n");
    assert_eq!(s.model.view().cursor, Position::new(0, 2));
    s.code(KeyCode::Delete);
    assert_eq!(s.text(), "abd\n");
    s.key(KeyEvent::ctrl('h'));
    assert_eq!(s.text(), "ad\n");
    assert_eq!(s.model.view().cursor, Position::new(0, 1));
}

#[test]
fn tab_moves_rendered_column() {
    let mut s = Session::new(&[""]);
    s.type_str("\tx");
    assert_eq!(s.model.view().cursor, Position::new(0, 2));
    assert_eq!(s.model.view().rx, 9);
}

#[test]
fn opening_a_comment_recolours_following_lines() {
    let mut s = Session::new(&["a", "b", "c"]);
    s.model.state_mut().bind_file("x.c");
    s.type_str("/*");
    let buffer = s.model.state().buffer();
    for line in 1..3 {
        assert_eq!(buffer.highlights(line).unwrap(), &[Highlight::MlComment]);
    }
    s.code(KeyCode::End);
    s.type_str("*/");
    let buffer = s.model.state().buffer();
    assert_eq!(buffer.highlights(1).unwrap(), &[Highlight::Normal]);
}

#[test]
fn page_down_scrolls_the_view() {
    let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut s = Session::new(&refs);
    s.code(KeyCode::PageDown);
    // Ten text rows: bottom of screen is line 9, then ten more.
    assert_eq!(s.model.view().cursor.line, 19);
    assert_eq!(s.model.view().row_offset, 10);
    s.code(KeyCode::PageUp);
    assert_eq!(s.model.view().cursor.line, 0);
}
