//! Single-line prompt shown in the message bar (find, save as).

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_model::View;

use crate::key_translator::printable_byte;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Find,
    SaveAs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing; `changed` is true when the text was modified.
    Pending { changed: bool },
    Submitted(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
    /// View at the moment the prompt opened, restored on cancel.
    saved_view: View,
}

impl Prompt {
    pub fn new(kind: PromptKind, view: &View) -> Self {
        Self {
            kind,
            input: String::new(),
            saved_view: view.clone(),
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn saved_view(&self) -> &View {
        &self.saved_view
    }

    /// Message bar text for the current input.
    pub fn message(&self) -> String {
        match self.kind {
            PromptKind::Find => format!("Search: {} (Use ESC/Arrows/Enter)", self.input),
            PromptKind::SaveAs => format!("Save as: {} (ESC to cancel)", self.input),
        }
    }

    /// Apply one key. Enter on an empty input keeps the prompt open.
    pub fn handle_key(&mut self, key: &KeyEvent) -> PromptOutcome {
        match key.code {
            KeyCode::Esc => PromptOutcome::Cancelled,
            KeyCode::Enter if !self.input.is_empty() => {
                PromptOutcome::Submitted(self.input.clone())
            }
            KeyCode::Backspace | KeyCode::Delete => PromptOutcome::Pending {
                changed: self.input.pop().is_some(),
            },
            _ if key.is_ctrl('h') => PromptOutcome::Pending {
                changed: self.input.pop().is_some(),
            },
            KeyCode::Char(c) if (key.mods - KeyModifiers::SHIFT).is_empty() => match printable_byte(c) {
                Some(b) => {
                    self.input.push(char::from(b));
                    PromptOutcome::Pending { changed: true }
                }
                None => PromptOutcome::Pending { changed: false },
            },
            _ => PromptOutcome::Pending { changed: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(p: &mut Prompt, s: &str) {
        for c in s.chars() {
            p.handle_key(&KeyEvent::plain(KeyCode::Char(c)));
        }
    }

    #[test]
    fn collects_printable_input() {
        let mut p = Prompt::new(PromptKind::Find, &View::default());
        typed(&mut p, "ab c");
        assert_eq!(p.input(), "ab c");
        assert_eq!(p.message(), "Search: ab c (Use ESC/Arrows/Enter)");
    }

    #[test]
    fn backspace_and_ctrl_h_pop() {
        let mut p = Prompt::new(PromptKind::SaveAs, &View::default());
        typed(&mut p, "xyz");
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Backspace)),
            PromptOutcome::Pending { changed: true }
        );
        p.handle_key(&KeyEvent::ctrl('h'));
        assert_eq!(p.input(), "x");
        assert_eq!(p.message(), "Save as: x (ESC to cancel)");
    }

    #[test]
    fn enter_needs_text() {
        let mut p = Prompt::new(PromptKind::SaveAs, &View::default());
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Enter)),
            PromptOutcome::Pending { changed: false }
        );
        typed(&mut p, "f.c");
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Enter)),
            PromptOutcome::Submitted("f.c".into())
        );
    }

    #[test]
    fn esc_cancels_and_arrows_change_nothing() {
        let mut p = Prompt::new(PromptKind::Find, &View::default());
        typed(&mut p, "q");
        assert_eq!(
            p.handle_key(&KeyEvent::plain(KeyCode::Down)),
            PromptOutcome::Pending { changed: false }
        );
        assert_eq!(p.handle_key(&KeyEvent::plain(KeyCode::Esc)), PromptOutcome::Cancelled);
    }
}
