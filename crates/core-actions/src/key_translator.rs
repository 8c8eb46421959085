//! KeyEvent -> Action mapping.
//!
//! The table is flat: there are no modes and no multi-key sequences. Keys
//! that map to nothing return `None` and the dispatcher ignores them.

use crate::{Action, EditKind, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return translate_ctrl(key);
    }
    let action = match key.code {
        KeyCode::Enter => Action::Edit(EditKind::InsertNewline),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::DeleteForward),
        KeyCode::Tab => Action::Edit(EditKind::InsertByte(b'\t')),
        KeyCode::Esc => Action::Noop,
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Home => Action::Motion(MotionKind::LineStart),
        KeyCode::End => Action::Motion(MotionKind::LineEnd),
        KeyCode::PageUp => Action::Motion(MotionKind::PageUp),
        KeyCode::PageDown => Action::Motion(MotionKind::PageDown),
        KeyCode::Char(_) if key.mods.contains(KeyModifiers::ALT) => return None,
        KeyCode::Char(c) => {
            return printable_byte(c).map(|b| Action::Edit(EditKind::InsertByte(b)));
        }
    };
    Some(action)
}

fn translate_ctrl(key: &KeyEvent) -> Option<Action> {
    if key.mods.intersects(KeyModifiers::ALT) {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    match c.to_ascii_lowercase() {
        'q' => Some(Action::Quit),
        's' => Some(Action::Save),
        'f' => Some(Action::Find),
        'h' => Some(Action::Edit(EditKind::Backspace)),
        'l' => Some(Action::Noop),
        _ => None,
    }
}

/// Printable ASCII (space through tilde) as a byte.
pub(crate) fn printable_byte(c: char) -> Option<u8> {
    u8::try_from(c).ok().filter(|b| (b' '..=b'~').contains(b))
}
