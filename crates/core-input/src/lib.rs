//! Blocking input reader: crossterm events in, normalized `InputEvent`s out.

use anyhow::Result;
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKind,
    KeyModifiers as CMods,
};

/// Block until the terminal delivers an event we understand.
pub fn read_input() -> Result<InputEvent> {
    loop {
        let raw = crossterm::event::read()?;
        if let Some(ev) = translate_event(&raw) {
            return Ok(ev);
        }
    }
}

/// Map a crossterm event; `None` for anything the editor ignores (mouse,
/// focus, paste, key releases).
pub fn translate_event(event: &CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(key) => translate_key(key).map(InputEvent::Key),
        CEvent::Resize(cols, rows) => {
            tracing::debug!(target: "input.resize", cols, rows, "resize");
            Some(InputEvent::Resize(*cols, *rows))
        }
        _ => None,
    }
}

pub fn translate_key(key: &CKeyEvent) -> Option<KeyEvent> {
    if key.kind == CKind::Release {
        return None;
    }
    let code = map_key_code(&key.code)?;
    let mods = map_mods(key.modifiers);
    let code = match code {
        KeyCode::Char(c) if mods.contains(KeyModifiers::CTRL) => {
            KeyCode::Char(c.to_ascii_lowercase())
        }
        other => other,
    };
    tracing::trace!(target: "input.key", code = ?code, mods = ?mods, "key");
    Some(KeyEvent { code, mods })
}

pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let mapped = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(mapped)
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}
