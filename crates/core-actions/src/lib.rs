//! Key handling for the editor: keys become `Action`s, the dispatcher applies
//! them to an `EditorModel`.
//!
//! * `key_translator` maps a `KeyEvent` to an `Action`.
//! * `dispatcher` owns the cross-key state (quit confirmation, the active
//!   prompt, the search controller) and routes actions to the edit and
//!   motion handlers.
//! * `search` implements incremental find with a temporary match overlay.
//! * `io_ops` loads and saves buffers.

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
pub mod prompt;
pub mod search;

pub use dispatcher::{DispatchResult, Dispatcher, HELP_MESSAGE};
pub use io_ops::{IoError, open_file, write_file};
pub use key_translator::translate_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertByte(u8),
    InsertNewline,
    /// Delete the byte before the cursor, joining lines at column 0.
    Backspace,
    /// Delete the byte under the cursor.
    DeleteForward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Save,
    Find,
    Quit,
    /// Recognised key with no effect (Esc, Ctrl-L).
    Noop,
}
