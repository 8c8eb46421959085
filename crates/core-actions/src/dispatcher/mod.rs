//! Dispatcher applying keys and `Action`s to an `EditorModel`.
//!
//! Sub-modules:
//! * `motion` - cursor movement semantics
//! * `edit`   - text mutation (insert/backspace/delete/newline)
//!
//! Cross-key state lives on `Dispatcher`: the remaining quit confirmations,
//! the open prompt (if any) and the search controller driving find. While a
//! prompt is open every key goes to it; nothing reaches the action table.

use crate::io_ops;
use crate::prompt::{Prompt, PromptKind, PromptOutcome};
use crate::search::{SearchController, SearchInput};
use crate::{Action, translate_key};
use core_events::{KeyCode, KeyEvent};
use core_model::{EditorModel, Layout};
use core_state::EditorState;

mod edit;
mod motion;

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// Result of dispatching a single key or `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

#[derive(Debug)]
pub struct Dispatcher {
    quit_times: u32,
    quit_remaining: u32,
    prompt: Option<Prompt>,
    search: SearchController,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Dispatcher {
    /// `quit_times` extra Ctrl-Q presses are required to leave a dirty buffer.
    pub fn new(quit_times: u32) -> Self {
        Self {
            quit_times,
            quit_remaining: quit_times,
            prompt: None,
            search: SearchController::new(),
        }
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// Route one key: to the open prompt if there is one, otherwise through
    /// the action table.
    pub fn handle_key(&mut self, model: &mut EditorModel, key: &KeyEvent, layout: &Layout) -> DispatchResult {
        if let Some(prompt) = self.prompt.take() {
            self.quit_remaining = self.quit_times;
            return self.handle_prompt_key(model, prompt, key);
        }
        match translate_key(key) {
            Some(action) => self.dispatch(action, model, layout),
            None => {
                tracing::trace!(target: "actions.dispatch", code = ?key.code, mods = ?key.mods, "unbound key");
                self.quit_remaining = self.quit_times;
                DispatchResult::clean()
            }
        }
    }

    /// Apply an action. Returns whether a render is needed (`dirty`) or the
    /// editor should exit (`quit`).
    pub fn dispatch(&mut self, action: Action, model: &mut EditorModel, layout: &Layout) -> DispatchResult {
        if action != Action::Quit {
            self.quit_remaining = self.quit_times;
        }
        match action {
            Action::Motion(kind) => {
                let (state, view) = model.split_state_and_view();
                motion::handle_motion(kind, state.buffer(), view, layout.text_rows())
            }
            Action::Edit(kind) => {
                let (state, view) = model.split_state_and_view();
                edit::handle_edit(kind, state, view)
            }
            Action::Save => {
                if model.state().file_name().is_none() {
                    self.open_prompt(PromptKind::SaveAs, model)
                } else {
                    save(model.state_mut())
                }
            }
            Action::Find => self.open_prompt(PromptKind::Find, model),
            Action::Quit => self.quit(model.state_mut()),
            Action::Noop => DispatchResult::clean(),
        }
    }

    fn quit(&mut self, state: &mut EditorState) -> DispatchResult {
        if state.buffer().is_dirty() && self.quit_remaining > 0 {
            state.set_status(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                self.quit_remaining
            ));
            self.quit_remaining -= 1;
            tracing::debug!(target: "actions.dispatch", remaining = self.quit_remaining, "quit refused");
            return DispatchResult::dirty();
        }
        tracing::debug!(target: "actions.dispatch", "quit");
        DispatchResult::quit()
    }

    fn open_prompt(&mut self, kind: PromptKind, model: &mut EditorModel) -> DispatchResult {
        let prompt = Prompt::new(kind, model.view());
        model.state_mut().set_status(prompt.message());
        tracing::debug!(target: "actions.dispatch", ?kind, "prompt open");
        self.prompt = Some(prompt);
        DispatchResult::dirty()
    }

    fn handle_prompt_key(&mut self, model: &mut EditorModel, mut prompt: Prompt, key: &KeyEvent) -> DispatchResult {
        let outcome = prompt.handle_key(key);
        match (prompt.kind(), outcome) {
            (PromptKind::Find, PromptOutcome::Cancelled) => {
                self.search.on_input(model, prompt.input(), SearchInput::Cancel);
                *model.view_mut() = prompt.saved_view().clone();
                model.state_mut().set_status("");
            }
            (PromptKind::Find, PromptOutcome::Submitted(_)) => {
                self.search.on_input(model, prompt.input(), SearchInput::Confirm);
                model.state_mut().set_status("");
            }
            (PromptKind::Find, PromptOutcome::Pending { changed }) => {
                let input = match key.code {
                    KeyCode::Right | KeyCode::Down => Some(SearchInput::Next),
                    KeyCode::Left | KeyCode::Up => Some(SearchInput::Previous),
                    _ if changed => Some(SearchInput::Typed),
                    _ => None,
                };
                if let Some(input) = input {
                    self.search.on_input(model, prompt.input(), input);
                }
                model.state_mut().set_status(prompt.message());
                self.prompt = Some(prompt);
            }
            (PromptKind::SaveAs, PromptOutcome::Cancelled) => {
                model.state_mut().set_status("Save aborted");
            }
            (PromptKind::SaveAs, PromptOutcome::Submitted(name)) => {
                let state = model.state_mut();
                state.bind_file(name);
                return save(state);
            }
            (PromptKind::SaveAs, PromptOutcome::Pending { .. }) => {
                model.state_mut().set_status(prompt.message());
                self.prompt = Some(prompt);
            }
        }
        DispatchResult::dirty()
    }
}

fn save(state: &mut EditorState) -> DispatchResult {
    match io_ops::write_file(state) {
        Ok(n) => state.set_status(format!("{n} bytes written to disk")),
        Err(e) => state.set_status(format!("Can't save! I/O error: {e}")),
    }
    DispatchResult::dirty()
}
