//! Editor state: the single buffer, its file binding, and the transient status message.
//!
//! Presentation lives in `core-render::status`; this crate only stores what the
//! status and message bars show. Cursor and scroll offsets belong to
//! `core-model::View`.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use core_syntax::select_syntax;
use core_text::Buffer;

/// Default lifetime of a status message.
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Ephemeral status message container.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl EphemeralMessage {
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug)]
pub struct EditorState {
    buffer: Buffer,
    pub file_name: Option<PathBuf>,
    pub ephemeral_status: Option<EphemeralMessage>,
    message_ttl: Duration,
}

impl EditorState {
    /// Wrap `buffer`, unbound to any file.
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            file_name: None,
            ephemeral_status: None,
            message_ttl: DEFAULT_MESSAGE_TTL,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// All text mutations flow through this accessor.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn set_message_ttl(&mut self, ttl: Duration) {
        self.message_ttl = ttl;
    }

    /// Bind the session to `path` and pick highlighting rules from its name.
    /// The whole buffer is re-highlighted under the new rules.
    pub fn bind_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let syntax = select_syntax(&path.to_string_lossy());
        tracing::debug!(target: "state", path = %path.display(), file_type = syntax.map(|s| s.file_type), "bind_file");
        self.buffer.set_syntax(syntax);
        self.file_name = Some(path);
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Name shown in the status bar, `[No Name]` when unbound.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_deref()
            .map_or_else(|| "[No Name]".to_string(), |p| p.to_string_lossy().into_owned())
    }

    /// File type shown in the status bar, `no ft` without rules.
    pub fn file_type(&self) -> &'static str {
        self.buffer.syntax().map_or("no ft", |s| s.file_type)
    }

    /// Set an ephemeral status message with the session's timeout.
    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.set_ephemeral(msg, self.message_ttl);
    }

    /// Set an ephemeral status message with a fixed timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    /// Tick ephemeral status; returns true if message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        self.tick_ephemeral_at(Instant::now())
    }

    pub fn tick_ephemeral_at(&mut self, now: Instant) -> bool {
        if let Some(m) = &self.ephemeral_status
            && !m.is_live(now)
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }

    /// Text of the current message if it has not expired.
    pub fn status_text(&self, now: Instant) -> Option<&str> {
        self.ephemeral_status
            .as_ref()
            .filter(|m| m.is_live(now))
            .map(|m| m.text.as_str())
    }
}
