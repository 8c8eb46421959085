//! Configuration loading and parsing.
//!
//! The file is read only when the binary is given `--config <path>`; there is
//! no discovery. Recognized keys:
//!
//! ```toml
//! [editor]
//! tab_stop = 8
//! quit_times = 2
//!
//! [status]
//! message_timeout_secs = 5
//!
//! [scroll.margin]
//! vertical = 0
//! ```
//!
//! Unknown fields are ignored. A missing or unparsable file falls back to the
//! defaults with a warning. The vertical margin is clamped at `(h - 2) / 2`
//! where `h` is the current text height supplied through `apply_context`; the
//! raw parsed value is retained so a resize can re-clamp.

use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_columns: u16,
    pub viewport_rows: u16,
    /// Rows below the text area (status bar + message bar).
    pub bar_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_columns: u16, viewport_rows: u16, bar_rows: u16) -> Self {
        Self {
            viewport_columns,
            viewport_rows,
            bar_rows,
        }
    }

    pub fn text_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(self.bar_rows)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        8
    }
    const fn default_quit_times() -> u32 {
        2
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl StatusConfig {
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct MarginConfig {
    #[serde(default)]
    pub vertical: u16,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ScrollConfig {
    #[serde(default)]
    pub margin: MarginConfig,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>,        // file the values came from, if any
    pub file: ConfigFile,               // parsed (or default) data
    pub effective_vertical_margin: u16, // clamped to viewport semantics
}

/// Load from `path`, or return defaults when no path was given.
pub fn load_from(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_unreadable_using_defaults");
            return Ok(Config::default());
        }
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path.to_path_buf()),
                file,
                effective_vertical_margin: 0, // computed later
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Tab stop, never below one.
    pub fn tab_stop(&self) -> usize {
        self.file.editor.tab_stop.max(1)
    }

    /// Extra Ctrl-Q presses demanded while the buffer is dirty.
    pub fn quit_times(&self) -> u32 {
        self.file.editor.quit_times
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.status.message_timeout_secs)
    }

    /// Apply viewport context to compute clamped vertical margin.
    /// Returns the effective (possibly clamped) value.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.scroll.margin.vertical;
        let text_rows = ctx.text_rows();
        let (clamped, max) = if text_rows <= 3 {
            (0, 0)
        } else {
            let max = (text_rows.saturating_sub(2)) / 2; // (h - 2)/2 using text rows
            (raw.min(max), max)
        };

        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                text_rows,
                viewport_rows = ctx.viewport_rows,
                bar_rows = ctx.bar_rows,
                "scroll_margin_vertical_clamped"
            );
        }
        self.effective_vertical_margin = clamped;
        clamped
    }

    /// Recompute effective vertical margin on a viewport change. Returns
    /// `Some(new_margin)` when the effective value changed, else `None`.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u16> {
        let prev = self.effective_vertical_margin;
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }
}
