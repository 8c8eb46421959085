//! Terminal writer: a `Frame` becomes an ordered command list, flushed once.
//!
//! Design invariants:
//! * Commands preserve ordering; nothing reaches the terminal until `flush_to`.
//! * All positions are absolute (0,0) origin; caller ensures bounds.
//! * Adjacent byte runs are merged so a row is usually one `Bytes` command.
//! * The cursor is hidden for the duration of a frame.

use anyhow::Result;
use core_syntax::Highlight;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

use crate::frame::{Frame, ScreenRow};
use crate::style::{control_glyph, highlight_color};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Bytes(Vec<u8>),
    Foreground(Color),
    Reverse(bool),
    HideCursor,
    ShowCursor,
}

#[derive(Default, Debug)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn print(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if let Some(Command::Bytes(last)) = self.cmds.last_mut() {
            last.extend_from_slice(bytes);
        } else {
            self.cmds.push(Command::Bytes(bytes.to_vec()));
        }
    }
    pub fn foreground(&mut self, color: Color) {
        self.cmds.push(Command::Foreground(color));
    }
    pub fn reverse(&mut self, on: bool) {
        self.cmds.push(Command::Reverse(on));
    }

    /// Highlighted text: colour changes only where the class changes, control
    /// bytes drawn inverted.
    pub fn text_row(&mut self, bytes: &[u8], classes: &[Highlight]) {
        let mut current = Color::Reset;
        for (i, &b) in bytes.iter().enumerate() {
            if let Some(glyph) = control_glyph(b) {
                self.reverse(true);
                self.print(&[glyph]);
                self.reverse(false);
                continue;
            }
            let color = highlight_color(classes.get(i).copied().unwrap_or_default());
            if color != current {
                self.foreground(color);
                current = color;
            }
            self.print(&[b]);
        }
        if current != Color::Reset {
            self.foreground(Color::Reset);
        }
    }

    /// Translate a whole frame. Text rows start at row 0; the two bars follow.
    pub fn frame(&mut self, frame: &Frame) {
        self.cmds.push(Command::HideCursor);
        let mut y: u16 = 0;
        for row in &frame.rows {
            self.move_to(0, y);
            self.clear_line();
            match row {
                ScreenRow::Text { bytes, classes } => self.text_row(bytes, classes),
                ScreenRow::Filler => self.print(b"~"),
                ScreenRow::Welcome(s) => self.print(s.as_bytes()),
            }
            y = y.saturating_add(1);
        }
        self.move_to(0, y);
        self.reverse(true);
        self.print(frame.status.as_bytes());
        self.reverse(false);
        self.move_to(0, y.saturating_add(1));
        self.clear_line();
        self.print(frame.message.as_bytes());
        self.move_to(frame.cursor.0, frame.cursor.1);
        self.cmds.push(Command::ShowCursor);
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::ClearLine => {
                    // Caller guarantees a preceding MoveTo(0, y) so the whole row is wiped.
                    queue!(out, Clear(ClearType::UntilNewLine))?;
                }
                Command::Bytes(b) => out.write_all(&b)?,
                Command::Foreground(color) => {
                    queue!(out, SetForegroundColor(color))?;
                }
                Command::Reverse(on) => {
                    let attr = if on {
                        Attribute::Reverse
                    } else {
                        Attribute::NoReverse
                    };
                    queue!(out, SetAttribute(attr))?;
                }
                Command::HideCursor => {
                    queue!(out, Hide)?;
                }
                Command::ShowCursor => {
                    queue!(out, Show)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn flush(self) -> Result<()> {
        self.flush_to(&mut stdout().lock())
    }
}

/// Write `frame` to stdout.
pub fn emit(frame: &Frame) -> Result<()> {
    let mut w = Writer::new();
    w.frame(frame);
    tracing::trace!(target: "render", commands = w.commands().len(), "emit");
    w.flush()
}
