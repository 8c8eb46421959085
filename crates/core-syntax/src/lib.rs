//! Syntax classification for rendered lines.
//!
//! Three pieces live here:
//! * `Highlight`: the closed set of per-byte classes a rendered line carries.
//! * `Syntax` + `HLDB`: the compiled-in rule table, selected by file name once per
//!   load (or save-as) and held for the session.
//! * `highlight_line`: the single left-to-right scan that classifies one line
//!   given the block-comment state carried in from its predecessor.
//!
//! Invariants:
//! * `highlight_line` is pure: identical render bytes, rule set and carried-in
//!   comment state always yield identical classes.
//! * The returned class vector has exactly one entry per input byte.
//! * Cross-line propagation is NOT performed here; the buffer owns the work-list
//!   that re-runs this scan on successors when `open_comment` flips.

use bitflags::bitflags;

mod highlight;
mod rules;

pub use highlight::{LineHighlight, highlight_line, is_separator};
pub use rules::HLDB;

/// Per-byte highlight class. Classes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    /// Single-line comment (marker to end of line).
    Comment,
    /// Block comment span, possibly continuing from a previous line.
    MlComment,
    Keyword1,
    Keyword2,
    String,
    Number,
    /// Transient search overlay.
    Match,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyntaxFlags: u8 {
        const HIGHLIGHT_NUMBERS = 0b0000_0001;
        const HIGHLIGHT_STRINGS = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    Primary,
    Secondary,
}

impl KeywordClass {
    pub fn highlight(self) -> Highlight {
        match self {
            KeywordClass::Primary => Highlight::Keyword1,
            KeywordClass::Secondary => Highlight::Keyword2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub text: &'static str,
    pub class: KeywordClass,
}

impl Keyword {
    pub const fn primary(text: &'static str) -> Self {
        Self {
            text,
            class: KeywordClass::Primary,
        }
    }
    pub const fn secondary(text: &'static str) -> Self {
        Self {
            text,
            class: KeywordClass::Secondary,
        }
    }
}

/// Immutable rule set for one file type.
#[derive(Debug)]
pub struct Syntax {
    /// Display name surfaced in the status bar.
    pub file_type: &'static str,
    /// Entries starting with `.` match the extension exactly; anything else
    /// matches as a substring of the file name.
    pub file_match: &'static [&'static str],
    pub keywords: &'static [Keyword],
    pub single_line_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Bytes that open a string under `HIGHLIGHT_STRINGS`; the same byte closes it.
    pub string_quotes: &'static [u8],
    pub flags: SyntaxFlags,
}

impl Syntax {
    fn matches(&self, file_name: &str, ext: Option<&str>) -> bool {
        self.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                file_name.contains(pattern)
            }
        })
    }
}

/// Pick the rule set for `file_name` from the built-in table.
///
/// The extension is everything from the last `.` onward (including the dot).
/// Returns `None` when nothing matches; that is the "no highlighting" state,
/// not an error.
pub fn select_syntax(file_name: &str) -> Option<&'static Syntax> {
    let ext = file_name.rfind('.').map(|i| &file_name[i..]);
    let found = HLDB.iter().find(|s| s.matches(file_name, ext));
    tracing::debug!(
        target: "syntax",
        file_name,
        file_type = found.map(|s| s.file_type),
        "select_syntax"
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_c_by_extension() {
        let s = select_syntax("main.c").expect("c syntax");
        assert_eq!(s.file_type, "c");
        assert_eq!(select_syntax("include/x.h").unwrap().file_type, "c");
        assert_eq!(select_syntax("a.cpp").unwrap().file_type, "c");
    }

    #[test]
    fn extension_is_taken_from_last_dot() {
        assert!(select_syntax("archive.c.bak").is_none());
        assert_eq!(select_syntax("lib.tar.rs").unwrap().file_type, "rust");
    }

    #[test]
    fn unknown_extension_has_no_syntax() {
        assert!(select_syntax("notes.txt").is_none());
        assert!(select_syntax("Makefile").is_none());
    }

    #[test]
    fn substring_patterns_match_anywhere_in_name() {
        static SUBSTRING: Syntax = Syntax {
            file_type: "make",
            file_match: &["Makefile"],
            keywords: &[],
            single_line_comment: Some("#"),
            block_comment: None,
            string_quotes: b"",
            flags: SyntaxFlags::empty(),
        };
        assert!(SUBSTRING.matches("src/Makefile.am", Some(".am")));
        assert!(!SUBSTRING.matches("makefile", None));
    }

    #[test]
    fn keyword_class_maps_to_highlight() {
        assert_eq!(KeywordClass::Primary.highlight(), Highlight::Keyword1);
        assert_eq!(KeywordClass::Secondary.highlight(), Highlight::Keyword2);
    }
}
