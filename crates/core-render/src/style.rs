//! Highlight class to terminal colour.

use core_syntax::Highlight;
use crossterm::style::Color;

/// Foreground colour for `hl`. `Normal` maps to the terminal default.
pub fn highlight_color(hl: Highlight) -> Color {
    match hl {
        Highlight::Normal => Color::Reset,
        Highlight::Comment | Highlight::MlComment => Color::DarkCyan,
        Highlight::Keyword1 => Color::DarkYellow,
        Highlight::Keyword2 => Color::DarkGreen,
        Highlight::String => Color::DarkMagenta,
        Highlight::Number => Color::DarkRed,
        Highlight::Match => Color::DarkBlue,
    }
}

/// Glyph drawn (in reverse video) for a control byte, or `None` for anything printable.
pub fn control_glyph(b: u8) -> Option<u8> {
    match b {
        0..=26 => Some(b'@' + b),
        27..=31 | 127 => Some(b'?'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_kinds_share_a_colour() {
        assert_eq!(
            highlight_color(Highlight::Comment),
            highlight_color(Highlight::MlComment)
        );
        assert_eq!(highlight_color(Highlight::Normal), Color::Reset);
        assert_eq!(highlight_color(Highlight::Match), Color::DarkBlue);
    }

    #[test]
    fn control_bytes_get_caret_style_glyphs() {
        assert_eq!(control_glyph(0), Some(b'@'));
        assert_eq!(control_glyph(1), Some(b'A'));
        assert_eq!(control_glyph(26), Some(b'Z'));
        assert_eq!(control_glyph(27), Some(b'?'));
        assert_eq!(control_glyph(127), Some(b'?'));
        assert_eq!(control_glyph(b'a'), None);
        assert_eq!(control_glyph(b' '), None);
        assert_eq!(control_glyph(200), None);
    }
}
