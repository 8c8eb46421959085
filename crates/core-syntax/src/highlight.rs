//! Single-line highlight scan.

use crate::{Highlight, Syntax, SyntaxFlags};

/// Classes for one rendered line plus the block-comment state it ends in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineHighlight {
    pub classes: Vec<Highlight>,
    pub open_comment: bool,
}

/// Whitespace, NUL, or one of `,.()+-/*=~%<>[];`.
pub fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c | 0)
        || b",.()+-/*=~%<>[];".contains(&b)
}

/// Classify every byte of `render` under `syntax`.
///
/// `starts_in_comment` is the predecessor line's `open_comment`. With no syntax
/// the line is uniformly `Normal` and never leaves a comment open.
pub fn highlight_line(
    render: &[u8],
    syntax: Option<&Syntax>,
    starts_in_comment: bool,
) -> LineHighlight {
    let mut classes = vec![Highlight::Normal; render.len()];
    let Some(syntax) = syntax else {
        return LineHighlight {
            classes,
            open_comment: false,
        };
    };

    let scs = syntax.single_line_comment.map(str::as_bytes);
    let block = syntax
        .block_comment
        .map(|(start, end)| (start.as_bytes(), end.as_bytes()))
        .filter(|(start, end)| !start.is_empty() && !end.is_empty());
    let strings = syntax.flags.contains(SyntaxFlags::HIGHLIGHT_STRINGS);
    let numbers = syntax.flags.contains(SyntaxFlags::HIGHLIGHT_NUMBERS);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment && block.is_some();

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let rest = &render[i..];
        let prev_hl = if i > 0 {
            classes[i - 1]
        } else {
            Highlight::Normal
        };

        if let Some(scs) = scs
            && !scs.is_empty()
            && in_string.is_none()
            && !in_comment
            && rest.starts_with(scs)
        {
            classes[i..].fill(Highlight::Comment);
            break;
        }

        if let Some((start, end)) = block
            && in_string.is_none()
        {
            if in_comment {
                if rest.starts_with(end) {
                    classes[i..i + end.len()].fill(Highlight::MlComment);
                    i += end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    classes[i] = Highlight::MlComment;
                    i += 1;
                }
                continue;
            } else if rest.starts_with(start) {
                classes[i..i + start.len()].fill(Highlight::MlComment);
                i += start.len();
                in_comment = true;
                continue;
            }
        }

        if strings {
            if let Some(quote) = in_string {
                classes[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    classes[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if syntax.string_quotes.contains(&c) {
                in_string = Some(c);
                classes[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            classes[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = longest_keyword(rest, syntax) {
            classes[i..i + len].fill(class);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    LineHighlight {
        classes,
        open_comment: in_comment,
    }
}

/// Longest keyword that prefixes `rest` and is followed by a separator or end of line.
fn longest_keyword(rest: &[u8], syntax: &Syntax) -> Option<(usize, Highlight)> {
    syntax
        .keywords
        .iter()
        .filter(|kw| {
            let k = kw.text.as_bytes();
            !k.is_empty()
                && rest.starts_with(k)
                && rest.get(k.len()).is_none_or(|&b| is_separator(b))
        })
        .max_by_key(|kw| kw.text.len())
        .map(|kw| (kw.text.len(), kw.class.highlight()))
}
