//! Built-in rule table. Adding a language means adding one entry here.

use crate::{Keyword, Syntax, SyntaxFlags};

const C_KEYWORDS: &[Keyword] = &[
    Keyword::primary("switch"),
    Keyword::primary("if"),
    Keyword::primary("while"),
    Keyword::primary("for"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("else"),
    Keyword::primary("struct"),
    Keyword::primary("union"),
    Keyword::primary("typedef"),
    Keyword::primary("static"),
    Keyword::primary("enum"),
    Keyword::primary("class"),
    Keyword::primary("case"),
    Keyword::secondary("int"),
    Keyword::secondary("long"),
    Keyword::secondary("double"),
    Keyword::secondary("float"),
    Keyword::secondary("char"),
    Keyword::secondary("unsigned"),
    Keyword::secondary("signed"),
    Keyword::secondary("void"),
];

const RUST_KEYWORDS: &[Keyword] = &[
    Keyword::primary("as"),
    Keyword::primary("break"),
    Keyword::primary("const"),
    Keyword::primary("continue"),
    Keyword::primary("crate"),
    Keyword::primary("else"),
    Keyword::primary("enum"),
    Keyword::primary("extern"),
    Keyword::primary("fn"),
    Keyword::primary("for"),
    Keyword::primary("if"),
    Keyword::primary("impl"),
    Keyword::primary("in"),
    Keyword::primary("let"),
    Keyword::primary("loop"),
    Keyword::primary("match"),
    Keyword::primary("mod"),
    Keyword::primary("move"),
    Keyword::primary("mut"),
    Keyword::primary("pub"),
    Keyword::primary("ref"),
    Keyword::primary("return"),
    Keyword::primary("static"),
    Keyword::primary("struct"),
    Keyword::primary("trait"),
    Keyword::primary("type"),
    Keyword::primary("unsafe"),
    Keyword::primary("use"),
    Keyword::primary("where"),
    Keyword::primary("while"),
    Keyword::secondary("bool"),
    Keyword::secondary("char"),
    Keyword::secondary("i8"),
    Keyword::secondary("i16"),
    Keyword::secondary("i32"),
    Keyword::secondary("i64"),
    Keyword::secondary("i128"),
    Keyword::secondary("isize"),
    Keyword::secondary("u8"),
    Keyword::secondary("u16"),
    Keyword::secondary("u32"),
    Keyword::secondary("u64"),
    Keyword::secondary("u128"),
    Keyword::secondary("usize"),
    Keyword::secondary("f32"),
    Keyword::secondary("f64"),
    Keyword::secondary("str"),
    Keyword::secondary("String"),
    Keyword::secondary("Self"),
    Keyword::secondary("self"),
    Keyword::secondary("Vec"),
    Keyword::secondary("Option"),
    Keyword::secondary("Result"),
];

/// Highlight database, searched in order by `select_syntax`.
pub static HLDB: &[Syntax] = &[
    Syntax {
        file_type: "c",
        file_match: &[".c", ".h", ".cpp"],
        keywords: C_KEYWORDS,
        single_line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        string_quotes: b"\"'",
        flags: SyntaxFlags::HIGHLIGHT_NUMBERS.union(SyntaxFlags::HIGHLIGHT_STRINGS),
    },
    Syntax {
        file_type: "rust",
        file_match: &[".rs"],
        keywords: RUST_KEYWORDS,
        single_line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        // `'` also starts lifetimes and labels.
        string_quotes: b"\"",
        flags: SyntaxFlags::HIGHLIGHT_NUMBERS.union(SyntaxFlags::HIGHLIGHT_STRINGS),
    },
];
