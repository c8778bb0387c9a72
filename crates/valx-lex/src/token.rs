//! Token kinds produced by the scanner.

/// A single lexical token.
///
/// The scanner never assembles multi-character operators itself: any
/// printable character that isn't part of an identifier, number, string or
/// raw string comes back as a bare [`Token::Symbol`]. Grouping symbol runs
/// into operator lexemes (`==`, `<<`, `=~`, ...) is the parser's job, driven
/// by which lexemes a [`Language`](https://docs.rs/valx-par) actually
/// registers.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A name: `foo`, `_bar`, `düü`.
    Ident(String),
    /// A decimal or hex integer literal, raw text (e.g. `"0x1F"`, `"42"`).
    Int(String),
    /// A decimal float literal with optional exponent, raw text.
    Float(String),
    /// A double- or single-quoted string, already escape-processed.
    Str(String),
    /// A back-quoted raw string; no escape processing.
    RawStr(String),
    /// Any other printable rune: operator characters, punctuation.
    Symbol(char),
    /// End of input.
    Eof,
}

impl Token {
    /// A short, human-readable name used in scanner/parser error messages
    /// (`unexpected <this> while scanning ...`).
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(s) => format!("identifier {s:?}"),
            Token::Int(s) => format!("integer {s:?}"),
            Token::Float(s) => format!("float {s:?}"),
            Token::Str(s) => format!("string {s:?}"),
            Token::RawStr(s) => format!("raw string {s:?}"),
            Token::Symbol(c) => format!("{c:?}"),
            Token::Eof => "end of input".to_string(),
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}
