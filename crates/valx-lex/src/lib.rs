//! valx-lex - lexical scanning for valx expressions.
//!
//! This crate is intentionally small: it knows how to turn a `&str` into a
//! stream of [`Token`]s (identifiers, numbers, quoted/raw strings, and
//! single-rune symbols) with one-token and one-rune lookahead. It knows
//! nothing about operators, precedence, or what a registered lexeme looks
//! like — that belongs to `valx-par`, which is the only crate that
//! understands a Language.

pub mod cursor;
pub mod scanner;
pub mod token;

pub use cursor::Cursor;
pub use scanner::{mode, DefaultScanner, IdentRuneFn, ScanError, Scanner, DEFAULT_WHITESPACE};
pub use token::Token;
