//! The Base language (§4.2): identifier, number, string, raw-string and
//! parenthesised-grouping parsing are all built directly into
//! [`valx_par::Parser`]'s prefix phase, so `Base` itself only needs to
//! register the generic postfix capabilities that let subscripting and
//! calling apply to *any* expression, not only a bare variable path
//! (`(a + b)[0]`, `lookup("f")()`).

use valx_par::{Language, OperatorEntry};

/// Precedence high enough that `reduce` never folds in a pending infix
/// stage before a postfix `[`/`(` applies to its immediate left operand
/// (§4.3 stage-stack discipline).
pub const POSTFIX_PRECEDENCE: u8 = 200;

pub fn language() -> Language {
    Language::new()
        .with_operator(
            "[",
            OperatorEntry {
                precedence: Some(POSTFIX_PRECEDENCE),
                postfix: Some(std::sync::Arc::new(valx_par::postfix::subscript)),
                ..Default::default()
            },
        )
        .with_operator(
            "(",
            OperatorEntry {
                precedence: Some(POSTFIX_PRECEDENCE),
                postfix: Some(std::sync::Arc::new(valx_par::postfix::call)),
                ..Default::default()
            },
        )
}
