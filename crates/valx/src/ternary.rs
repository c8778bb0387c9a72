//! Ternary `cond ? a : b` (and the two-argument `cond ? a` form, `Null`
//! when falsy) and null-coalesce `a ?? b`. Both are registered as postfix
//! operators at the lowest precedence so the whole preceding infix chain
//! reduces into their left operand first, and both right-associate simply
//! by recursively re-entering `parse_expression` for their own operand(s)
//! (§4.2, §9 Design Notes).

use valx_par::{Language, OperatorEntry};

pub const PREC_TERNARY: u8 = 1;

pub fn language() -> Language {
    Language::new()
        .with_operator(
            "?",
            OperatorEntry {
                precedence: Some(PREC_TERNARY),
                right_associative: true,
                postfix: Some(std::sync::Arc::new(valx_par::postfix::ternary)),
                ..Default::default()
            },
        )
        .with_operator(
            "??",
            OperatorEntry {
                precedence: Some(PREC_TERNARY),
                right_associative: true,
                postfix: Some(std::sync::Arc::new(valx_par::postfix::null_coalesce)),
                ..Default::default()
            },
        )
}
