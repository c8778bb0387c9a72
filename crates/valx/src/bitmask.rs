//! Bitmask dialect: `& | ^ << >>` truncated to `i64`, unary `~` (§4.2).
//! `<<`/`>>` sit strictly between `+` (additive) and `<` (comparison), per
//! the precedence-ordering testable property.

use std::sync::Arc;

use valx_eval::{EvalError, Evaluable, Value};
use valx_par::{Language, OperatorEntry};

pub const PREC_OR: u8 = 6;
pub const PREC_XOR: u8 = 7;
pub const PREC_AND: u8 = 8;
pub const PREC_SHIFT: u8 = 9;

fn as_i64(v: f64) -> i64 {
    v as i64
}

pub fn language() -> Language {
    Language::new()
        .with_operator(
            "|",
            OperatorEntry {
                precedence: Some(PREC_OR),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number((as_i64(a) | as_i64(b)) as f64)))),
                ..Default::default()
            },
        )
        .with_operator(
            "^",
            OperatorEntry {
                precedence: Some(PREC_XOR),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number((as_i64(a) ^ as_i64(b)) as f64)))),
                ..Default::default()
            },
        )
        .with_operator(
            "&",
            OperatorEntry {
                precedence: Some(PREC_AND),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number((as_i64(a) & as_i64(b)) as f64)))),
                ..Default::default()
            },
        )
        .with_operator(
            "<<",
            OperatorEntry {
                precedence: Some(PREC_SHIFT),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number((as_i64(a) << (as_i64(b) & 63)) as f64)))),
                ..Default::default()
            },
        )
        .with_operator(
            ">>",
            OperatorEntry {
                precedence: Some(PREC_SHIFT),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number((as_i64(a) >> (as_i64(b) & 63)) as f64)))),
                ..Default::default()
            },
        )
        .with_prefix_rune('~', Arc::new(unary_complement))
}

fn unary_complement(parser: &mut valx_par::Parser) -> Result<Evaluable, valx_par::ParseError> {
    let operand = parser.parse_next_expression()?;
    Ok(Evaluable::new(operand.is_constant(), move |ctx, vars| {
        let v = operand.eval(ctx, vars)?;
        let n = v
            .to_number()
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "unary ~", "number"))?;
        Ok(Value::Number(!as_i64(n) as f64))
    }))
}
