//! PropositionalLogic dialect: short-circuiting `&& ||`, unary `!` (§4.2,
//! §8 seed scenario `true||fail()` -> `true` without evaluating `fail()`).

use std::sync::Arc;

use valx_eval::{EvalError, Evaluable, Value};
use valx_par::{Language, OperatorEntry};

pub const PREC_OR: u8 = 2;
pub const PREC_AND: u8 = 3;

pub fn language() -> Language {
    Language::new()
        .with_operator(
            "&&",
            OperatorEntry {
                precedence: Some(PREC_AND),
                short_circuit: Some(Arc::new(|l| match l.to_bool() {
                    Some(false) => Some(Value::Bool(false)),
                    _ => None,
                })),
                boolean: Some(Arc::new(|_ctx, a, b| Ok(Value::Bool(a && b)))),
                ..Default::default()
            },
        )
        .with_operator(
            "||",
            OperatorEntry {
                precedence: Some(PREC_OR),
                short_circuit: Some(Arc::new(|l| match l.to_bool() {
                    Some(true) => Some(Value::Bool(true)),
                    _ => None,
                })),
                boolean: Some(Arc::new(|_ctx, a, b| Ok(Value::Bool(a || b)))),
                ..Default::default()
            },
        )
        .with_prefix_rune('!', Arc::new(unary_not))
}

fn unary_not(parser: &mut valx_par::Parser) -> Result<Evaluable, valx_par::ParseError> {
    let operand = parser.parse_next_expression()?;
    Ok(Evaluable::new(operand.is_constant(), move |ctx, vars| {
        let v = operand.eval(ctx, vars)?;
        v.to_bool()
            .map(|b| Value::Bool(!b))
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "unary !", "bool"))
    }))
}
