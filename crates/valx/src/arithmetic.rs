//! Arithmetic dialect: `+ - * / % **`, unary `-`/`+` (§4.2, §8 seed
//! scenario `5+10*2` -> `25.0`).
//!
//! `+` also concatenates when either operand isn't purely numeric: the
//! text builder's "both operands coerce to display string" requirement
//! already covers the `"foo" + 123 + "bar" + true` -> `"foo123bartrue"`
//! scenario without a separate stringify-overload, since every scalar
//! (`Null`/`Bool`/`Number`/`String`) has a defined `to_display_string`.

use std::sync::Arc;

use valx_eval::{EvalError, Evaluable, Value};
use valx_par::{Language, OperatorEntry};

pub const PREC_ADDITIVE: u8 = 10;
pub const PREC_MULTIPLICATIVE: u8 = 11;
pub const PREC_POWER: u8 = 12;

pub fn language() -> Language {
    Language::new()
        .with_operator(
            "+",
            OperatorEntry {
                precedence: Some(PREC_ADDITIVE),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a + b)))),
                text: Some(Arc::new(|_ctx, a, b| Ok(Value::string(format!("{a}{b}"))))),
                ..Default::default()
            },
        )
        .with_operator(
            "-",
            OperatorEntry {
                precedence: Some(PREC_ADDITIVE),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a - b)))),
                ..Default::default()
            },
        )
        .with_operator(
            "*",
            OperatorEntry {
                precedence: Some(PREC_MULTIPLICATIVE),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a * b)))),
                ..Default::default()
            },
        )
        .with_operator(
            "/",
            OperatorEntry {
                precedence: Some(PREC_MULTIPLICATIVE),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a / b)))),
                ..Default::default()
            },
        )
        .with_operator(
            "%",
            OperatorEntry {
                precedence: Some(PREC_MULTIPLICATIVE),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a % b)))),
                ..Default::default()
            },
        )
        .with_operator(
            "**",
            OperatorEntry {
                precedence: Some(PREC_POWER),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a.powf(b))))),
                ..Default::default()
            },
        )
        .with_prefix_rune('-', Arc::new(unary_minus))
        .with_prefix_rune('+', Arc::new(unary_plus))
}

fn unary_minus(parser: &mut valx_par::Parser) -> Result<Evaluable, valx_par::ParseError> {
    let operand = parser.parse_next_expression()?;
    Ok(Evaluable::new(operand.is_constant(), move |ctx, vars| {
        let v = operand.eval(ctx, vars)?;
        let n = v
            .to_number()
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "unary -", "number"))?;
        Ok(Value::Number(-n))
    }))
}

fn unary_plus(parser: &mut valx_par::Parser) -> Result<Evaluable, valx_par::ParseError> {
    let operand = parser.parse_next_expression()?;
    Ok(Evaluable::new(operand.is_constant(), move |ctx, vars| {
        let v = operand.eval(ctx, vars)?;
        v.to_number()
            .map(Value::Number)
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "unary +", "number"))
    }))
}
