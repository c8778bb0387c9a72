//! Postfix operators: handlers that consume the parser directly instead of
//! being handed an already-parsed right operand (§4.3 Infix phase, §9 Design
//! Notes: "ternary, subscripting, and the pipe operator are registered as
//! postfix operators that re-enter `parse_expression` with a modified
//! context").

use std::sync::Arc;

use valx_eval::{EvalError, Evaluable, Value};

use crate::parser::Parser;
use crate::ParseError;

/// `(parser, left, precedence) -> new left`. Receives the reduced left
/// operand and must consume whatever trailing syntax the operator owns
/// (e.g. `[`...`]`, `(`...`)`, `? a : b`) before returning.
pub type PostfixFn = Arc<dyn Fn(&mut Parser, Evaluable, u8) -> Result<Evaluable, ParseError> + Send + Sync>;

/// `base[index]` — works on any expression, not only bare variable paths.
pub fn subscript(parser: &mut Parser, base: Evaluable, _precedence: u8) -> Result<Evaluable, ParseError> {
    let index = parser.parse_expression()?;
    parser.expect_symbol(']')?;
    Ok(Evaluable::new(base.is_constant() && index.is_constant(), move |ctx, vars| {
        let base_v = base.eval(ctx, vars)?;
        let index_v = index.eval(ctx, vars)?;
        crate::path::index_value(&base_v, &index_v)
    }))
}

/// `base(args...)` — calls a previously computed function value.
pub fn call(parser: &mut Parser, base: Evaluable, _precedence: u8) -> Result<Evaluable, ParseError> {
    let args = parser.parse_call_arguments()?;
    Ok(Evaluable::new(false, move |ctx, vars| {
        let base_v = base.eval(ctx, vars)?;
        let arg_values: Result<Vec<Value>, EvalError> = args.iter().map(|a| a.eval(ctx, vars)).collect();
        let arg_values = arg_values?;
        match base_v {
            Value::Function(f) => f(ctx, &arg_values),
            other => Err(EvalError::invalid_operation(other.type_name(), "(", "call")),
        }
    }))
}

/// `cond ? a : b` (and the two-argument `cond ? a` form, where the falsy
/// branch is `Null`). Lowest precedence, right-associative by nature of
/// re-entering `parse_expression` for each branch.
pub fn ternary(parser: &mut Parser, cond: Evaluable, _precedence: u8) -> Result<Evaluable, ParseError> {
    let when_true = parser.parse_expression()?;
    let when_false = if parser.consume_symbol(':')? {
        parser.parse_expression()?
    } else {
        Evaluable::constant(Value::Null)
    };
    let is_const = cond.is_constant() && when_true.is_constant() && when_false.is_constant();
    Ok(Evaluable::new(is_const, move |ctx, vars| {
        if cond.eval(ctx, vars)?.is_truthy() {
            when_true.eval(ctx, vars)
        } else {
            when_false.eval(ctx, vars)
        }
    }))
}

/// `a ?? b` — `a` unless it is the zero value of its type, else `b`.
/// Registered as postfix so chained `a ?? b ?? c` naturally right-associates
/// through the recursive call to `parse_expression`.
pub fn null_coalesce(parser: &mut Parser, left: Evaluable, _precedence: u8) -> Result<Evaluable, ParseError> {
    let right = parser.parse_expression()?;
    let is_const = left.is_constant() && right.is_constant();
    Ok(Evaluable::new(is_const, move |ctx, vars| {
        let lv = left.eval(ctx, vars)?;
        if lv.is_zero_value() {
            right.eval(ctx, vars)
        } else {
            Ok(lv)
        }
    }))
}
