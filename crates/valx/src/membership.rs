//! The `in` operator: a word operator (matched as a whole identifier, never
//! via greedy symbol-lexeme extension) testing sequence membership. The
//! right operand MUST be a `Sequence`; anything else is an `ExpectedType`
//! error naming what was expected (§4.2, §8 boundary: `1 in 2` ->
//! InvalidOperation with "expected ... for in operator").

use std::sync::Arc;

use valx_eval::{EvalError, Value};
use valx_par::{Language, OperatorEntry};

pub const PREC_IN: u8 = 5;

pub fn language() -> Language {
    Language::new().with_operator(
        "in",
        OperatorEntry {
            precedence: Some(PREC_IN),
            arbitrary: Some(Arc::new(|_ctx, l, r| match r {
                Value::Sequence(items) => Ok(Value::Bool(items.contains(l))),
                other => Err(EvalError::expected_type("sequence", "in", other.type_name())),
            })),
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use valx_eval::EvalContext;
    use valx_par::Parser;

    #[test]
    fn membership_true() {
        let e = Parser::compile("1 in xs", crate::literals::language().merge(language())).unwrap();
        let vars = Value::mapping([("xs".to_string(), Value::sequence([Value::Number(1.0), Value::Number(2.0)]))]);
        let ctx = EvalContext::background();
        assert_eq!(e.eval(&ctx, &vars).unwrap(), Value::Bool(true));
    }

    #[test]
    fn non_sequence_right_side_is_expected_type_error() {
        let e = Parser::compile("1 in 2", crate::arithmetic::language().merge(language())).unwrap();
        let ctx = EvalContext::background();
        let err = e.eval(&ctx, &Value::Null).unwrap_err();
        assert!(err.to_string().contains("expected"));
        assert!(err.to_string().contains("in operator"));
    }
}
