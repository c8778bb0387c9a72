//! Comparison dialect: `== != < <= > >=`, universal ordering (numeric if
//! both operands coerce, else lexicographic string, else deep Value
//! equality for sequences/mappings) (§4.2, §8 testable properties).

use std::cmp::Ordering;
use std::sync::Arc;

use valx_eval::{EvalError, Value};
use valx_par::{Language, OperatorEntry};

pub const PREC_COMPARISON: u8 = 4;

enum Cmp {
    Ordered(Ordering),
    EqualityOnly(bool),
}

fn universal_compare(l: &Value, r: &Value) -> Cmp {
    if let (Some(a), Some(b)) = (l.to_number(), r.to_number()) {
        return Cmp::Ordered(a.partial_cmp(&b).unwrap_or(Ordering::Equal));
    }
    if let (Some(a), Some(b)) = (l.to_display_string(), r.to_display_string()) {
        return Cmp::Ordered(a.cmp(&b));
    }
    Cmp::EqualityOnly(l == r)
}

fn equal(l: &Value, r: &Value) -> bool {
    match universal_compare(l, r) {
        Cmp::Ordered(o) => o == Ordering::Equal,
        Cmp::EqualityOnly(b) => b,
    }
}

fn ordered(l: &Value, r: &Value, op: &str, want: impl Fn(Ordering) -> bool) -> Result<Value, EvalError> {
    match universal_compare(l, r) {
        Cmp::Ordered(o) => Ok(Value::Bool(want(o))),
        Cmp::EqualityOnly(_) => Err(EvalError::invalid_operation(l.type_name(), op, r.type_name())),
    }
}

pub fn language() -> Language {
    Language::new()
        .with_operator(
            "==",
            OperatorEntry {
                precedence: Some(PREC_COMPARISON),
                arbitrary: Some(Arc::new(|_ctx, l, r| Ok(Value::Bool(equal(l, r))))),
                ..Default::default()
            },
        )
        .with_operator(
            "!=",
            OperatorEntry {
                precedence: Some(PREC_COMPARISON),
                arbitrary: Some(Arc::new(|_ctx, l, r| Ok(Value::Bool(!equal(l, r))))),
                ..Default::default()
            },
        )
        .with_operator(
            "<",
            OperatorEntry {
                precedence: Some(PREC_COMPARISON),
                arbitrary: Some(Arc::new(|_ctx, l, r| ordered(l, r, "<", |o| o == Ordering::Less))),
                ..Default::default()
            },
        )
        .with_operator(
            "<=",
            OperatorEntry {
                precedence: Some(PREC_COMPARISON),
                arbitrary: Some(Arc::new(|_ctx, l, r| {
                    ordered(l, r, "<=", |o| o != Ordering::Greater)
                })),
                ..Default::default()
            },
        )
        .with_operator(
            ">",
            OperatorEntry {
                precedence: Some(PREC_COMPARISON),
                arbitrary: Some(Arc::new(|_ctx, l, r| ordered(l, r, ">", |o| o == Ordering::Greater))),
                ..Default::default()
            },
        )
        .with_operator(
            ">=",
            OperatorEntry {
                precedence: Some(PREC_COMPARISON),
                arbitrary: Some(Arc::new(|_ctx, l, r| ordered(l, r, ">=", |o| o != Ordering::Less))),
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
    fn numeric_threshold_scenario() {
        let e = Parser::compile("(requests_made*requests_succeeded/100)>=90", {
            crate::arithmetic::language().merge(language())
        })
        .unwrap();
        let vars = Value::mapping([
            ("requests_made".to_string(), Value::Number(100.0)),
            ("requests_succeeded".to_string(), Value::Number(95.0)),
        ]);
        let ctx = EvalContext::background();
        assert_eq!(e.eval(&ctx, &vars).unwrap(), Value::Bool(true));
    }

    #[test]
    fn string_lexicographic_comparison() {
        let e = Parser::compile(r#""apple" < "banana""#, language()).unwrap();
        let ctx = EvalContext::background();
        assert_eq!(e.eval(&ctx, &Value::Null).unwrap(), Value::Bool(true));
    }

    #[test]
    fn ordering_on_non_coercible_types_is_invalid_operation() {
        let e = Parser::compile("a < b", language()).unwrap();
        let vars = Value::mapping([
            ("a".to_string(), Value::sequence([Value::Number(1.0)])),
            ("b".to_string(), Value::sequence([Value::Number(2.0)])),
        ]);
        let ctx = EvalContext::background();
        let err = e.eval(&ctx, &vars).unwrap_err();
        assert!(matches!(err, EvalError::InvalidOperation { .. }));
    }
}
