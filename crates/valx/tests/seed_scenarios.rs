//! Integration tests against the seed scenario table, using the real
//! `valx::full()` composition rather than a minimal per-dialect test
//! language.

use std::sync::Arc;

use valx::{EvalContext, EvalError, Selector, Value};

#[test]
fn numeric_threshold() {
    let vars = Value::mapping([
        ("requests_made".to_string(), Value::Number(100.0)),
        ("requests_succeeded".to_string(), Value::Number(95.0)),
    ]);
    let result = valx::eval("(requests_made*requests_succeeded/100)>=90", &vars).unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn string_number_bool_concatenation() {
    let result = valx::eval(r#""foo"+123+"bar"+true"#, &Value::Null).unwrap();
    assert_eq!(result, Value::string("foo123bartrue"));
}

#[test]
fn arithmetic_precedence() {
    let result = valx::eval("5+10*2", &Value::Null).unwrap();
    assert_eq!(result, Value::Number(25.0));
}

#[test]
fn short_circuit_or() {
    let result = valx::eval("true||fail()", &Value::Null).unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn mapping_literal() {
    let result = valx::eval(r#"{1:-1,"hello":"hey"}"#, &Value::Null).unwrap();
    assert_eq!(
        result,
        Value::mapping([
            ("1".to_string(), Value::Number(-1.0)),
            ("hello".to_string(), Value::string("hey")),
        ])
    );
}

#[test]
fn string_lexicographic_ordering() {
    let result = valx::eval(r#""apple" < "banana""#, &Value::Null).unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[test]
fn negative_array_index_is_unknown_parameter() {
    let vars = Value::mapping([("xs".to_string(), Value::sequence([Value::Number(1.0)]))]);
    let expr = valx::compile("xs[-1]", valx::full()).unwrap();
    let ctx = EvalContext::background();
    let err = expr.eval(&ctx, &vars).unwrap_err();
    assert!(matches!(err, EvalError::UnknownParameter(_)));
}

#[test]
fn in_operator_rejects_non_sequence_rhs() {
    let err = valx::eval("1 in 2", &Value::Null).unwrap_err();
    assert!(err.contains("expected"));
    assert!(err.contains("in operator"));
}

/// A host object reachable only through `Selector` - the Rust substitute
/// for the reflection-driven `.field` access other hosts get for free
/// (§9 Design Notes).
struct HostRecord {
    nested: std::collections::HashMap<String, Value>,
}

impl Selector for HostRecord {
    fn select(&self, _ctx: &EvalContext, key: &str) -> Result<Value, EvalError> {
        self.nested
            .get(key)
            .cloned()
            .ok_or_else(|| EvalError::unknown_parameter(key))
    }
}

#[test]
fn foreign_selector_backed_field_access() {
    let mut nested = std::collections::HashMap::new();
    nested.insert(
        "Map".to_string(),
        Value::mapping([("a".to_string(), Value::Number(1.0))]),
    );
    let host = Arc::new(HostRecord { nested });
    let vars = Value::mapping([(
        "foo".to_string(),
        Value::mapping([("Nested".to_string(), Value::Foreign(host))]),
    )]);
    let result = valx::eval(r#"foo.Nested.Map["a"]"#, &vars).unwrap();
    assert_eq!(result, Value::Number(1.0));
}

#[test]
fn ternary_and_null_coalesce() {
    assert_eq!(valx::eval("true ? 1 : 2", &Value::Null).unwrap(), Value::Number(1.0));
    assert_eq!(valx::eval("0 ?? 5", &Value::Null).unwrap(), Value::Number(5.0));
}

#[test]
fn bitmask_and_regex_dialects() {
    assert_eq!(valx::eval("1 << 4", &Value::Null).unwrap(), Value::Number(16.0));
    assert_eq!(
        valx::eval(r#""hello123" =~ "[0-9]+""#, &Value::Null).unwrap(),
        Value::Bool(true)
    );
}
