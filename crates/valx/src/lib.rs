//! valx - an embeddable, dynamically-typed expression evaluation engine.
//!
//! This crate assembles the built-in dialects (arithmetic, bitmask, text,
//! propositional logic, comparison, JSON-ish literals, ternary/null-coalesce,
//! membership, and - behind the `datetime` feature - `date()`) on top of
//! [`valx_par`]'s `Language`/`Parser` and [`valx_eval`]'s `Evaluable`/`Value`,
//! and exposes the two standard compositions described in §4.2:
//!
//! - [`base`] - identifier/number/string/raw-string parsing and
//!   parenthesised grouping (built into the parser itself) plus the generic
//!   postfix subscript/call capability.
//! - [`full`] - `base` unioned with every built-in dialect.
//!
//! An embedder who only wants a subset (say, arithmetic and comparison,
//! no regex) composes dialects directly with [`valx_par::Language::merge`].

pub mod arithmetic;
pub mod base;
pub mod bitmask;
pub mod comparison;
#[cfg(feature = "datetime")]
pub mod datetime;
pub mod literals;
pub mod logic;
pub mod membership;
pub mod ternary;
pub mod text;

pub use valx_eval::{CancelHandle, EvalContext, EvalError, NativeFn, Selector, Value};
pub use valx_par::{Language, ParseError, ParseErrorKind, Parser, VariableSelector};

/// `base` plus every built-in dialect (§4.2: "Full = Base ∪ all dialects ∪
/// `date()`"). The decimal-arithmetic dialect from the Open Questions list
/// is intentionally not part of `full` - see the `decimal` feature's doc
/// comment on the crate's Cargo manifest.
pub fn full() -> Language {
    let mut lang = base::language()
        .merge(arithmetic::language())
        .merge(bitmask::language())
        .merge(text::language())
        .merge(logic::language())
        .merge(comparison::language())
        .merge(literals::language())
        .merge(membership::language())
        .merge(ternary::language());
    #[cfg(feature = "datetime")]
    {
        lang = lang.merge(datetime::language());
    }
    lang
}

/// Identifier/number/string/raw-string parsing and parenthesised grouping,
/// with no operators beyond the generic postfix subscript/call (§4.2).
pub fn base() -> Language {
    base::language()
}

/// Compile `source` under `language`, producing a reusable [`Evaluable`].
pub fn compile(source: &str, language: Language) -> Result<valx_eval::Evaluable, ParseError> {
    Parser::compile(source, language)
}

/// Compile and immediately evaluate `source` against `variables` under the
/// [`full`] language, with a background (non-cancellable) context. A
/// convenience for one-shot evaluation; callers evaluating the same
/// expression repeatedly should [`compile`] once and reuse the result.
pub fn eval(source: &str, variables: &Value) -> Result<Value, String> {
    let expr = compile(source, full()).map_err(|e| e.to_string())?;
    expr.eval(&EvalContext::background(), variables)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_composes_without_panicking() {
        let _ = full();
    }

    #[test]
    fn seed_scenario_short_circuit() {
        let result = eval("true || fail()", &Value::Null).unwrap();
        assert_eq!(result, Value::Bool(true));
    }

    #[test]
    fn seed_scenario_nested_field_and_index() {
        let vars = Value::mapping([(
            "foo".to_string(),
            Value::mapping([(
                "Nested".to_string(),
                Value::mapping([(
                    "Map".to_string(),
                    Value::mapping([("a".to_string(), Value::Number(1.0))]),
                )]),
            )]),
        )]);
        let result = eval(r#"foo.Nested.Map["a"]"#, &vars).unwrap();
        assert_eq!(result, Value::Number(1.0));
    }
}
