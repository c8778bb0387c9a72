//! The dynamic value algebra (§3 Data model).

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::context::EvalContext;
use crate::error::EvalError;

/// A host object reachable only through this capability — valx has no
/// compile-time knowledge of its shape. This is the substitute for
/// reflection-driven field/method access described in §9's Design Notes:
/// a host type that wants `.field`/`[key]` resolution to reach into it
/// implements `Selector` and is wrapped in [`Value::Foreign`].
pub trait Selector: Send + Sync {
    fn select(&self, ctx: &EvalContext, key: &str) -> Result<Value, EvalError>;
}

/// A callable value: `(...Value) -> Result<Value, EvalError>`.
pub type NativeFn = Arc<dyn Fn(&EvalContext, &[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// A tagged dynamic value produced by evaluating an expression.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
    Foreign(Arc<dyn Selector>),
    Function(NativeFn),
    Regex(Arc<regex::Regex>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }

    pub fn mapping(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Value::Mapping(entries.into_iter().collect())
    }

    /// A short, lower-case tag used in error messages
    /// (`invalid operation (<type>) op (<type>)`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Foreign(_) => "foreign",
            Value::Function(_) => "function",
            Value::Regex(_) => "regex",
        }
    }

    /// to-number coercion: Bool{false->0,true->1}; String parsed as f64;
    /// Null fails; everything else fails.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// to-string coercion: every scalar is formatted canonically;
    /// Sequence/Mapping are not auto-stringified.
    pub fn to_display_string(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(format_number(*n)),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// to-bool coercion: Bool passes through; Number non-zero; String
    /// case-insensitively "true"/"false" (ignoring surrounding whitespace)
    /// or numeric-non-zero; Null -> false; anything else -> not
    /// convertible.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0),
            Value::Null => Some(false),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    trimmed.parse::<f64>().ok().map(|n| n != 0.0)
                }
            }
            _ => None,
        }
    }

    /// Truthiness used by `?:`/`??`: non-Null, non-false values are
    /// truthy, including numbers, non-empty strings, arrays and objects.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Sequence(_) | Value::Mapping(_) | Value::Foreign(_) | Value::Function(_) | Value::Regex(_) => true,
        }
    }

    /// The "zero value of its stored type", used by `??`.
    pub fn is_zero_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Number(n) => *n == 0.0,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }
}

/// Canonical numeric formatting: integral values print without a trailing
/// `.0` the way §4.5's `+` concatenation example expects
/// (`"foo" + 123 + "bar" + true` -> `"foo123bartrue"`), while
/// non-integral values keep full precision.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let mut s = format!("{n}");
        if !s.contains('.') && !s.contains('e') && !s.contains("inf") && !s.contains("NaN") {
            s.push_str(".0");
        }
        s
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Sequence(items) => write!(f, "Sequence({items:?})"),
            Value::Mapping(m) => write!(f, "Mapping({m:?})"),
            Value::Foreign(_) => write!(f, "Foreign(..)"),
            Value::Function(_) => write!(f, "Function(..)"),
            Value::Regex(r) => write!(f, "Regex({:?})", r.as_str()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Foreign(a), Value::Foreign(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
