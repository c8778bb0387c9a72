//! Variable path resolution (§4.4): `.field`, `[expr]` indexing, and the
//! key-resolution order Selector -> Mapping -> Sequence index -> unknown
//! parameter.

use valx_eval::{EvalError, Selector, Value};

/// Resolve `base[index]` (used by both the `.field`/`[idx]` variable-path
/// chain and the generic `[` postfix operator).
pub fn index_value(base: &Value, index: &Value) -> Result<Value, EvalError> {
    match base {
        Value::Foreign(selector) => {
            let key = index
                .to_display_string()
                .ok_or_else(|| EvalError::unknown_parameter(index.type_name()))?;
            selector.select(&valx_eval::EvalContext::background(), &key)
        }
        Value::Mapping(map) => {
            let key = index
                .to_display_string()
                .ok_or_else(|| EvalError::unknown_parameter(index.type_name()))?;
            map.get(&key)
                .cloned()
                .ok_or_else(|| EvalError::unknown_parameter(key))
        }
        Value::Sequence(items) => {
            let i = index
                .to_number()
                .ok_or_else(|| EvalError::unknown_parameter("index"))? as i64;
            if i < 0 {
                return Err(EvalError::unknown_parameter(i.to_string()));
            }
            items
                .get(i as usize)
                .cloned()
                .ok_or_else(|| EvalError::unknown_parameter(i.to_string()))
        }
        other => Err(EvalError::invalid_operation(other.type_name(), "[", "index")),
    }
}

/// Resolve a single path segment against the root variables value, honoring
/// an optional host override ([`VariableSelector`]) ahead of the default
/// Selector -> Mapping -> Sequence lookup.
pub fn select_key(
    base: &Value,
    key: &str,
    override_selector: Option<&dyn VariableSelector>,
) -> Result<Value, EvalError> {
    if let Some(sel) = override_selector {
        if let Some(result) = sel.select_variable(base, key) {
            return result;
        }
    }
    match base {
        Value::Foreign(selector) => selector.select(&valx_eval::EvalContext::background(), key),
        Value::Mapping(map) => map
            .get(key)
            .cloned()
            .ok_or_else(|| EvalError::unknown_parameter(key)),
        Value::Sequence(_) => index_value(base, &Value::string(key)),
        _ => Err(EvalError::unknown_parameter(key)),
    }
}

/// A host hook letting an embedder override how a single path segment
/// resolves against the variables root, ahead of the built-in
/// Selector/Mapping/Sequence order (§4.4, §9 Design Notes).
pub trait VariableSelector: Send + Sync {
    /// Return `None` to fall through to the default resolution order.
    fn select_variable(&self, base: &Value, key: &str) -> Option<Result<Value, EvalError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn mapping_key_lookup() {
        let mut m = IndexMap::new();
        m.insert("a".to_string(), Value::Number(1.0));
        let base = Value::Mapping(m);
        assert_eq!(select_key(&base, "a", None).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn unknown_mapping_key_errors() {
        let base = Value::mapping([("a".to_string(), Value::Number(1.0))]);
        assert!(select_key(&base, "missing", None).is_err());
    }

    #[test]
    fn negative_sequence_index_errors() {
        let base = Value::sequence([Value::Number(1.0)]);
        let err = index_value(&base, &Value::Number(-1.0)).unwrap_err();
        match err {
            EvalError::UnknownParameter(_) => {}
            other => panic!("expected UnknownParameter, got {other:?}"),
        }
    }
}
