//! Common types and utilities for valx commands.
//!
//! This module provides shared types and conversions used across all
//! command implementations: turning `--var`/`--vars-file` input and JSON
//! documents into `valx::Value`s, and formatting a `Value` result back out.

use std::path::Path;

use valx::Value;

use crate::error::{Result, ValxCliError};

// ============================================================================
// Output Format
// ============================================================================

/// Supported output formats for the `eval` command's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `Value`'s own display coercion (`to_display_string`), falling back
    /// to JSON for sequences/mappings that have no scalar rendering.
    Text,
    /// Always JSON, regardless of the result's shape.
    Json,
}

/// Render a `Value` according to the requested format.
pub fn format_value(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => value
            .to_display_string()
            .unwrap_or_else(|| value_to_json(value).to_string()),
        OutputFormat::Json => value_to_json(value).to_string(),
    }
}

// ============================================================================
// Variable Binding Parsing
// ============================================================================

/// Parse a single `key=value` binding from `--var`. The right-hand side is
/// parsed as JSON when possible (so `--var count=3` yields a number and
/// `--var active=true` yields a bool); anything that doesn't parse as JSON
/// is kept as a plain string, so `--var name=ok` doesn't require quoting.
pub fn parse_var_binding(binding: &str) -> Result<(String, Value)> {
    let (key, raw) = binding.split_once('=').ok_or_else(|| {
        ValxCliError::InvalidVariable(format!("expected key=value, got {binding:?}"))
    })?;
    if key.is_empty() {
        return Err(ValxCliError::InvalidVariable(format!(
            "empty variable name in {binding:?}"
        )));
    }
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => json_to_value(json),
        Err(_) => Value::string(raw),
    };
    Ok((key.to_string(), value))
}

/// Load a JSON document from `path` and convert it into a `Value`.
pub fn load_vars_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&content)?;
    Ok(json_to_value(json))
}

/// Fold a base set of variables with individual `key=value` overrides,
/// overrides winning on key collision. `base` is expected to be a
/// `Value::Mapping` (or `Value::Null` for "no base"); anything else is
/// treated as having no fields to merge into.
pub fn merge_bindings(base: Value, overrides: impl IntoIterator<Item = (String, Value)>) -> Value {
    let mut mapping = match base {
        Value::Mapping(m) => m,
        _ => indexmap::IndexMap::new(),
    };
    for (key, value) in overrides {
        mapping.insert(key, value);
    }
    Value::Mapping(mapping)
}

/// Convert a `serde_json::Value` into a `valx::Value`, the bridge between
/// the CLI's JSON-speaking input surface and the engine's own value algebra.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::sequence(items.into_iter().map(json_to_value)),
        serde_json::Value::Object(fields) => {
            Value::mapping(fields.into_iter().map(|(k, v)| (k, json_to_value(v))))
        }
    }
}

/// Convert a `valx::Value` back into `serde_json::Value` for JSON output.
/// Foreign/Function/Regex values have no JSON shape, so they render as
/// their type name the way a debugger placeholder would.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Mapping(m) => {
            serde_json::Value::Object(m.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect())
        }
        Value::Foreign(_) => serde_json::Value::String("<foreign>".to_string()),
        Value::Function(_) => serde_json::Value::String("<function>".to_string()),
        Value::Regex(r) => serde_json::Value::String(r.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_binding_numeric() {
        let (key, value) = parse_var_binding("count=3").unwrap();
        assert_eq!(key, "count");
        assert_eq!(value, Value::Number(3.0));
    }

    #[test]
    fn parse_var_binding_bool() {
        let (_, value) = parse_var_binding("active=true").unwrap();
        assert_eq!(value, Value::Bool(true));
    }

    #[test]
    fn parse_var_binding_bare_string() {
        let (_, value) = parse_var_binding("status=ok").unwrap();
        assert_eq!(value, Value::string("ok"));
    }

    #[test]
    fn parse_var_binding_rejects_missing_equals() {
        assert!(parse_var_binding("count").is_err());
    }

    #[test]
    fn merge_bindings_overrides_base() {
        let base = Value::mapping([("a".to_string(), Value::Number(1.0))]);
        let merged = merge_bindings(base, [("a".to_string(), Value::Number(2.0))]);
        assert_eq!(
            merged,
            Value::mapping([("a".to_string(), Value::Number(2.0))])
        );
    }

    #[test]
    fn json_roundtrip_through_value() {
        let json = serde_json::json!({"a": 1, "b": [true, null, "x"]});
        let value = json_to_value(json.clone());
        assert_eq!(value_to_json(&value), json);
    }

    #[test]
    fn format_value_text_uses_display_string() {
        assert_eq!(format_value(&Value::Number(25.0), OutputFormat::Text), "25");
    }

    #[test]
    fn format_value_text_falls_back_to_json_for_sequences() {
        let value = Value::sequence([Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(format_value(&value, OutputFormat::Text), "[1.0,2.0]");
    }
}
