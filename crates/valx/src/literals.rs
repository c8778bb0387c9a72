//! JSON-ish literal dialect: `[e, ...]` sequences and `{key: v, ...}`
//! mappings, keys stringified at eval time with later duplicates
//! overwriting earlier ones (§4.2, §8 seed scenario `{1:-1,"hello":"hey"}`).

use std::sync::Arc;

use valx_eval::{EvalError, Evaluable, Value};
use valx_par::{Language, ParseError, Parser};

pub fn language() -> Language {
    Language::new()
        .with_prefix_rune('[', Arc::new(sequence_literal))
        .with_prefix_rune('{', Arc::new(mapping_literal))
}

fn sequence_literal(parser: &mut Parser) -> Result<Evaluable, ParseError> {
    let mut items = Vec::new();
    if parser.consume_symbol(']')? {
        return Ok(Evaluable::constant(Value::Sequence(Vec::new())));
    }
    loop {
        items.push(parser.parse_expression()?);
        if parser.consume_symbol(',')? {
            if parser.consume_symbol(']')? {
                break;
            }
            continue;
        }
        parser.expect_symbol(']')?;
        break;
    }
    let is_const = items.iter().all(Evaluable::is_constant);
    Ok(Evaluable::new(is_const, move |ctx, vars| {
        let values: Result<Vec<Value>, EvalError> = items.iter().map(|e| e.eval(ctx, vars)).collect();
        Ok(Value::Sequence(values?))
    }))
}

fn mapping_literal(parser: &mut Parser) -> Result<Evaluable, ParseError> {
    let mut entries = Vec::new();
    if parser.consume_symbol('}')? {
        return Ok(Evaluable::constant(Value::Mapping(Default::default())));
    }
    loop {
        let key = parser.parse_expression()?;
        parser.expect_symbol(':')?;
        let value = parser.parse_expression()?;
        entries.push((key, value));
        if parser.consume_symbol(',')? {
            if parser.consume_symbol('}')? {
                break;
            }
            continue;
        }
        parser.expect_symbol('}')?;
        break;
    }
    let is_const = entries.iter().all(|(k, v)| k.is_constant() && v.is_constant());
    Ok(Evaluable::new(is_const, move |ctx, vars| {
        let mut map = indexmap::IndexMap::new();
        for (k, v) in &entries {
            let key_value = k.eval(ctx, vars)?;
            let key = key_value
                .to_display_string()
                .ok_or_else(|| EvalError::invalid_operation(key_value.type_name(), ":", "mapping key"))?;
            map.insert(key, v.eval(ctx, vars)?);
        }
        Ok(Value::Mapping(map))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use valx_eval::EvalContext;

    #[test]
    fn empty_sequence() {
        let e = Parser::compile("[]", language()).unwrap();
        let ctx = EvalContext::background();
        assert_eq!(e.eval(&ctx, &Value::Null).unwrap(), Value::Sequence(vec![]));
    }

    #[test]
    fn sequence_of_literals() {
        let e = Parser::compile("[1, 2, 3]", crate::arithmetic::language().merge(language())).unwrap();
        let ctx = EvalContext::background();
        assert_eq!(
            e.eval(&ctx, &Value::Null).unwrap(),
            Value::sequence([Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])
        );
    }

    #[test]
    fn mapping_seed_scenario() {
        let e = Parser::compile(
            r#"{1:-1,"hello":"hey"}"#,
            crate::arithmetic::language().merge(language()),
        )
        .unwrap();
        let ctx = EvalContext::background();
        let result = e.eval(&ctx, &Value::Null).unwrap();
        assert_eq!(
            result,
            Value::mapping([
                ("1".to_string(), Value::Number(-1.0)),
                ("hello".to_string(), Value::string("hey")),
            ])
        );
    }

    #[test]
    fn duplicate_keys_overwrite() {
        let e = Parser::compile(r#"{"a":1,"a":2}"#, crate::arithmetic::language().merge(language())).unwrap();
        let ctx = EvalContext::background();
        let result = e.eval(&ctx, &Value::Null).unwrap();
        assert_eq!(result, Value::mapping([("a".to_string(), Value::Number(2.0))]));
    }
}
