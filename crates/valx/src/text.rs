//! Text dialect: `=~ !~` regex match, lazily compiled per evaluation with a
//! one-shot `RegexCompile` error (§4.2). Precedence sits alongside
//! comparison/`in`.

use std::sync::Arc;

use valx_eval::{EvalError, Value};
use valx_par::{Language, OperatorEntry};

pub const PREC_MATCH: u8 = 5;

fn is_match(ctx: &valx_eval::EvalContext, l: &Value, r: &Value) -> Result<bool, EvalError> {
    ctx.check()?;
    let haystack = l
        .to_display_string()
        .ok_or_else(|| EvalError::invalid_operation(l.type_name(), "=~", r.type_name()))?;
    let pattern = match r {
        Value::Regex(re) => return Ok(re.is_match(&haystack)),
        other => other
            .to_display_string()
            .ok_or_else(|| EvalError::invalid_operation(l.type_name(), "=~", other.type_name()))?,
    };
    let re = regex::Regex::new(&pattern)?;
    Ok(re.is_match(&haystack))
}

pub fn language() -> Language {
    Language::new()
        .with_operator(
            "=~",
            OperatorEntry {
                precedence: Some(PREC_MATCH),
                arbitrary: Some(Arc::new(|ctx, l, r| Ok(Value::Bool(is_match(ctx, l, r)?)))),
                ..Default::default()
            },
        )
        .with_operator(
            "!~",
            OperatorEntry {
                precedence: Some(PREC_MATCH),
                arbitrary: Some(Arc::new(|ctx, l, r| Ok(Value::Bool(!is_match(ctx, l, r)?)))),
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
    fn matches_pattern() {
        let e = Parser::compile(r#""hello123" =~ "[0-9]+""#, language()).unwrap();
        let ctx = EvalContext::background();
        assert_eq!(e.eval(&ctx, &Value::Null).unwrap(), Value::Bool(true));
    }

    #[test]
    fn negated_match() {
        let e = Parser::compile(r#""hello" !~ "[0-9]+""#, language()).unwrap();
        let ctx = EvalContext::background();
        assert_eq!(e.eval(&ctx, &Value::Null).unwrap(), Value::Bool(true));
    }

    #[test]
    fn invalid_pattern_is_regex_compile_error() {
        let e = Parser::compile(r#""x" =~ "(("#, language()).unwrap();
        let ctx = EvalContext::background();
        let err = e.eval(&ctx, &Value::Null).unwrap_err();
        assert!(matches!(err, EvalError::RegexCompile(_)));
    }
}
