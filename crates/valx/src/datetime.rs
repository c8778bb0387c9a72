//! The `date()` helper (§4.2 Full = Base ∪ dialects ∪ `date()`), gated
//! behind the `datetime` feature (on by default). `date()` returns the
//! current time; `date(text)` parses an RFC3339 or `YYYY-MM-DD` literal.
//! Both resolve to a `Value::Number` of Unix seconds so the rest of the
//! numeric/comparison machinery (`<`, `-`, ...) applies to dates for free.

use valx_eval::{EvalError, Evaluable, Value};
use valx_par::{Language, ParseError, Parser};

pub fn language() -> Language {
    Language::new().with_prefix_ident("date", std::sync::Arc::new(date_call))
}

fn date_call(parser: &mut Parser) -> Result<Evaluable, ParseError> {
    parser.expect_symbol('(')?;
    let args = parser.parse_call_arguments()?;
    Ok(Evaluable::new(false, move |ctx, vars| {
        ctx.check()?;
        if args.is_empty() {
            return Ok(Value::Number(chrono::Utc::now().timestamp() as f64));
        }
        let arg = args[0].eval(ctx, vars)?;
        let text = arg
            .to_display_string()
            .ok_or_else(|| EvalError::invalid_operation(arg.type_name(), "date", "string"))?;
        parse_timestamp(&text).map(Value::Number)
    }))
}

fn parse_timestamp(text: &str) -> Result<f64, EvalError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Ok(dt.timestamp() as f64);
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp() as f64);
        }
    }
    Err(EvalError::User(format!("invalid date literal {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use valx_eval::EvalContext;

    #[test]
    fn parses_iso_date() {
        let e = Parser::compile(r#"date("2021-01-02")"#, language()).unwrap();
        let ctx = EvalContext::background();
        let v = e.eval(&ctx, &Value::Null).unwrap();
        assert_eq!(v, Value::Number(1609545600.0));
    }

    #[test]
    fn invalid_date_is_a_user_error() {
        let e = Parser::compile(r#"date("not a date")"#, language()).unwrap();
        let ctx = EvalContext::background();
        assert!(e.eval(&ctx, &Value::Null).is_err());
    }
}
