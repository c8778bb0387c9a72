//! Parse-time and evaluation-time error types.
//!
//! Every failure in valx surfaces as a single-line, prefix-stable string;
//! callers are expected to pattern-match on substrings (this is asserted by
//! the test suite, not just documented). `ParseError` covers everything that
//! can go wrong while compiling an expression; `EvalError` covers everything
//! that can go wrong while evaluating one, one variant per row of the error
//! taxonomy.

use std::fmt;

use valx_util::Span;

/// Why parsing failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A malformed literal, unbalanced grouping, or other syntax error.
    Syntax(String),
    /// A run of symbol characters didn't match any registered operator.
    UnknownOperator(String),
    /// A Pratt rule expected one of several tokens and got something else.
    UnexpectedToken {
        unit: String,
        got: String,
        expected: Vec<String>,
    },
}

/// A parse-time failure, always tied to the span of the offending token.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Syntax(message.into()),
            span,
        }
    }

    pub fn unknown_operator(lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::UnknownOperator(lexeme.into()),
            span,
        }
    }

    pub fn unexpected(unit: impl Into<String>, got: impl Into<String>, expected: Vec<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedToken {
                unit: unit.into(),
                got: got.into(),
                expected,
            },
            span,
        }
    }

    fn detail(&self) -> String {
        match &self.kind {
            ParseErrorKind::Syntax(s) => s.clone(),
            ParseErrorKind::UnknownOperator(lex) => format!("unknown operator {lex}"),
            ParseErrorKind::UnexpectedToken { unit, got, expected } => {
                if expected.is_empty() {
                    format!("unexpected {got} while scanning {unit}")
                } else {
                    format!(
                        "unexpected {got} while scanning {unit} expected {}",
                        expected.join(" or ")
                    )
                }
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parsing error: {} - {}:{} {}",
            self.span.start,
            self.span.line,
            self.span.column,
            self.detail()
        )
    }
}

impl std::error::Error for ParseError {}

/// A runtime evaluation failure, one variant per row of the error taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A variable path or map key could not be resolved.
    UnknownParameter(String),
    /// A typed operator couldn't find a coercion for its operands.
    InvalidOperation {
        left: String,
        op: String,
        right: String,
    },
    /// An operator (e.g. `in`) demanded a specific kind of right-hand value.
    ExpectedType {
        expected: String,
        op: String,
        got: String,
    },
    /// A regex literal or `=~`/`!~` pattern failed to compile.
    RegexCompile(String),
    /// Arity or type mismatch binding arguments to a host function.
    FunctionBinding(String),
    /// The evaluation context was cancelled or its deadline passed.
    Cancelled(String),
    /// An error returned by a user-supplied function or Selector.
    User(String),
}

impl EvalError {
    pub fn unknown_parameter(path: impl Into<String>) -> Self {
        Self::UnknownParameter(path.into())
    }

    pub fn invalid_operation(left: impl Into<String>, op: impl Into<String>, right: impl Into<String>) -> Self {
        Self::InvalidOperation {
            left: left.into(),
            op: op.into(),
            right: right.into(),
        }
    }

    pub fn expected_type(expected: impl Into<String>, op: impl Into<String>, got: impl Into<String>) -> Self {
        Self::ExpectedType {
            expected: expected.into(),
            op: op.into(),
            got: got.into(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownParameter(path) => write!(f, "unknown parameter {path}"),
            EvalError::InvalidOperation { left, op, right } => {
                write!(f, "invalid operation ({left}) {op} ({right})")
            }
            EvalError::ExpectedType { expected, op, got } => {
                write!(f, "expected {expected} for {op} operator but got {got}")
            }
            EvalError::RegexCompile(detail) => write!(f, "error parsing regex: {detail}"),
            EvalError::FunctionBinding(detail) => write!(f, "{detail}"),
            EvalError::Cancelled(detail) => write!(f, "{detail}"),
            EvalError::User(detail) => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<regex::Error> for EvalError {
    fn from(e: regex::Error) -> Self {
        EvalError::RegexCompile(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_renders_stable_prefix() {
        let e = ParseError::unknown_operator("$$", Span::new(3, 5, 1, 4));
        assert_eq!(e.to_string(), "parsing error: 3 - 1:4 unknown operator $$");
    }

    #[test]
    fn unexpected_token_without_expectations() {
        let e = ParseError::unexpected("extensions", "end of input", vec![], Span::DUMMY);
        assert!(e.to_string().contains("unexpected end of input while scanning extensions"));
    }

    #[test]
    fn unexpected_token_with_expectations() {
        let e = ParseError::unexpected(
            "parentheses",
            "\",\"",
            vec!["\")\"".to_string()],
            Span::DUMMY,
        );
        assert!(e.to_string().contains("expected \")\""));
    }

    #[test]
    fn invalid_operation_format() {
        let e = EvalError::invalid_operation("bool", "-", "bool");
        assert_eq!(e.to_string(), "invalid operation (bool) - (bool)");
    }

    #[test]
    fn expected_type_format() {
        let e = EvalError::expected_type("[]interface{}", "in", "float64");
        assert_eq!(
            e.to_string(),
            "expected []interface{} for in operator but got float64"
        );
    }
}
