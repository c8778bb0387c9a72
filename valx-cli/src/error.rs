//! Error handling module for the valx CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the valx CLI application.
///
/// This enum represents all possible errors that can occur
/// during the execution of valx commands.
#[derive(Error, Debug)]
pub enum ValxCliError {
    /// Error when a required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when a `--var` binding or `--vars-file` document can't be
    /// turned into a `Value`.
    #[error("Invalid variable binding: {0}")]
    InvalidVariable(String),

    /// Error when the expression itself fails to compile.
    #[error("Failed to parse expression: {0}")]
    Parse(#[from] valx::ParseError),

    /// Error when a compiled expression fails during evaluation.
    #[error("Evaluation error: {0}")]
    Eval(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization/deserialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using ValxCliError.
///
/// This type alias simplifies function signatures by providing
/// a consistent result type throughout the application.
pub type Result<T> = std::result::Result<T, ValxCliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ValxCliError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_invalid_variable_error_display() {
        let err = ValxCliError::InvalidVariable("count=abc".to_string());
        assert_eq!(err.to_string(), "Invalid variable binding: count=abc");
    }

    #[test]
    fn test_eval_error_display() {
        let err = ValxCliError::Eval("unknown parameter foo".to_string());
        assert_eq!(err.to_string(), "Evaluation error: unknown parameter foo");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: ValxCliError = io_err.into();
        assert!(matches!(cli_err, ValxCliError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let cli_err: ValxCliError = json_err.into();
        assert!(matches!(cli_err, ValxCliError::Json(_)));
    }
}
