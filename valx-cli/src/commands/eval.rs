//! Eval command implementation.
//!
//! This module compiles an expression against the `full` dialect and
//! evaluates it against variable bindings gathered from `--var`,
//! `--vars-file`, and (if configured) the config file's default file.

use std::path::PathBuf;
use std::time::Instant;

use valx::Value;

use crate::commands::common::{format_value, load_vars_file, merge_bindings, parse_var_binding, OutputFormat};
use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::{Result, ValxCliError};

/// Arguments for the eval command.
#[derive(Debug, Clone, Default)]
pub struct EvalArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// The expression source, taken from the positional argument or `--file`.
    pub expression: String,
    /// `key=value` bindings from `--var`, applied after `--vars-file`.
    pub vars: Vec<String>,
    /// A JSON document of variables, merged before `--var` overrides.
    pub vars_file: Option<PathBuf>,
    /// Output rendering.
    pub format: Option<OutputFormat>,
}

/// Eval command handler.
pub struct EvalCommand {
    args: EvalArgs,
    config: Config,
}

impl EvalCommand {
    /// Create a new EvalCommand.
    pub fn new(args: EvalArgs) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    /// Create a new EvalCommand with an explicit configuration.
    pub fn with_config(args: EvalArgs, config: Config) -> Self {
        Self { args, config }
    }

    /// Execute the command, returning the rendered result.
    pub fn run(&self) -> Result<String> {
        let start_time = Instant::now();

        let variables = self.gather_variables()?;
        let expr = valx::compile(&self.args.expression, valx::full())?;
        let ctx = valx::EvalContext::background();
        let result = expr
            .eval(&ctx, &variables)
            .map_err(|e| ValxCliError::Eval(e.to_string()))?;

        let format = self.effective_format();
        let rendered = format_value(&result, format);

        if self.args.verbose {
            eprintln!("evaluated in {:.6}s", start_time.elapsed().as_secs_f64());
        }

        Ok(rendered)
    }

    /// Merge the config's default vars file, `--vars-file`, and `--var`
    /// overrides into a single mapping (later sources win on key collision).
    fn gather_variables(&self) -> Result<Value> {
        let mut base = match &self.config.vars_file {
            Some(path) => load_vars_file(&PathBuf::from(path))?,
            None => Value::Null,
        };
        if let Some(path) = &self.args.vars_file {
            base = merge_bindings(base, match load_vars_file(path)? {
                Value::Mapping(m) => m,
                _ => indexmap::IndexMap::new(),
            });
        }
        let overrides = self
            .args
            .vars
            .iter()
            .map(|binding| parse_var_binding(binding))
            .collect::<Result<Vec<_>>>()?;
        Ok(merge_bindings(base, overrides))
    }

    fn effective_format(&self) -> OutputFormat {
        self.args.format.unwrap_or(match self.config.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

impl Command for EvalCommand {
    type Args = EvalArgs;
    type Output = String;

    fn new(args: Self::Args) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "eval"
    }
}

impl CommandDescription for EvalCommand {
    fn description() -> &'static str {
        "Evaluate an expression against variable bindings"
    }

    fn help() -> &'static str {
        "Compiles an expression under the full dialect set and evaluates it \
         against variables gathered from --var, --vars-file, or the config's \
         default vars file."
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<String> {
    let command = EvalCommand::new(args);
    command.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_args_default() {
        let args = EvalArgs::default();
        assert!(!args.verbose);
        assert!(args.expression.is_empty());
        assert!(args.vars.is_empty());
        assert!(args.vars_file.is_none());
    }

    #[test]
    fn test_eval_command_name() {
        assert_eq!(<EvalCommand as Command>::name(), "eval");
    }

    #[test]
    fn test_eval_simple_arithmetic() {
        let args = EvalArgs {
            expression: "5+10*2".to_string(),
            ..Default::default()
        };
        let command = EvalCommand::new(args);
        assert_eq!(command.run().unwrap(), "25");
    }

    #[test]
    fn test_eval_with_var_bindings() {
        let args = EvalArgs {
            expression: "a+b".to_string(),
            vars: vec!["a=1".to_string(), "b=2".to_string()],
            ..Default::default()
        };
        let command = EvalCommand::new(args);
        assert_eq!(command.run().unwrap(), "3");
    }

    #[test]
    fn test_eval_json_format() {
        let args = EvalArgs {
            expression: "[1,2,3]".to_string(),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let command = EvalCommand::new(args);
        assert_eq!(command.run().unwrap(), "[1.0,2.0,3.0]");
    }

    #[test]
    fn test_eval_unknown_parameter_is_error() {
        let args = EvalArgs {
            expression: "missing_var".to_string(),
            ..Default::default()
        };
        let command = EvalCommand::new(args);
        assert!(command.run().is_err());
    }

    #[test]
    fn test_eval_parse_error_is_error() {
        let args = EvalArgs {
            expression: "5 $ 2".to_string(),
            ..Default::default()
        };
        let command = EvalCommand::new(args);
        assert!(matches!(command.run(), Err(ValxCliError::Parse(_))));
    }

    #[test]
    fn test_run_eval_convenience_function() {
        let args = EvalArgs {
            expression: "1+1".to_string(),
            ..Default::default()
        };
        assert_eq!(run_eval(args).unwrap(), "2");
    }
}
