//! Valx CLI - a command-line tool for evaluating valx expressions.
//!
//! This is the main entry point for the valx CLI application.
//! It uses clap for argument parsing and dispatches to appropriate
//! command handlers based on user input.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    check::{run_check, CheckArgs},
    common::OutputFormat,
    eval::EvalArgs,
};
use config::Config;
use error::{Result, ValxCliError};

/// Valx - a CLI tool for evaluating embeddable expressions.
///
/// Valx evaluates dynamically-typed expressions against variable bindings,
/// and can validate an expression's syntax without running it.
#[derive(Parser, Debug)]
#[command(name = "valx")]
#[command(author = "Valx Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for evaluating valx expressions", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "VALX_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "VALX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the valx CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate an expression against variable bindings
    ///
    /// Compiles the expression under the full dialect set and evaluates it
    /// against variables gathered from --var, --vars-file, and the config's
    /// default vars file.
    Eval(EvalCommand),

    /// Validate that an expression compiles
    ///
    /// Parses the expression and reports whether it's syntactically valid,
    /// without evaluating it.
    Check(CheckCommand),
}

/// Arguments for the eval subcommand.
#[derive(Parser, Debug)]
struct EvalCommand {
    /// The expression to evaluate
    expression: String,

    /// A `key=value` variable binding; may be given multiple times
    #[arg(short = 'V', long = "var")]
    vars: Vec<String>,

    /// A JSON document of variables, merged before --var overrides
    #[arg(long)]
    vars_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// The expression to validate
    expression: String,
}

/// Main entry point for the valx CLI.
///
/// Parses command-line arguments and hands off to [`run`]. `anyhow` only
/// appears at this boundary, collapsing `ValxCliError` (and anything else
/// glue code here might produce) into one reportable error for the process
/// exit path; everything below `run` stays typed on `ValxCliError`.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli)?;
    Ok(())
}

/// Parses command-line arguments, initializes logging, loads configuration,
/// and dispatches to the appropriate command handler.
fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.verbose, config)
}

/// Initialize the logging system.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| ValxCliError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command, printing its result to stdout.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Eval(args) => execute_eval(args, verbose, config),
        Commands::Check(args) => execute_check(args, verbose),
    }
}

/// Execute the eval command.
fn execute_eval(args: EvalCommand, verbose: bool, config: Config) -> Result<()> {
    let eval_args = EvalArgs {
        verbose,
        expression: args.expression,
        vars: args.vars,
        vars_file: args.vars_file,
        format: args.format,
    };
    let command = commands::eval::EvalCommand::with_config(eval_args, config);
    let rendered = command.run()?;
    println!("{rendered}");
    Ok(())
}

/// Execute the check command.
fn execute_check(args: CheckCommand, verbose: bool) -> Result<()> {
    let check_args = CheckArgs {
        verbose,
        expression: args.expression,
    };
    run_check(check_args)?;
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_eval() {
        let cli = Cli::parse_from(["valx", "eval", "1+1"]);
        assert!(matches!(cli.command, Commands::Eval(_)));
    }

    #[test]
    fn test_cli_parse_eval_expression() {
        let cli = Cli::parse_from(["valx", "eval", "5+10*2"]);
        if let Commands::Eval(args) = cli.command {
            assert_eq!(args.expression, "5+10*2");
        } else {
            panic!("Expected Eval command");
        }
    }

    #[test]
    fn test_cli_parse_eval_with_vars() {
        let cli = Cli::parse_from(["valx", "eval", "a+b", "--var", "a=1", "--var", "b=2"]);
        if let Commands::Eval(args) = cli.command {
            assert_eq!(args.vars, vec!["a=1".to_string(), "b=2".to_string()]);
        } else {
            panic!("Expected Eval command");
        }
    }

    #[test]
    fn test_cli_parse_eval_with_format() {
        let cli = Cli::parse_from(["valx", "eval", "1+1", "--format", "json"]);
        if let Commands::Eval(args) = cli.command {
            assert_eq!(args.format, Some(OutputFormat::Json));
        } else {
            panic!("Expected Eval command");
        }
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["valx", "check", "1+1"]);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_global_verbose() {
        let cli = Cli::parse_from(["valx", "--verbose", "eval", "1+1"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::parse_from(["valx", "--config", "/path/to/config.toml", "eval", "1+1"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }
}
