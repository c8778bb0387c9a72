//! Check command implementation.
//!
//! This module validates that an expression compiles under the full dialect
//! set without evaluating it, the expression-language analogue of a syntax
//! check.

use crate::commands::traits::{Command, CommandDescription};
use crate::error::Result;

/// Arguments for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// The expression source to validate.
    pub expression: String,
}

/// Check command handler.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new CheckCommand.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Execute the command, returning `Ok(())` on a successful parse.
    pub fn run(&self) -> Result<()> {
        valx::compile(&self.args.expression, valx::full())?;
        if self.args.verbose {
            eprintln!("expression is syntactically valid");
        }
        Ok(())
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self { args }
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Validate that an expression compiles"
    }

    fn help() -> &'static str {
        "Parses an expression under the full dialect set and reports whether \
         it is syntactically valid, without evaluating it."
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<()> {
    let command = CheckCommand::new(args);
    command.run()
}
