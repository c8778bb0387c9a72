//! Command modules for the valx CLI.
//!
//! This module contains implementations for all available subcommands.
//! Each subcommand is implemented in its own file following a standardized pattern.

pub mod common;
pub mod traits;

pub mod check;
pub mod eval;

pub use check::{run_check, CheckArgs};
pub use eval::{run_eval, EvalArgs};
