//! valx-eval - the value model and compiled evaluable closures.
//!
//! This crate has no notion of syntax: it defines what an expression
//! compiles *to* (`Evaluable`), what it computes *over* (`Value`), the
//! cancellation handle threaded through every evaluation (`EvalContext`),
//! and the error taxonomy. `valx-par` depends on this crate to build
//! `Evaluable` trees; it never depends back.

pub mod context;
pub mod error;
pub mod evaluable;
pub mod value;

pub use context::{CancelHandle, EvalContext};
pub use error::{EvalError, ParseError, ParseErrorKind};
pub use evaluable::Evaluable;
pub use value::{format_number, NativeFn, Selector, Value};
