//! valx-par - the Language registry and the Pratt-style parser that
//! consumes it, producing `valx_eval::Evaluable` trees (§4.2, §4.3, §4.4).
//!
//! Parsing here has no separate AST stage: `parse_expression` builds
//! `Evaluable` closures directly, the way a tree-walking interpreter would,
//! except the tree is built once at compile time and walked many times at
//! evaluation time.

pub mod language;
pub mod operator;
pub mod parser;
pub mod path;
pub mod postfix;
pub mod stage;

pub use language::{InitHook, Language, PrefixHandler};
pub use operator::{
    ArbitraryFn, BooleanFn, DirectFn, InfixBuilder, InitiatedOperator, NumberFn, OperatorEntry, ShortCircuitFn, TextFn,
};
pub use parser::Parser;
pub use path::{index_value, select_key, VariableSelector};
pub use postfix::PostfixFn;
pub use valx_eval::{EvalError, ParseError, ParseErrorKind};
