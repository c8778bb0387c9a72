//! valx-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This module provides fundamental utilities and types that form the
//! foundation of the valx expression engine. These utilities are designed to
//! be zero-cost abstractions that improve code clarity and type safety
//! without runtime overhead.
//!
//! Today this is limited to source-location tracking ([`span::Span`]) and a
//! handful of small error enums shared by the lexer, parser and evaluator
//! crates. As valx grows, utilities that are genuinely shared across those
//! crates belong here; utilities specific to one phase belong in that phase's
//! own crate.

pub mod error;
pub mod span;

pub use error::{UtilError, UtilResult};
pub use span::{FileId, Span};
