//! Core error types for the valx-util crate
//!
//! This module defines error types used throughout the util crate.

use thiserror::Error;

/// Error type for span and source-location operations
#[derive(Debug, Error)]
pub enum UtilError {
    /// Invalid span range
    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },

    /// Span out of bounds for the source it was created against
    #[error("span out of bounds: source has {source_len} bytes, span is {span_start}..{span_end}")]
    SpanOutOfBounds {
        source_len: usize,
        span_start: usize,
        span_end: usize,
    },
}

/// Result type alias for util operations
pub type UtilResult<T> = std::result::Result<T, UtilError>;
