//! Structured errors surfaced by the rule engine.
//!
//! All errors are recoverable at the caller; the engine never retries and
//! never logs (logging, if any, belongs to the caller).

use thiserror::Error;

/// Errors surfaced by [`crate::analyze`], [`crate::scan_one`], and
/// [`crate::resolve`].
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// `stdev <= 0.0`, or either `mean` or `stdev` is non-finite.
    #[error("invalid stats: mean and stdev must be finite and stdev must be > 0")]
    InvalidStats,

    /// A sample in the series is NaN or infinite.
    #[error("invalid series: sample at index {0} is not finite")]
    InvalidSeries(usize),

    /// Programmer error: a malformed catalog or a signal that violates the
    /// `start < end <= n` invariant reached the resolver.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
