//! Error types for the metrics engine

use thiserror::Error;

/// Errors raised by the metric functions.
///
/// Degenerate denominators are reported as [`MetricsError::DivideByZero`]
/// instead of letting IEEE infinities or NaNs leak out, so callers can tell
/// degenerate input apart from a legitimate near-zero result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Input that leaves the statistic undefined before any arithmetic runs:
    /// an empty series, non-positive years, mismatched series lengths.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A computed denominator came out exactly zero. The payload names it.
    #[error("division by zero: {0} is zero")]
    DivideByZero(&'static str),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
