//! Return-series derivation
//!
//! Turns account-value snapshots (an equity curve) into the period-return
//! series the metric functions consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};

/// One account-value snapshot on the equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub datetime: DateTime<Utc>,
    pub value: f64,
}

impl EquityPoint {
    pub fn new(datetime: DateTime<Utc>, value: f64) -> Self {
        Self { datetime, value }
    }
}

/// Fractional change between each consecutive pair of account values.
///
/// A curve of N points yields N-1 returns. Fails on fewer than two points,
/// or on a zero snapshot (the following return has a zero denominator).
pub fn period_returns(values: &[f64]) -> MetricsResult<Vec<f64>> {
    if values.len() < 2 {
        return Err(MetricsError::InvalidInput(
            "equity curve needs at least two points",
        ));
    }
    values
        .windows(2)
        .map(|w| {
            if w[0] == 0.0 {
                return Err(MetricsError::DivideByZero("equity snapshot"));
            }
            Ok((w[1] - w[0]) / w[0])
        })
        .collect()
}

/// [`period_returns`] over timestamped equity points.
pub fn period_returns_from_curve(curve: &[EquityPoint]) -> MetricsResult<Vec<f64>> {
    let values: Vec<f64> = curve.iter().map(|p| p.value).collect();
    period_returns(&values)
}

/// Time spanned by an equity curve, in fractional years.
///
/// `None` when the curve has fewer than two points or no forward time span.
pub fn years_spanned(curve: &[EquityPoint]) -> Option<f64> {
    let first = curve.first()?;
    let last = curve.last()?;
    let seconds = (last.datetime - first.datetime).num_seconds();
    if seconds <= 0 {
        return None;
    }
    Some(seconds as f64 / (365.25 * 24.0 * 3600.0))
}
