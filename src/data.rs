//! Data loading
//!
//! Handles loading equity curves and return series from CSV files for the
//! reporting CLI. The metric functions themselves never touch a file.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

use crate::series::EquityPoint;

/// Load a timestamped equity curve from a CSV file.
///
/// Expected layout: a header row, then `datetime,value` rows. Datetimes are
/// RFC 3339, `YYYY-MM-DD HH:MM:SS` (assumed UTC), or a bare `YYYY-MM-DD`.
pub fn load_equity_csv(path: impl AsRef<Path>) -> Result<Vec<EquityPoint>> {
    let mut reader = csv::Reader::from_path(path.as_ref()).context("Failed to open CSV file")?;

    let mut curve = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.context(format!("Failed to read row {}", row_idx + 1))?;

        let dt_str = record.get(0).context("Missing datetime column")?;
        let datetime =
            parse_datetime(dt_str).context(format!("Failed to parse datetime: {}", dt_str))?;

        let value: f64 = record
            .get(1)
            .context("Missing value column")?
            .trim()
            .parse()
            .context(format!("Failed to parse value in row {}", row_idx + 1))?;

        curve.push(EquityPoint { datetime, value });
    }

    info!(
        "Loaded {} equity points from {}",
        curve.len(),
        path.as_ref().display()
    );
    Ok(curve)
}

/// Load a plain period-return series from a CSV file.
///
/// Expected layout: a header row, then one fractional return per row (first
/// column).
pub fn load_returns_csv(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_path(path.as_ref()).context("Failed to open CSV file")?;

    let mut returns = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.context(format!("Failed to read row {}", row_idx + 1))?;

        let value: f64 = record
            .get(0)
            .context("Missing return column")?
            .trim()
            .parse()
            .context(format!("Failed to parse return in row {}", row_idx + 1))?;

        returns.push(value);
    }

    info!(
        "Loaded {} returns from {}",
        returns.len(),
        path.as_ref().display()
    );
    Ok(returns)
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc));
    }
    let date =
        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").context("Unrecognized datetime format")?;
    let ndt = date
        .and_hms_opt(0, 0, 0)
        .context("Invalid midnight timestamp")?;
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
}
