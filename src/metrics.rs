//! Portfolio performance and risk statistics
//!
//! Free functions over period-return series: risk-adjusted return ratios
//! (Sharpe, Sortino, Calmar), dispersion (volatility, variance, beta),
//! historical-simulation tail estimators (VaR, CVaR), and drawdown.
//!
//! All summations run left to right over the input slice, so results are
//! bit-reproducible for identical inputs. Degenerate denominators surface
//! as [`MetricsError::DivideByZero`] rather than IEEE infinities or NaNs.

use itertools::Itertools;
use tracing::warn;

use crate::error::{MetricsError, MetricsResult};

/// Annualization factor for daily trading periods.
pub const DEFAULT_PERIODS_PER_YEAR: usize = 252;

/// Compound annual growth rate: `(end / start)^(1 / years) - 1`.
///
/// A shrinking account has no meaningful growth rate; that case logs a
/// warning and returns `0.0`.
pub fn cagr(start_value: f64, end_value: f64, years: f64) -> MetricsResult<f64> {
    if years <= 0.0 {
        return Err(MetricsError::InvalidInput("years must be positive"));
    }
    if start_value == 0.0 {
        return Err(MetricsError::DivideByZero("start value"));
    }
    if end_value < start_value {
        warn!(
            start_value,
            end_value, "end value below start value makes CAGR meaningless, returning 0"
        );
        return Ok(0.0);
    }
    Ok((end_value / start_value).powf(1.0 / years) - 1.0)
}

/// Fractional gain or loss between two account values.
pub fn cumulative_return(start_value: f64, end_value: f64) -> MetricsResult<f64> {
    if start_value == 0.0 {
        return Err(MetricsError::DivideByZero("start value"));
    }
    Ok((end_value - start_value) / start_value)
}

/// Sharpe ratio: excess mean return over full-series deviation, scaled by
/// `sqrt(periods)`.
pub fn sharpe(returns: &[f64], periods: usize, risk_free_rate: Option<f64>) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    let excess = mean(returns) - risk_free_rate.unwrap_or(0.0);
    let std_dev = population_std(returns);
    if std_dev == 0.0 {
        return Err(MetricsError::DivideByZero("standard deviation of returns"));
    }
    Ok(excess / std_dev * (periods as f64).sqrt())
}

/// Sortino ratio: like [`sharpe`], but the denominator is the deviation of
/// the losing periods only.
///
/// A series with no losing periods has no downside deviation and fails with
/// [`MetricsError::DivideByZero`].
pub fn sortino(returns: &[f64], periods: usize, risk_free_rate: Option<f64>) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    let excess = mean(returns) - risk_free_rate.unwrap_or(0.0);
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let downside_std = if downside.is_empty() {
        0.0
    } else {
        population_std(&downside)
    };
    if downside_std == 0.0 {
        return Err(MetricsError::DivideByZero("downside deviation"));
    }
    Ok(excess / downside_std * (periods as f64).sqrt())
}

/// Calmar ratio: annualized mean return over the magnitude of the worst
/// drawdown of the same series.
pub fn calmar(returns: &[f64], periods: usize) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    let worst = max_drawdown(returns)?;
    if worst == 0.0 {
        return Err(MetricsError::DivideByZero("max drawdown"));
    }
    Ok(mean(returns) * (periods as f64).sqrt() / worst.abs())
}

/// Standard deviation of returns, annualized by `sqrt(periods)` when a
/// factor is given.
pub fn volatility(returns: &[f64], periods: Option<usize>) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    let std_dev = population_std(returns);
    Ok(match periods {
        Some(n) => std_dev * (n as f64).sqrt(),
        None => std_dev,
    })
}

/// Population variance of returns, with the same `sqrt(periods)` scaling as
/// [`volatility`].
pub fn variance(returns: &[f64], periods: Option<usize>) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    let var = population_variance(returns);
    Ok(match periods {
        Some(n) => var * (n as f64).sqrt(),
        None => var,
    })
}

/// Beta of a return series against an index-aligned benchmark: sample
/// covariance over the benchmark's standard deviation.
pub fn beta(returns: &[f64], benchmark: &[f64]) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    if returns.len() != benchmark.len() {
        return Err(MetricsError::InvalidInput(
            "return and benchmark series differ in length",
        ));
    }
    if returns.len() < 2 {
        return Err(MetricsError::InvalidInput(
            "beta requires at least two observations",
        ));
    }
    let mean_r = mean(returns);
    let mean_b = mean(benchmark);
    let covariance = returns
        .iter()
        .zip(benchmark)
        .map(|(r, b)| (r - mean_r) * (b - mean_b))
        .sum::<f64>()
        / (returns.len() - 1) as f64;
    let bench_std = population_std(benchmark);
    if bench_std == 0.0 {
        return Err(MetricsError::DivideByZero("benchmark standard deviation"));
    }
    Ok(covariance / bench_std)
}

/// Historical-simulation value at risk.
///
/// Sorts the returns ascending and takes the one at rank
/// `floor(alpha * count)`, clamped to the last valid index; the result is
/// its magnitude scaled by `initial_value`.
pub fn value_at_risk(initial_value: f64, returns: &[f64], alpha: f64) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    ensure_alpha(alpha)?;
    let sorted: Vec<f64> = returns.iter().copied().sorted_by(f64::total_cmp).collect();
    let index = tail_index(alpha, sorted.len()).min(sorted.len() - 1);
    Ok(initial_value * sorted[index].abs())
}

/// Historical-simulation conditional value at risk: the magnitude of the
/// mean of the sorted returns below the `alpha` cutoff, scaled by
/// `initial_value`.
///
/// When `floor(alpha * count)` is zero the tail holds no samples and the
/// average is undefined; that case fails with
/// [`MetricsError::DivideByZero`].
pub fn conditional_value_at_risk(
    initial_value: f64,
    returns: &[f64],
    alpha: f64,
) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    ensure_alpha(alpha)?;
    let sorted: Vec<f64> = returns.iter().copied().sorted_by(f64::total_cmp).collect();
    let index = tail_index(alpha, sorted.len());
    if index == 0 {
        return Err(MetricsError::DivideByZero("cvar tail"));
    }
    let tail_mean = sorted[..index].iter().sum::<f64>() / index as f64;
    Ok(initial_value * tail_mean.abs())
}

/// Worst peak-to-trough decline of the cumulative wealth curve, as a
/// non-positive fraction. A series that never declines yields `0.0`.
pub fn max_drawdown(returns: &[f64]) -> MetricsResult<f64> {
    ensure_non_empty(returns)?;
    let mut wealth = 1.0_f64;
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for r in returns {
        wealth *= 1.0 + r;
        if wealth > peak {
            peak = wealth;
        }
        let drawdown = wealth / peak - 1.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }
    Ok(worst)
}

// =============================================================================
// Helpers
// =============================================================================

/// Caller guarantees a non-empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Rank of the `alpha` cutoff in a sorted series of `count` returns.
fn tail_index(alpha: f64, count: usize) -> usize {
    (alpha * count as f64) as usize
}

fn ensure_non_empty(returns: &[f64]) -> MetricsResult<()> {
    if returns.is_empty() {
        return Err(MetricsError::InvalidInput("return series is empty"));
    }
    Ok(())
}

fn ensure_alpha(alpha: f64) -> MetricsResult<()> {
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err(MetricsError::InvalidInput("alpha must be in (0, 1)"));
    }
    Ok(())
}
