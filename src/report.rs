//! Aggregated performance reporting
//!
//! Computes every metric the engine offers over one return series and
//! collects the results into a single serializable record. Ratios whose
//! denominators are degenerate for the given series (a flat series has no
//! deviation, a monotone curve has no drawdown) are reported as `None`
//! instead of failing the whole report.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};
use crate::metrics::{self, DEFAULT_PERIODS_PER_YEAR};
use crate::series::{self, EquityPoint};

/// Report parameters using builder pattern
#[derive(Debug, Clone)]
pub struct ReportConfig<'a> {
    pub periods_per_year: usize,
    pub risk_free_rate: Option<f64>,
    pub alpha: f64,
    pub years: Option<f64>,
    pub benchmark: Option<&'a [f64]>,
}

impl Default for ReportConfig<'_> {
    fn default() -> Self {
        Self {
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            risk_free_rate: None,
            alpha: 0.05,
            years: None,
            benchmark: None,
        }
    }
}

impl<'a> ReportConfig<'a> {
    /// Set the annualization factor (periods per year)
    pub fn with_periods_per_year(mut self, periods: usize) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Set the per-period risk-free rate
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Set the tail fraction for VaR and CVaR
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the time span in years, enabling the CAGR field
    pub fn with_years(mut self, years: f64) -> Self {
        self.years = Some(years);
        self
    }

    /// Set an index-aligned benchmark series, enabling the beta field
    pub fn with_benchmark(mut self, benchmark: &'a [f64]) -> Self {
        self.benchmark = Some(benchmark);
        self
    }
}

/// Portfolio statistics over one return series.
///
/// `None` marks a statistic whose denominator is degenerate for this series,
/// or one whose inputs (years, benchmark) were not supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub initial_value: f64,
    pub final_value: f64,
    pub cumulative_return: f64,
    pub cagr: Option<f64>,
    pub sharpe: Option<f64>,
    pub sortino: Option<f64>,
    pub calmar: Option<f64>,
    pub annualized_volatility: f64,
    pub beta: Option<f64>,
    pub max_drawdown: f64,
    pub value_at_risk: f64,
    pub conditional_value_at_risk: Option<f64>,
    pub alpha: f64,
    pub periods_per_year: usize,
    pub num_periods: usize,
}

impl PerformanceReport {
    /// Build a report from an initial account value and a period-return
    /// series.
    pub fn from_returns(
        initial_value: f64,
        returns: &[f64],
        config: &ReportConfig<'_>,
    ) -> MetricsResult<Self> {
        if returns.is_empty() {
            return Err(MetricsError::InvalidInput("return series is empty"));
        }
        if initial_value == 0.0 {
            return Err(MetricsError::InvalidInput("initial value must be nonzero"));
        }

        let wealth: f64 = returns.iter().fold(1.0, |acc, r| acc * (1.0 + r));
        let final_value = initial_value * wealth;

        let n = config.periods_per_year;
        let cagr = match config.years {
            Some(years) => degenerate_to_none(metrics::cagr(initial_value, final_value, years))?,
            None => None,
        };
        let beta = match config.benchmark {
            Some(benchmark) => degenerate_to_none(metrics::beta(returns, benchmark))?,
            None => None,
        };

        Ok(Self {
            initial_value,
            final_value,
            cumulative_return: metrics::cumulative_return(initial_value, final_value)?,
            cagr,
            sharpe: degenerate_to_none(metrics::sharpe(returns, n, config.risk_free_rate))?,
            sortino: degenerate_to_none(metrics::sortino(returns, n, config.risk_free_rate))?,
            calmar: degenerate_to_none(metrics::calmar(returns, n))?,
            annualized_volatility: metrics::volatility(returns, Some(n))?,
            beta,
            max_drawdown: metrics::max_drawdown(returns)?,
            value_at_risk: metrics::value_at_risk(initial_value, returns, config.alpha)?,
            conditional_value_at_risk: degenerate_to_none(metrics::conditional_value_at_risk(
                initial_value,
                returns,
                config.alpha,
            ))?,
            alpha: config.alpha,
            periods_per_year: n,
            num_periods: returns.len(),
        })
    }

    /// Build a report from a timestamped equity curve. The time span of the
    /// curve supplies the CAGR horizon unless the config pins one.
    pub fn from_curve(curve: &[EquityPoint], config: &ReportConfig<'_>) -> MetricsResult<Self> {
        let returns = series::period_returns_from_curve(curve)?;
        let initial_value = curve[0].value;
        match (config.years, series::years_spanned(curve)) {
            (None, Some(years)) => {
                let config = config.clone().with_years(years);
                Self::from_returns(initial_value, &returns, &config)
            }
            _ => Self::from_returns(initial_value, &returns, config),
        }
    }
}

/// Keep `InvalidInput` fatal but turn a degenerate denominator into `None`.
fn degenerate_to_none(result: MetricsResult<f64>) -> MetricsResult<Option<f64>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(MetricsError::DivideByZero(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
