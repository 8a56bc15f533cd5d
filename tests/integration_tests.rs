//! Integration tests for the portfolio-metrics crate
//!
//! These tests exercise the full path from equity data through return
//! derivation to the metric functions and the aggregated report.

use approx::assert_relative_eq;
use chrono::{Duration, Utc};

use portfolio_metrics::{data, metrics, series, EquityPoint, MetricsError, PerformanceReport, ReportConfig};

// =============================================================================
// Test Utilities
// =============================================================================

/// Generate a deterministic mixed return series (gains and losses).
fn generate_return_series(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| match i % 4 {
            0 => 0.012,
            1 => -0.008,
            2 => 0.005,
            _ => -0.003,
        })
        .collect()
}

/// Build a daily equity curve by compounding a return series from a starting
/// value.
fn build_equity_curve(initial: f64, returns: &[f64]) -> Vec<EquityPoint> {
    let start = Utc::now();
    let mut curve = vec![EquityPoint::new(start, initial)];
    let mut value = initial;
    for (i, r) in returns.iter().enumerate() {
        value *= 1.0 + r;
        curve.push(EquityPoint::new(
            start + Duration::days(i as i64 + 1),
            value,
        ));
    }
    curve
}

// =============================================================================
// Series -> Engine pipeline
// =============================================================================

#[test]
fn test_curve_round_trips_to_original_returns() {
    let returns = generate_return_series(40);
    let curve = build_equity_curve(25_000.0, &returns);
    let derived = series::period_returns_from_curve(&curve).unwrap();

    assert_eq!(derived.len(), returns.len());
    for (d, r) in derived.iter().zip(&returns) {
        assert_relative_eq!(*d, *r, max_relative = 1e-9);
    }
}

#[test]
fn test_flat_curve_has_zero_cumulative_return() {
    let curve = build_equity_curve(10_000.0, &[0.0, 0.0, 0.0]);
    let report = PerformanceReport::from_curve(&curve, &ReportConfig::default()).unwrap();

    assert_eq!(report.cumulative_return, 0.0);
    assert_eq!(report.max_drawdown, 0.0);
    // no dispersion anywhere on a flat curve
    assert_eq!(report.sharpe, None);
    assert_eq!(report.sortino, None);
    assert_eq!(report.calmar, None);
}

#[test]
fn test_drawdown_agrees_between_curve_and_returns() {
    let returns = [0.0, -0.5, 0.0];
    let curve = build_equity_curve(1_000.0, &returns);
    let derived = series::period_returns_from_curve(&curve).unwrap();

    // wealth curve [1, 0.5, 0.5] -> worst drawdown -0.5 either way
    assert_relative_eq!(
        metrics::max_drawdown(&derived).unwrap(),
        metrics::max_drawdown(&returns).unwrap(),
        max_relative = 1e-9
    );
    assert_relative_eq!(
        metrics::max_drawdown(&returns).unwrap(),
        -0.5,
        max_relative = 1e-12
    );
}

#[test]
fn test_winning_series_has_no_sortino() {
    let returns = [0.01, 0.02, 0.015, 0.005];
    assert_eq!(
        metrics::sortino(&returns, 252, None),
        Err(MetricsError::DivideByZero("downside deviation"))
    );

    // the report maps the degenerate denominator to None instead
    let report =
        PerformanceReport::from_returns(10_000.0, &returns, &ReportConfig::default()).unwrap();
    assert_eq!(report.sortino, None);
    assert!(report.sharpe.is_some());
}

#[test]
fn test_report_matches_engine_functions() {
    let returns = generate_return_series(60);
    let config = ReportConfig::default().with_alpha(0.25);
    let report = PerformanceReport::from_returns(50_000.0, &returns, &config).unwrap();

    assert_eq!(
        report.sharpe.unwrap(),
        metrics::sharpe(&returns, 252, None).unwrap()
    );
    assert_eq!(
        report.max_drawdown,
        metrics::max_drawdown(&returns).unwrap()
    );
    assert_eq!(
        report.value_at_risk,
        metrics::value_at_risk(50_000.0, &returns, 0.25).unwrap()
    );
    assert_eq!(
        report.conditional_value_at_risk.unwrap(),
        metrics::conditional_value_at_risk(50_000.0, &returns, 0.25).unwrap()
    );
}

#[test]
fn test_benchmark_beta_through_report() {
    let returns = generate_return_series(30);
    let benchmark: Vec<f64> = returns.iter().map(|r| r * 0.5).collect();
    let config = ReportConfig::default().with_benchmark(&benchmark);
    let report = PerformanceReport::from_returns(10_000.0, &returns, &config).unwrap();

    let direct = metrics::beta(&returns, &benchmark).unwrap();
    assert_eq!(report.beta, Some(direct));

    let scaled: Vec<f64> = returns.iter().map(|r| r * 2.0).collect();
    assert_relative_eq!(
        metrics::beta(&scaled, &benchmark).unwrap(),
        2.0 * direct,
        max_relative = 1e-9
    );
}

// =============================================================================
// CSV -> Report pipeline
// =============================================================================

#[test]
fn test_csv_to_report_end_to_end() {
    use std::io::Write;

    let path = std::env::temp_dir().join("portfolio_metrics_integration_curve.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "datetime,value").unwrap();
    let start = Utc::now() - Duration::days(400);
    let mut value = 10_000.0;
    for (i, r) in generate_return_series(365).iter().enumerate() {
        writeln!(
            file,
            "{},{:.6}",
            (start + Duration::days(i as i64)).format("%Y-%m-%dT%H:%M:%SZ"),
            value
        )
        .unwrap();
        value *= 1.0 + r;
    }
    drop(file);

    let curve = data::load_equity_csv(&path).unwrap();
    assert_eq!(curve.len(), 365);

    let report = PerformanceReport::from_curve(&curve, &ReportConfig::default()).unwrap();
    assert_eq!(report.num_periods, 364);
    // the curve spans about a year, so the report carries a CAGR
    assert!(report.cagr.is_some());
    assert!(report.max_drawdown <= 0.0);
    assert!(report.annualized_volatility > 0.0);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: PerformanceReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.final_value, report.final_value);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_returns_csv_to_report_end_to_end() {
    use std::io::Write;

    let path = std::env::temp_dir().join("portfolio_metrics_integration_returns.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "return").unwrap();
    for r in generate_return_series(100) {
        writeln!(file, "{}", r).unwrap();
    }
    drop(file);

    let returns = data::load_returns_csv(&path).unwrap();
    let report =
        PerformanceReport::from_returns(10_000.0, &returns, &ReportConfig::default()).unwrap();

    assert_eq!(report.num_periods, 100);
    assert_eq!(report.cagr, None);

    std::fs::remove_file(path).ok();
}
