//! Report command implementation

use anyhow::{Context, Result};
use tracing::info;

use portfolio_metrics::{data, series, PerformanceReport, ReportConfig};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: String,
    treat_as_returns: bool,
    benchmark_path: Option<String>,
    initial: f64,
    periods: usize,
    risk_free: Option<f64>,
    alpha: f64,
    json: bool,
) -> Result<()> {
    info!("Computing performance report for {}", file);

    let benchmark = match &benchmark_path {
        Some(path) => Some(
            data::load_returns_csv(path)
                .context(format!("Failed to load benchmark from {}", path))?,
        ),
        None => None,
    };

    let mut config = ReportConfig::default()
        .with_periods_per_year(periods)
        .with_alpha(alpha);
    if let Some(rate) = risk_free {
        config = config.with_risk_free_rate(rate);
    }
    if let Some(bench) = benchmark.as_deref() {
        config = config.with_benchmark(bench);
    }

    let report = if treat_as_returns {
        let returns =
            data::load_returns_csv(&file).context(format!("Failed to load returns from {}", file))?;
        PerformanceReport::from_returns(initial, &returns, &config)?
    } else {
        let curve = data::load_equity_csv(&file)
            .context(format!("Failed to load equity curve from {}", file))?;
        info!(
            "Curve spans {:.2} years",
            series::years_spanned(&curve).unwrap_or(0.0)
        );
        PerformanceReport::from_curve(&curve, &config)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    info!("Report completed");

    Ok(())
}

fn print_report(report: &PerformanceReport) {
    println!("\n{}", "=".repeat(60));
    println!("PERFORMANCE REPORT");
    println!("{}", "=".repeat(60));
    println!("Initial Value:       {:.2}", report.initial_value);
    println!("Final Value:         {:.2}", report.final_value);
    println!(
        "Cumulative Return:   {:.2}%",
        report.cumulative_return * 100.0
    );
    println!("CAGR:                {}", pct_or_na(report.cagr));
    println!("Sharpe Ratio:        {}", num_or_na(report.sharpe));
    println!("Sortino Ratio:       {}", num_or_na(report.sortino));
    println!("Calmar Ratio:        {}", num_or_na(report.calmar));
    println!(
        "Ann. Volatility:     {:.2}%",
        report.annualized_volatility * 100.0
    );
    println!("Beta:                {}", num_or_na(report.beta));
    println!("Max Drawdown:        {:.2}%", report.max_drawdown * 100.0);
    println!(
        "VaR ({:.0}%):           {:.2}",
        report.alpha * 100.0,
        report.value_at_risk
    );
    println!(
        "CVaR ({:.0}%):          {}",
        report.alpha * 100.0,
        num_or_na(report.conditional_value_at_risk)
    );
    println!("Periods:             {}", report.num_periods);
    println!("Periods / Year:      {}", report.periods_per_year);
    println!("{}", "=".repeat(60));
}

fn num_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

fn pct_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "n/a".to_string(),
    }
}
