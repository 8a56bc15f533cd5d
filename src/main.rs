//! Portfolio metrics - main entry point
//!
//! This binary provides one subcommand:
//! - report: Compute a performance report from an equity-curve or return CSV

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "portfolio-metrics")]
#[command(about = "Portfolio performance and risk metrics for trading strategies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a performance report over a CSV series
    Report {
        /// Path to the input CSV (datetime,value rows; or one return per row
        /// with --returns)
        #[arg(short, long)]
        file: String,

        /// Treat the input as a period-return series instead of an equity
        /// curve
        #[arg(long)]
        returns: bool,

        /// Path to a benchmark return CSV for beta (same length as the
        /// primary series)
        #[arg(short, long)]
        benchmark: Option<String>,

        /// Initial account value (required with --returns)
        #[arg(long, default_value_t = 10_000.0)]
        initial: f64,

        /// Periods per year for annualization
        #[arg(long, default_value_t = portfolio_metrics::DEFAULT_PERIODS_PER_YEAR)]
        periods: usize,

        /// Per-period risk-free rate
        #[arg(long)]
        risk_free: Option<f64>,

        /// Tail fraction for VaR and CVaR
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Report {
            file,
            returns,
            benchmark,
            initial,
            periods,
            risk_free,
            alpha,
            json,
        } => commands::report::run(
            file, returns, benchmark, initial, periods, risk_free, alpha, json,
        ),
    }
}
