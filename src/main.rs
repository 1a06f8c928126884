use analytics::{AnalyticsEngine, TradeFilter};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{Config, LoggingConfig, OutputFormat};
use core_types::{Outcome, Trade};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod render;

/// The main entry point for the Tradelens application.
fn main() -> Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance statistics for a trader's closed positions.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file (optional).
    #[arg(long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the analytics report of a JSON file of validated trades.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// JSON array of trade records.
    #[arg(long)]
    trades: PathBuf,

    /// Only include trades on this symbol (e.g., "EURUSD").
    #[arg(long)]
    symbol: Option<String>,

    /// Only include trades with this outcome.
    #[arg(long, value_enum)]
    outcome: Option<OutcomeArg>,

    /// Only include trades opened on or after this date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only include trades opened on or before this date (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Only include trades with at least this profit.
    #[arg(long, allow_hyphen_values = true)]
    min_profit: Option<Decimal>,

    /// Only include trades with at most this profit.
    #[arg(long, allow_hyphen_values = true)]
    max_profit: Option<Decimal>,

    /// Fail instead of printing a zeroed report when no trade is selected.
    #[arg(long)]
    require_non_empty: bool,

    /// Overrides the configured output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutcomeArg {
    Win,
    Loss,
    BreakEven,
}

impl From<OutcomeArg> for Outcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Win => Outcome::Win,
            OutcomeArg::Loss => Outcome::Loss,
            OutcomeArg::BreakEven => Outcome::BreakEven,
        }
    }
}

impl ReportArgs {
    fn filter(&self) -> TradeFilter {
        TradeFilter {
            symbol: self.symbol.clone(),
            outcome: self.outcome.map(Outcome::from),
            date_from: self.from,
            date_to: self.to,
            min_profit: self.min_profit,
            max_profit: self.max_profit,
        }
    }
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs, mut config: Config) -> Result<()> {
    if args.require_non_empty {
        config.analytics.require_non_empty = true;
    }
    let format = args.format.unwrap_or(config.output.format);

    let trades = read_trades(&args.trades)?;
    tracing::info!(count = trades.len(), path = %args.trades.display(), "Trades loaded");

    let engine = AnalyticsEngine::with_config(&config.analytics)?;
    let report = engine.calculate_filtered(&trades, &args.filter())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => println!("{}", render::summary_table(&report)),
    }

    Ok(())
}

fn read_trades(path: &Path) -> Result<Vec<Trade>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let trades = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse trades from {}", path.display()))?;
    Ok(trades)
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(
    logging: &LoggingConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid logging level")?;

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "tradelens.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}
