use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Profit histogram edges used when `analytics.profit_bins` is not configured.
pub const DEFAULT_PROFIT_BINS: [Decimal; 7] = [
    dec!(-1000),
    dec!(-500),
    dec!(-100),
    dec!(0),
    dec!(100),
    dec!(500),
    dec!(1000),
];

/// Holding-time histogram edges, in minutes, used when `analytics.duration_bins` is not configured.
pub const DEFAULT_DURATION_BINS: [Decimal; 6] =
    [dec!(30), dec!(60), dec!(120), dec!(240), dec!(480), dec!(1440)];

/// Parameters that shape how a report is computed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// When set, an empty trade collection is an error instead of a zeroed report.
    pub require_non_empty: bool,
    /// Interior edges of the per-trade profit histogram. The outer bins are open-ended.
    pub profit_bins: Vec<Decimal>,
    /// Interior edges of the holding-time histogram, in minutes. The first bin starts at 0.
    pub duration_bins: Vec<Decimal>,
}

/// Parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How the binary renders a finished report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

// --- Default Implementations ---
// These allow a user to omit any section from their toml and still get
// the histogram layout the dashboard expects.

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            require_non_empty: false,
            profit_bins: DEFAULT_PROFIT_BINS.to_vec(),
            duration_bins: DEFAULT_DURATION_BINS.to_vec(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects settings that would make a report ill-defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics.validate()
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_increasing("analytics.profit_bins", &self.profit_bins)?;
        ensure_increasing("analytics.duration_bins", &self.duration_bins)?;
        if self.duration_bins.first().is_some_and(|edge| *edge <= Decimal::ZERO) {
            return Err(ConfigError::ValidationError(
                "analytics.duration_bins must only contain positive edges".to_string(),
            ));
        }
        Ok(())
    }
}

fn ensure_increasing(name: &str, edges: &[Decimal]) -> Result<(), ConfigError> {
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::ValidationError(format!(
            "{name} must be strictly increasing, got {edges:?}"
        )));
    }
    Ok(())
}
