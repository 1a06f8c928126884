use crate::distribution::Histogram;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-symbol summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolStats {
    pub trade_count: usize,
    pub net_profit: Decimal,
    pub win_rate_pct: Decimal,
    pub average_profit: Decimal,
}

/// Summary of the trades opened on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub trade_count: usize,
    pub net_profit: Decimal,
    pub win_rate_pct: Decimal,
    /// The lowest single-trade profit of the day.
    pub worst_trade: Decimal,
}

/// Summary of the trades opened in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// Formatted as `YYYY-MM`.
    pub month: String,
    pub trade_count: usize,
    pub net_profit: Decimal,
    pub win_rate_pct: Decimal,
    pub best_day: NaiveDate,
    pub worst_day: NaiveDate,
}

/// Summary of the trades opened in one hour of the day (0-23), across all days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyStats {
    pub hour: u32,
    pub trade_count: usize,
    pub net_profit: Decimal,
    pub win_rate_pct: Decimal,
    pub average_profit: Decimal,
}

/// The complete statistics of one trade collection.
///
/// This struct is the final output of the `AnalyticsEngine` and is handed to the
/// presentation layer as-is. Every figure is defined for every input, including an
/// empty collection, which yields the zeroed report from [`AnalyticsReport::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    // I. Trade Counts
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub break_even_trades: usize,

    // II. Profit & Loss
    pub total_profit: Decimal,
    pub gross_profit: Decimal,
    /// Magnitude of the summed losses.
    pub gross_loss: Decimal,
    pub average_profit: Decimal,
    pub average_win: Decimal,
    pub average_loss: Decimal,

    // III. Ratios
    pub win_rate_pct: Decimal,
    pub profit_factor: Option<Decimal>, // None when there are gains but no losses
    pub payoff_ratio: Option<Decimal>,  // None when there are no losing trades

    // IV. Drawdown
    pub max_drawdown: Decimal,
    pub max_drawdown_pct: Decimal,
    pub current_drawdown: Decimal,

    // V. Streaks
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub current_streak: i64,

    // VI. Breakdowns
    pub symbol_stats: BTreeMap<String, SymbolStats>,
    pub best_day: Option<NaiveDate>,
    pub best_day_profit: Decimal,
    pub worst_day: Option<NaiveDate>,
    pub worst_day_profit: Decimal,
    pub best_hour: Option<u32>,
    /// Mean profit per trade of `best_hour`.
    pub best_hour_profit: Decimal,
    pub hourly_stats: Vec<HourlyStats>,
    pub daily_stats: Vec<DailyStats>,
    pub monthly_stats: Vec<MonthlyStats>,

    // VII. Series
    pub equity_curve: Vec<Decimal>,
    pub equity_dates: Vec<DateTime<Utc>>,
    pub drawdown_curve: Vec<Decimal>,

    // VIII. Distributions
    pub profit_distribution: Histogram,
    pub duration_distribution: Histogram,
    #[serde(with = "humantime_serde")]
    pub average_holding_period: Duration,

    // IX. Period
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,
    pub total_days: i64,
}

impl AnalyticsReport {
    /// Creates a zeroed report carrying the given (empty) histogram layouts.
    pub fn new(profit_distribution: Histogram, duration_distribution: Histogram) -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            break_even_trades: 0,
            total_profit: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            average_profit: Decimal::ZERO,
            average_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            win_rate_pct: Decimal::ZERO,
            profit_factor: Some(Decimal::ZERO),
            payoff_ratio: None,
            max_drawdown: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
            current_drawdown: Decimal::ZERO,
            longest_win_streak: 0,
            longest_loss_streak: 0,
            current_streak: 0,
            symbol_stats: BTreeMap::new(),
            best_day: None,
            best_day_profit: Decimal::ZERO,
            worst_day: None,
            worst_day_profit: Decimal::ZERO,
            best_hour: None,
            best_hour_profit: Decimal::ZERO,
            hourly_stats: Vec::new(),
            daily_stats: Vec::new(),
            monthly_stats: Vec::new(),
            equity_curve: Vec::new(),
            equity_dates: Vec::new(),
            drawdown_curve: Vec::new(),
            profit_distribution,
            duration_distribution,
            average_holding_period: Duration::ZERO,
            period_start: None,
            period_end: None,
            total_days: 0,
        }
    }
}
