use crate::distribution::Histogram;
use crate::error::AnalyticsError;
use crate::filter::TradeFilter;
use crate::grouping::{self, mean, win_rate_pct};
use crate::report::AnalyticsReport;
use crate::sequencer;
use crate::series::EquitySeries;
use crate::streaks::StreakSummary;
use configuration::AnalyticsConfig;
use core_types::{Outcome, Trade};
use rust_decimal::Decimal;
use std::time::Duration;

/// A stateless calculator for deriving performance statistics from closed trades.
///
/// The engine holds only its configuration, so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    require_non_empty: bool,
    profit_layout: Histogram,
    duration_layout: Histogram,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            require_non_empty: false,
            profit_layout: Histogram::default_profits(),
            duration_layout: Histogram::default_durations(),
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        Ok(Self {
            require_non_empty: config.require_non_empty,
            profit_layout: Histogram::with_edges(None, &config.profit_bins)?,
            duration_layout: Histogram::with_edges(Some(Decimal::ZERO), &config.duration_bins)?,
        })
    }

    /// The main entry point for calculating a report.
    ///
    /// # Arguments
    ///
    /// * `trades` - The closed trades, in any order.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AnalyticsReport` or an `AnalyticsError`. An empty
    /// collection yields a zeroed report unless the engine requires non-empty input.
    #[tracing::instrument(name = "analytics_calculate", skip(self, trades), fields(trades = trades.len()))]
    pub fn calculate(&self, trades: &[Trade]) -> Result<AnalyticsReport, AnalyticsError> {
        let ordered = sequencer::sequence(trades)?;

        let mut report =
            AnalyticsReport::new(self.profit_layout.clone(), self.duration_layout.clone());

        if ordered.is_empty() {
            if self.require_non_empty {
                return Err(AnalyticsError::EmptyReport);
            }
            return Ok(report);
        }

        self.calculate_profitability(&ordered, &mut report);
        self.calculate_series(&ordered, &mut report);
        self.calculate_streaks(&ordered, &mut report);
        self.calculate_breakdowns(&ordered, &mut report);
        self.calculate_distributions(&ordered, &mut report);
        self.calculate_period(&ordered, &mut report);

        tracing::info!(
            total_trades = report.total_trades,
            total_profit = %report.total_profit,
            win_rate_pct = %report.win_rate_pct,
            max_drawdown = %report.max_drawdown,
            "Analytics report calculated"
        );

        Ok(report)
    }

    /// Applies `filter` and calculates the report of the remaining trades.
    ///
    /// The whole collection is validated first, so a malformed trade is reported even
    /// when the filter would have excluded it.
    pub fn calculate_filtered(
        &self,
        trades: &[Trade],
        filter: &TradeFilter,
    ) -> Result<AnalyticsReport, AnalyticsError> {
        if filter.is_empty() {
            return self.calculate(trades);
        }
        sequencer::sequence(trades)?;
        let selected = filter.apply(trades);
        tracing::debug!(
            selected = selected.len(),
            total = trades.len(),
            "Trade filter applied"
        );
        self.calculate(&selected)
    }

    /// Counts, sums and the ratios derived from them.
    fn calculate_profitability(&self, trades: &[&Trade], report: &mut AnalyticsReport) {
        report.total_trades = trades.len();

        for trade in trades {
            report.total_profit += trade.profit;
            match trade.outcome() {
                Outcome::Win => {
                    report.winning_trades += 1;
                    report.gross_profit += trade.profit;
                }
                Outcome::Loss => {
                    report.losing_trades += 1;
                    report.gross_loss += trade.profit.abs();
                }
                Outcome::BreakEven => report.break_even_trades += 1,
            }
        }

        // --- Ratios ---
        report.win_rate_pct = win_rate_pct(report.winning_trades, report.total_trades);
        report.average_profit = mean(report.total_profit, report.total_trades);
        report.average_win = mean(report.gross_profit, report.winning_trades);
        report.average_loss = mean(report.gross_loss, report.losing_trades);

        // Gains without losses have no finite profit factor and are reported as N/A,
        // as is a quotient too large to represent.
        report.profit_factor = if report.gross_loss > Decimal::ZERO {
            report.gross_profit.checked_div(report.gross_loss)
        } else if report.gross_profit > Decimal::ZERO {
            None
        } else {
            Some(Decimal::ZERO)
        };

        report.payoff_ratio = if report.losing_trades > 0 {
            report.average_win.checked_div(report.average_loss)
        } else {
            None
        };
    }

    fn calculate_series(&self, trades: &[&Trade], report: &mut AnalyticsReport) {
        let series = EquitySeries::build(trades);
        report.max_drawdown = series.max_drawdown;
        report.max_drawdown_pct = series.max_drawdown_pct;
        report.current_drawdown = series.current_drawdown;
        report.equity_curve = series.equity_curve;
        report.drawdown_curve = series.drawdown;
        report.equity_dates = trades.iter().map(|t| t.open_time).collect();
    }

    fn calculate_streaks(&self, trades: &[&Trade], report: &mut AnalyticsReport) {
        let streaks = StreakSummary::from_trades(trades);
        report.longest_win_streak = streaks.longest_win_streak;
        report.longest_loss_streak = streaks.longest_loss_streak;
        report.current_streak = streaks.current_streak;
    }

    /// Per-day, per-month, per-hour and per-symbol summaries.
    fn calculate_breakdowns(&self, trades: &[&Trade], report: &mut AnalyticsReport) {
        let days = grouping::by_day(trades);
        let months = grouping::by_month(trades);
        let hours = grouping::by_hour(trades);
        let symbols = grouping::by_symbol(trades);

        tracing::debug!(
            days = days.len(),
            months = months.len(),
            hours = hours.len(),
            symbols = symbols.len(),
            "Trades bucketed"
        );

        if let Some((day, profit)) =
            grouping::highest(days.iter().map(|(d, b)| (*d, b.net_profit)))
        {
            report.best_day = Some(day);
            report.best_day_profit = profit;
        }
        if let Some((day, profit)) = grouping::lowest(days.iter().map(|(d, b)| (*d, b.net_profit)))
        {
            report.worst_day = Some(day);
            report.worst_day_profit = profit;
        }
        // Ranked by mean profit per trade, so a single busy hour does not dominate.
        if let Some((hour, profit)) =
            grouping::highest(hours.iter().map(|(h, b)| (*h, b.average_profit())))
        {
            report.best_hour = Some(hour);
            report.best_hour_profit = profit;
        }

        report.daily_stats = grouping::daily_stats(&days);
        report.monthly_stats = grouping::monthly_stats(&months, &days);
        report.hourly_stats = grouping::hourly_stats(&hours);
        report.symbol_stats = grouping::symbol_stats(&symbols);
    }

    fn calculate_distributions(&self, trades: &[&Trade], report: &mut AnalyticsReport) {
        let mut total_minutes: u64 = 0;
        for trade in trades {
            let minutes = trade.duration_minutes();
            total_minutes += minutes;
            report.profit_distribution.record(trade.profit);
            report.duration_distribution.record(Decimal::from(minutes));
        }

        report.average_holding_period =
            Duration::from_secs(total_minutes * 60 / trades.len().max(1) as u64);
    }

    fn calculate_period(&self, trades: &[&Trade], report: &mut AnalyticsReport) {
        // Trades are ordered by open time, so the extremes sit at both ends.
        let (Some(first), Some(last)) = (trades.first(), trades.last()) else {
            return;
        };
        report.period_start = Some(first.open_time);
        report.period_end = Some(last.open_time);
        report.total_days = (last.open_time - first.open_time).num_days();
    }
}
