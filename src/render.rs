//! Terminal rendering of a finished report.

use analytics::AnalyticsReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use rust_decimal::Decimal;

const NOT_AVAILABLE: &str = "N/A";

/// Builds the headline metrics table followed by the per-symbol breakdown.
pub fn summary_table(report: &AnalyticsReport) -> String {
    let mut summary = Table::new();
    summary
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    let period = match (report.period_start, report.period_end) {
        (Some(start), Some(end)) => format!(
            "{} .. {} ({} days)",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            report.total_days
        ),
        _ => NOT_AVAILABLE.to_string(),
    };

    let rows: Vec<(&str, String)> = vec![
        ("Period", period),
        ("Total trades", report.total_trades.to_string()),
        (
            "Won / Lost / Break-even",
            format!(
                "{} / {} / {}",
                report.winning_trades, report.losing_trades, report.break_even_trades
            ),
        ),
        ("Win rate", format!("{}%", money(report.win_rate_pct))),
        ("Total profit", money(report.total_profit)),
        ("Average profit", money(report.average_profit)),
        ("Profit factor", optional(report.profit_factor)),
        ("Payoff ratio", optional(report.payoff_ratio)),
        (
            "Max drawdown",
            format!(
                "{} ({}%)",
                money(report.max_drawdown),
                money(report.max_drawdown_pct)
            ),
        ),
        ("Current drawdown", money(report.current_drawdown)),
        (
            "Longest win / loss streak",
            format!(
                "{} / {}",
                report.longest_win_streak, report.longest_loss_streak
            ),
        ),
        ("Current streak", format!("{:+}", report.current_streak)),
        (
            "Best day",
            report.best_day.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |day| format!("{day} ({})", money(report.best_day_profit)),
            ),
        ),
        (
            "Worst day",
            report.worst_day.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |day| format!("{day} ({})", money(report.worst_day_profit)),
            ),
        ),
        (
            "Best hour",
            report.best_hour.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |hour| format!("{hour:02}:00 (avg {})", money(report.best_hour_profit)),
            ),
        ),
        (
            "Average holding period",
            humantime::format_duration(report.average_holding_period).to_string(),
        ),
    ];
    for (metric, value) in rows {
        summary.add_row(vec![metric.to_string(), value]);
    }

    let mut symbols = Table::new();
    symbols
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbol", "Trades", "Net profit", "Win rate", "Avg profit"]);
    for (symbol, stats) in &report.symbol_stats {
        symbols.add_row(vec![
            symbol.clone(),
            stats.trade_count.to_string(),
            money(stats.net_profit),
            format!("{}%", money(stats.win_rate_pct)),
            money(stats.average_profit),
        ]);
    }

    format!("{summary}\n{symbols}")
}

fn money(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn optional(value: Option<Decimal>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), money)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;

    #[test]
    fn empty_report_renders_not_available() {
        let report = AnalyticsEngine::new().calculate(&[]).unwrap();
        let table = summary_table(&report);
        assert!(table.contains("Total trades"));
        assert!(table.contains(NOT_AVAILABLE));
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(money(Decimal::new(666_667, 4)), "66.67");
        assert_eq!(optional(None), NOT_AVAILABLE);
    }
}
