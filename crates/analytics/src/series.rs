use core_types::Trade;
use rust_decimal::Decimal;

/// The cumulative profit of an ordered trade sequence and its drawdown from the running peak.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquitySeries {
    /// `equity_curve[i]` is the sum of profits of trades `0..=i`.
    pub equity_curve: Vec<Decimal>,
    /// Highest value of the equity curve reached at or before each index.
    pub running_max: Vec<Decimal>,
    /// `equity_curve[i] - running_max[i]`, never positive.
    pub drawdown: Vec<Decimal>,
    /// The minimum of `drawdown`, `0` for an empty sequence.
    pub max_drawdown: Decimal,
    /// `max_drawdown` relative to the peak it was measured from, in percent.
    pub max_drawdown_pct: Decimal,
    /// The drawdown after the last trade.
    pub current_drawdown: Decimal,
}

impl EquitySeries {
    /// Builds the series for trades that are already in chronological order.
    pub fn build(trades: &[&Trade]) -> Self {
        let mut series = Self {
            equity_curve: Vec::with_capacity(trades.len()),
            running_max: Vec::with_capacity(trades.len()),
            drawdown: Vec::with_capacity(trades.len()),
            ..Self::default()
        };

        let mut equity = Decimal::ZERO;
        let mut peak: Option<Decimal> = None;
        // Peak in force where the deepest drawdown occurred; the first occurrence wins.
        let mut peak_at_max_drawdown = Decimal::ZERO;

        for trade in trades {
            equity += trade.profit;
            let current_peak = peak.map_or(equity, |p| p.max(equity));
            peak = Some(current_peak);

            let drawdown = equity - current_peak;
            if series.drawdown.is_empty() || drawdown < series.max_drawdown {
                series.max_drawdown = drawdown;
                peak_at_max_drawdown = current_peak;
            }

            series.equity_curve.push(equity);
            series.running_max.push(current_peak);
            series.drawdown.push(drawdown);
        }

        series.current_drawdown = series.drawdown.last().copied().unwrap_or(Decimal::ZERO);

        // A non-positive peak has no meaningful percentage, so it reports zero. A
        // percentage beyond the representable range saturates at `Decimal::MIN`.
        if peak_at_max_drawdown > Decimal::ZERO {
            series.max_drawdown_pct = series
                .max_drawdown
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(peak_at_max_drawdown))
                .unwrap_or(Decimal::MIN);
        }

        tracing::debug!(
            points = series.equity_curve.len(),
            max_drawdown = %series.max_drawdown,
            "Equity series built"
        );

        series
    }
}
