use chrono::NaiveDate;
use core_types::{Outcome, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Criteria selecting a sub-collection of trades. Unset criteria match everything.
///
/// Dates are compared against the calendar date of `open_time` and are inclusive;
/// profit bounds are inclusive as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub symbol: Option<String>,
    pub outcome: Option<Outcome>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub min_profit: Option<Decimal>,
    pub max_profit: Option<Decimal>,
}

impl TradeFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        let date = trade.open_time.date_naive();
        self.symbol.as_deref().is_none_or(|s| trade.symbol == s)
            && self.outcome.is_none_or(|o| trade.outcome() == o)
            && self.date_from.is_none_or(|from| date >= from)
            && self.date_to.is_none_or(|to| date <= to)
            && self.min_profit.is_none_or(|min| trade.profit >= min)
            && self.max_profit.is_none_or(|max| trade.profit <= max)
    }

    /// Copies out the matching trades, preserving their relative order.
    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::Side;
    use rust_decimal_macros::dec;

    fn trades() -> Vec<Trade> {
        let make = |id: u64, symbol: &str, day: u32, profit: Decimal| {
            let open = Utc.with_ymd_and_hms(2025, 1, day, 10, 0, 0).unwrap();
            Trade::new(
                id,
                symbol,
                Side::Buy,
                open,
                open + Duration::minutes(5),
                dec!(1),
                dec!(1.1),
                dec!(1.2),
                profit,
            )
            .unwrap()
        };
        vec![
            make(1, "EURUSD", 10, dec!(150)),
            make(2, "GBPUSD", 11, dec!(-20)),
            make(3, "EURUSD", 12, dec!(0)),
            make(4, "EURUSD", 13, dec!(-300)),
        ]
    }

    fn ids(filter: &TradeFilter) -> Vec<u64> {
        filter.apply(&trades()).iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = TradeFilter::default();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter), vec![1, 2, 3, 4]);
    }

    #[test]
    fn combines_symbol_and_outcome() {
        let filter = TradeFilter {
            symbol: Some("EURUSD".to_string()),
            outcome: Some(Outcome::Loss),
            ..TradeFilter::default()
        };
        assert!(!filter.is_empty());
        assert_eq!(ids(&filter), vec![4]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = TradeFilter {
            date_from: NaiveDate::from_ymd_opt(2025, 1, 11),
            date_to: NaiveDate::from_ymd_opt(2025, 1, 12),
            ..TradeFilter::default()
        };
        assert_eq!(ids(&filter), vec![2, 3]);
    }

    #[test]
    fn profit_bounds_are_inclusive() {
        let filter = TradeFilter {
            min_profit: Some(dec!(-20)),
            max_profit: Some(dec!(0)),
            ..TradeFilter::default()
        };
        assert_eq!(ids(&filter), vec![2, 3]);
    }
}
