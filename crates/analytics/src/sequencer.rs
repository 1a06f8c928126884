use crate::error::AnalyticsError;
use core_types::Trade;
use std::collections::HashSet;

/// Orders trades by `open_time`, breaking ties by `id`, so every later stage sees the
/// same total order regardless of how the collection was supplied.
///
/// Every record is validated first and ids must be unique; the first violation aborts
/// the whole computation.
pub fn sequence(trades: &[Trade]) -> Result<Vec<&Trade>, AnalyticsError> {
    let mut seen = HashSet::with_capacity(trades.len());
    for trade in trades {
        if let Err(err) = trade.validate() {
            tracing::warn!(trade_id = trade.id, error = %err, "Rejecting trade collection");
            return Err(AnalyticsError::invalid_trade(trade.id, err));
        }
        if !seen.insert(trade.id) {
            tracing::warn!(trade_id = trade.id, "Rejecting trade collection with a duplicate id");
            return Err(AnalyticsError::InvalidInput {
                trade_id: trade.id,
                reason: "id is not unique".to_string(),
            });
        }
    }

    let mut ordered: Vec<&Trade> = trades.iter().collect();
    ordered.sort_by(|a, b| a.open_time.cmp(&b.open_time).then(a.id.cmp(&b.id)));
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use core_types::Side;
    use rust_decimal_macros::dec;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn trade(id: u64, open_offset: i64) -> Trade {
        Trade::new(
            id,
            "XAUUSD",
            Side::Buy,
            at(open_offset),
            at(open_offset + 10),
            dec!(0.1),
            dec!(2900),
            dec!(2905),
            dec!(50),
        )
        .unwrap()
    }

    #[test]
    fn orders_by_open_time_then_id() {
        let trades = vec![trade(4, 30), trade(2, 0), trade(1, 30), trade(3, 0)];
        let ids: Vec<u64> = sequence(&trades).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(sequence(&[]).unwrap().is_empty());
    }

    #[test]
    fn reports_the_offending_trade() {
        let mut broken = trade(9, 5);
        broken.close_time = at(0);
        let trades = vec![trade(1, 0), broken];

        match sequence(&trades) {
            Err(AnalyticsError::InvalidInput { trade_id, reason }) => {
                assert_eq!(trade_id, 9);
                assert!(reason.contains("close_time"));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut twin = trade(7, 0);
        twin.profit = dec!(-50);
        let trades = vec![trade(7, 0), twin];

        for input in [trades.clone(), trades.into_iter().rev().collect()] {
            match sequence(&input) {
                Err(AnalyticsError::InvalidInput { trade_id, reason }) => {
                    assert_eq!(trade_id, 7);
                    assert!(reason.contains("unique"));
                }
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_negative_volume() {
        let mut broken = trade(5, 0);
        broken.volume = dec!(-1);
        assert!(matches!(
            sequence(&[broken]),
            Err(AnalyticsError::InvalidInput { trade_id: 5, .. })
        ));
    }
}
