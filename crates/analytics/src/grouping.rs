//! Partitioning of an ordered trade sequence into calendar, hour-of-day and symbol buckets.
//!
//! Each grouping owns its accumulators and shares nothing with the others, so the
//! groupings can be computed in any order, or concurrently.

use crate::report::{DailyStats, HourlyStats, MonthlyStats, SymbolStats};
use chrono::{Datelike, NaiveDate, Timelike};
use core_types::Trade;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Running totals of a single bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub trade_count: usize,
    pub winning: usize,
    pub net_profit: Decimal,
    pub worst_trade: Decimal,
}

impl Bucket {
    fn new(trade: &Trade) -> Self {
        Self {
            trade_count: 1,
            winning: usize::from(trade.is_winner()),
            net_profit: trade.profit,
            worst_trade: trade.profit,
        }
    }

    fn add(&mut self, trade: &Trade) {
        self.trade_count += 1;
        self.winning += usize::from(trade.is_winner());
        self.net_profit += trade.profit;
        self.worst_trade = self.worst_trade.min(trade.profit);
    }

    pub fn win_rate_pct(&self) -> Decimal {
        win_rate_pct(self.winning, self.trade_count)
    }

    pub fn average_profit(&self) -> Decimal {
        mean(self.net_profit, self.trade_count)
    }
}

/// `part / whole` in percent, `0` when `whole` is zero.
pub fn win_rate_pct(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole)
}

/// `sum / count`, `0` when `count` is zero.
pub fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    sum / Decimal::from(count)
}

/// Buckets trades by an ordered key. Keys iterate in ascending order.
pub fn group_by<'a, K, F>(trades: &[&'a Trade], key: F) -> BTreeMap<K, Bucket>
where
    K: Ord,
    F: Fn(&'a Trade) -> K,
{
    let mut buckets: BTreeMap<K, Bucket> = BTreeMap::new();
    for &trade in trades {
        buckets
            .entry(key(trade))
            .and_modify(|bucket| bucket.add(trade))
            .or_insert_with(|| Bucket::new(trade));
    }
    buckets
}

pub fn by_day(trades: &[&Trade]) -> BTreeMap<NaiveDate, Bucket> {
    group_by(trades, |t| t.open_time.date_naive())
}

pub fn by_month(trades: &[&Trade]) -> BTreeMap<(i32, u32), Bucket> {
    group_by(trades, |t| (t.open_time.year(), t.open_time.month()))
}

pub fn by_hour(trades: &[&Trade]) -> BTreeMap<u32, Bucket> {
    group_by(trades, |t| t.open_time.hour())
}

pub fn by_symbol<'a>(trades: &[&'a Trade]) -> BTreeMap<&'a str, Bucket> {
    group_by(trades, |t| t.symbol.as_str())
}

/// The key with the highest value. The first key in iteration order wins ties.
pub fn highest<K, I>(values: I) -> Option<(K, Decimal)>
where
    I: IntoIterator<Item = (K, Decimal)>,
{
    values.into_iter().fold(None, |best, (key, value)| match best {
        Some((_, best_value)) if value <= best_value => best,
        _ => Some((key, value)),
    })
}

/// The key with the lowest value. The first key in iteration order wins ties.
pub fn lowest<K, I>(values: I) -> Option<(K, Decimal)>
where
    I: IntoIterator<Item = (K, Decimal)>,
{
    values.into_iter().fold(None, |worst, (key, value)| match worst {
        Some((_, worst_value)) if value >= worst_value => worst,
        _ => Some((key, value)),
    })
}

pub fn daily_stats(days: &BTreeMap<NaiveDate, Bucket>) -> Vec<DailyStats> {
    days.iter()
        .map(|(date, bucket)| DailyStats {
            date: *date,
            trade_count: bucket.trade_count,
            net_profit: bucket.net_profit,
            win_rate_pct: bucket.win_rate_pct(),
            worst_trade: bucket.worst_trade,
        })
        .collect()
}

/// Monthly summaries. The best and worst day of each month come from the daily buckets,
/// since every calendar day falls in exactly one month.
pub fn monthly_stats(
    months: &BTreeMap<(i32, u32), Bucket>,
    days: &BTreeMap<NaiveDate, Bucket>,
) -> Vec<MonthlyStats> {
    months
        .iter()
        .filter_map(|(&(year, month), bucket)| {
            let in_month = || {
                days.iter()
                    .filter(move |(date, _)| date.year() == year && date.month() == month)
                    .map(|(date, day)| (*date, day.net_profit))
            };
            let (best_day, _) = highest(in_month())?;
            let (worst_day, _) = lowest(in_month())?;
            Some(MonthlyStats {
                month: format!("{year:04}-{month:02}"),
                trade_count: bucket.trade_count,
                net_profit: bucket.net_profit,
                win_rate_pct: bucket.win_rate_pct(),
                best_day,
                worst_day,
            })
        })
        .collect()
}

/// One row per hour of the day, 0 through 23. Hours without trades are zero rows.
pub fn hourly_stats(hours: &BTreeMap<u32, Bucket>) -> Vec<HourlyStats> {
    (0..24)
        .map(|hour| match hours.get(&hour) {
            Some(bucket) => HourlyStats {
                hour,
                trade_count: bucket.trade_count,
                net_profit: bucket.net_profit,
                win_rate_pct: bucket.win_rate_pct(),
                average_profit: bucket.average_profit(),
            },
            None => HourlyStats {
                hour,
                trade_count: 0,
                net_profit: Decimal::ZERO,
                win_rate_pct: Decimal::ZERO,
                average_profit: Decimal::ZERO,
            },
        })
        .collect()
}

pub fn symbol_stats(symbols: &BTreeMap<&str, Bucket>) -> BTreeMap<String, SymbolStats> {
    symbols
        .iter()
        .map(|(symbol, bucket)| {
            (
                symbol.to_string(),
                SymbolStats {
                    trade_count: bucket.trade_count,
                    net_profit: bucket.net_profit,
                    win_rate_pct: bucket.win_rate_pct(),
                    average_profit: bucket.average_profit(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use core_types::Side;
    use rust_decimal_macros::dec;

    fn trade(id: u64, symbol: &str, open: DateTime<Utc>, profit: Decimal) -> Trade {
        Trade::new(
            id,
            symbol,
            Side::Sell,
            open,
            open + Duration::minutes(45),
            dec!(0.5),
            dec!(1.27),
            dec!(1.26),
            profit,
        )
        .unwrap()
    }

    fn sample() -> Vec<Trade> {
        let ts = |d: u32, h: u32| Utc.with_ymd_and_hms(2025, 1, d, h, 15, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap();
        vec![
            trade(1, "EURUSD", ts(6, 9), dec!(120)),
            trade(2, "GBPUSD", ts(6, 14), dec!(-40)),
            trade(3, "EURUSD", ts(7, 9), dec!(-90)),
            trade(4, "EURUSD", ts(8, 14), dec!(30)),
            trade(5, "GBPUSD", feb, dec!(10)),
        ]
    }

    #[test]
    fn daily_buckets_cover_every_trade() {
        let trades = sample();
        let refs: Vec<&Trade> = trades.iter().collect();
        let days = daily_stats(&by_day(&refs));

        assert_eq!(days.len(), 4);
        assert_eq!(days.iter().map(|d| d.trade_count).sum::<usize>(), trades.len());

        let first = &days[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(first.net_profit, dec!(80));
        assert_eq!(first.win_rate_pct, dec!(50));
        assert_eq!(first.worst_trade, dec!(-40));
    }

    #[test]
    fn monthly_buckets_know_their_best_and_worst_day() {
        let trades = sample();
        let refs: Vec<&Trade> = trades.iter().collect();
        let months = monthly_stats(&by_month(&refs), &by_day(&refs));

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2025-01");
        assert_eq!(months[0].trade_count, 4);
        assert_eq!(months[0].net_profit, dec!(20));
        assert_eq!(months[0].best_day, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(months[0].worst_day, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        assert_eq!(months[1].month, "2025-02");
        assert_eq!(months[1].best_day, months[1].worst_day);
    }

    #[test]
    fn hourly_buckets_report_mean_profit() {
        let trades = sample();
        let refs: Vec<&Trade> = trades.iter().collect();
        let hours = hourly_stats(&by_hour(&refs));

        assert_eq!(hours.len(), 24);
        assert!(hours.iter().enumerate().all(|(i, h)| h.hour == i as u32));
        // 09h: 120, -90, 10 → 40/3; 14h: -40, 30 → -5
        assert_eq!(hours[9].trade_count, 3);
        assert_eq!(hours[9].average_profit, dec!(40) / dec!(3));
        assert_eq!(hours[14].average_profit, dec!(-5));
        assert_eq!(hours[0].trade_count, 0);
        assert_eq!(hours[0].net_profit, Decimal::ZERO);
        assert_eq!(hours.iter().map(|h| h.trade_count).sum::<usize>(), trades.len());
    }

    #[test]
    fn symbol_buckets_partition_the_trades() {
        let trades = sample();
        let refs: Vec<&Trade> = trades.iter().collect();
        let symbols = symbol_stats(&by_symbol(&refs));

        assert_eq!(symbols.len(), 2);
        let eur = &symbols["EURUSD"];
        assert_eq!(eur.trade_count, 3);
        assert_eq!(eur.net_profit, dec!(60));
        assert_eq!(eur.average_profit, dec!(20));
        assert_eq!(
            symbols.values().map(|s| s.trade_count).sum::<usize>(),
            trades.len()
        );
    }

    #[test]
    fn extremes_prefer_the_first_key_on_ties() {
        let values = vec![(1, dec!(5)), (2, dec!(9)), (3, dec!(9)), (4, dec!(-2)), (5, dec!(-2))];
        assert_eq!(highest(values.clone()), Some((2, dec!(9))));
        assert_eq!(lowest(values), Some((4, dec!(-2))));
        assert_eq!(highest(Vec::<(u8, Decimal)>::new()), None);
    }

    #[test]
    fn rates_are_zero_for_empty_buckets() {
        assert_eq!(win_rate_pct(0, 0), Decimal::ZERO);
        assert_eq!(mean(dec!(10), 0), Decimal::ZERO);
        assert_eq!(win_rate_pct(1, 3), dec!(100) / dec!(3));
    }
}
