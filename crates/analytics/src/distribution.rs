use crate::error::AnalyticsError;
use configuration::{DEFAULT_DURATION_BINS, DEFAULT_PROFIT_BINS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One interval of a histogram. A missing bound is unbounded.
///
/// Intervals are right-closed, `(lower, upper]`; the first interval of a histogram
/// with a finite lower bound also includes that bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub label: String,
    pub lower: Option<Decimal>,
    pub upper: Option<Decimal>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Lays out empty bins over `edges`, preceded by `lower` (or `-inf`) and
    /// followed by `+inf`.
    pub fn with_edges(lower: Option<Decimal>, edges: &[Decimal]) -> Result<Self, AnalyticsError> {
        let bounds = bounds(lower, edges);
        let increasing = bounds.windows(2).all(|w| match (w[0], w[1]) {
            (Some(a), Some(b)) => a < b,
            _ => true,
        });
        if !increasing {
            return Err(AnalyticsError::InvalidConfiguration(format!(
                "histogram edges must be strictly increasing, got lower={lower:?} edges={edges:?}"
            )));
        }

        Ok(Self::from_bounds(&bounds))
    }

    /// The profit layout over [`DEFAULT_PROFIT_BINS`].
    pub fn default_profits() -> Self {
        Self::from_bounds(&bounds(None, &DEFAULT_PROFIT_BINS))
    }

    /// The holding-time layout over [`DEFAULT_DURATION_BINS`], starting at zero minutes.
    pub fn default_durations() -> Self {
        Self::from_bounds(&bounds(Some(Decimal::ZERO), &DEFAULT_DURATION_BINS))
    }

    fn from_bounds(bounds: &[Option<Decimal>]) -> Self {
        let bins = bounds
            .windows(2)
            .enumerate()
            .map(|(i, w)| HistogramBin {
                label: label(w[0], w[1], i == 0),
                lower: w[0],
                upper: w[1],
                count: 0,
            })
            .collect();
        Self { bins }
    }

    /// Counts `value` into the bin containing it. Values below a finite lower bound are
    /// not counted.
    pub fn record(&mut self, value: Decimal) {
        let position = self.bins.iter().enumerate().position(|(i, bin)| {
            let above_lower = match bin.lower {
                None => true,
                Some(lower) if i == 0 => value >= lower,
                Some(lower) => value > lower,
            };
            let below_upper = bin.upper.is_none_or(|upper| value <= upper);
            above_lower && below_upper
        });
        if let Some(index) = position {
            self.bins[index].count += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

fn bounds(lower: Option<Decimal>, edges: &[Decimal]) -> Vec<Option<Decimal>> {
    let mut bounds = Vec::with_capacity(edges.len() + 2);
    bounds.push(lower);
    bounds.extend(edges.iter().copied().map(Some));
    bounds.push(None);
    bounds
}

fn label(lower: Option<Decimal>, upper: Option<Decimal>, first: bool) -> String {
    let open = if first && lower.is_some() { '[' } else { '(' };
    let lower = lower.map_or_else(|| "-inf".to_string(), |l| l.normalize().to_string());
    match upper {
        Some(upper) => format!("{open}{lower}, {}]", upper.normalize()),
        None => format!("{open}{lower}, +inf)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profit_layout() -> Histogram {
        Histogram::with_edges(
            None,
            &[dec!(-1000), dec!(-500), dec!(-100), dec!(0), dec!(100), dec!(500), dec!(1000)],
        )
        .unwrap()
    }

    #[test]
    fn labels_describe_each_interval() {
        let labels: Vec<String> = profit_layout().bins.into_iter().map(|b| b.label).collect();
        assert_eq!(labels.first().unwrap(), "(-inf, -1000]");
        assert_eq!(labels[4], "(0, 100]");
        assert_eq!(labels.last().unwrap(), "(1000, +inf)");
        assert_eq!(labels.len(), 8);

        let durations = Histogram::with_edges(Some(dec!(0)), &[dec!(30), dec!(60)]).unwrap();
        assert_eq!(durations.bins[0].label, "[0, 30]");
    }

    #[test]
    fn intervals_are_right_closed() {
        let mut histogram = profit_layout();
        for value in [dec!(-1000), dec!(-999.99), dec!(0), dec!(0.01), dec!(100), dec!(5000)] {
            histogram.record(value);
        }
        let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 1, 2, 0, 0, 1]);
        assert_eq!(histogram.total(), 6);
    }

    #[test]
    fn first_bin_includes_its_finite_lower_bound() {
        let mut histogram = Histogram::with_edges(Some(dec!(0)), &[dec!(30)]).unwrap();
        histogram.record(dec!(0));
        histogram.record(dec!(30));
        histogram.record(dec!(31));
        histogram.record(dec!(-1));
        assert_eq!(histogram.bins[0].count, 2);
        assert_eq!(histogram.bins[1].count, 1);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn default_layouts_match_the_default_edges() {
        assert_eq!(Histogram::default_profits(), profit_layout());
        assert_eq!(
            Histogram::default_durations(),
            Histogram::with_edges(Some(dec!(0)), &DEFAULT_DURATION_BINS).unwrap()
        );
        assert_eq!(Histogram::default_durations().bins[0].label, "[0, 30]");
    }

    #[test]
    fn rejects_unordered_edges() {
        assert!(Histogram::with_edges(None, &[dec!(5), dec!(5)]).is_err());
        assert!(Histogram::with_edges(Some(dec!(30)), &[dec!(30)]).is_err());
    }
}
