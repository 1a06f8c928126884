use core_types::Trade;
use serde::{Deserialize, Serialize};

/// A maximal run of consecutive trades sharing one outcome sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub sign: i8,
    pub len: usize,
}

/// Longest and current streaks of an ordered trade sequence.
///
/// A break-even trade forms its own zero-sign run, so it ends any win or loss streak
/// in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    /// Length of the final run, positive for wins and negative for losses.
    /// Zero when the final run is break-even or there are no trades.
    pub current_streak: i64,
}

/// Run-length encodes a sequence of trinary signs.
pub fn runs(signs: impl IntoIterator<Item = i8>) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for sign in signs {
        match runs.last_mut() {
            Some(run) if run.sign == sign => run.len += 1,
            _ => runs.push(Run { sign, len: 1 }),
        }
    }
    runs
}

impl StreakSummary {
    /// Summarizes trades that are already in chronological order.
    pub fn from_trades(trades: &[&Trade]) -> Self {
        let runs = runs(trades.iter().map(|t| t.outcome().sign()));
        Self::from_runs(&runs)
    }

    pub fn from_runs(runs: &[Run]) -> Self {
        let longest = |sign: i8| {
            runs.iter()
                .filter(|run| run.sign == sign)
                .map(|run| run.len)
                .max()
                .unwrap_or(0)
        };

        let current_streak = runs
            .last()
            .map_or(0, |run| i64::from(run.sign) * run.len as i64);

        Self {
            longest_win_streak: longest(1),
            longest_loss_streak: longest(-1),
            current_streak,
        }
    }
}
