use serde::{Deserialize, Serialize};

/// The direction of the position a trade opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

/// The classification of a closed trade, driven solely by the sign of its profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Loss,
    BreakEven,
}

impl Outcome {
    /// The trinary sign of the outcome: `1` for a win, `-1` for a loss, `0` otherwise.
    pub fn sign(&self) -> i8 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
            Outcome::BreakEven => 0,
        }
    }
}
