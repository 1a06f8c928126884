use crate::enums::{Outcome, Side};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a trade, stable across a single computation.
pub type TradeId = u64;

/// A single closed trade, as supplied by the ingestion layer.
///
/// The outcome and the duration are derived from the stored fields on demand and are
/// never stored, so they cannot drift from `profit` and the timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub symbol: String,
    pub side: Side,
    /// Lot size.
    pub volume: Decimal,
    pub open_price: Decimal,
    pub close_price: Decimal,
    /// Realized P&L in account currency.
    pub profit: Decimal,
    /// Spread in pips, when the source reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Trade {
    /// Creates a new trade, rejecting records that violate a structural invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TradeId,
        symbol: impl Into<String>,
        side: Side,
        open_time: DateTime<Utc>,
        close_time: DateTime<Utc>,
        volume: Decimal,
        open_price: Decimal,
        close_price: Decimal,
        profit: Decimal,
    ) -> Result<Self, CoreError> {
        let trade = Self {
            id,
            open_time,
            close_time,
            symbol: symbol.into(),
            side,
            volume,
            open_price,
            close_price,
            profit,
            spread: None,
            comment: None,
        };
        trade.validate()?;
        Ok(trade)
    }

    /// Attaches the reported spread.
    pub fn with_spread(mut self, spread: Decimal) -> Result<Self, CoreError> {
        self.spread = Some(spread);
        self.validate()?;
        Ok(self)
    }

    /// Attaches a free-text note.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Checks every structural invariant of the record.
    ///
    /// Records that were deserialized rather than built through [`Trade::new`] have not
    /// been checked yet, so consumers call this before trusting them.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.trim().is_empty() {
            return Err(invalid("symbol", "must not be empty"));
        }
        if self.close_time < self.open_time {
            return Err(invalid(
                "close_time",
                format!(
                    "close time {} is before open time {}",
                    self.close_time, self.open_time
                ),
            ));
        }
        if self.volume <= Decimal::ZERO {
            return Err(invalid(
                "volume",
                format!("must be positive, got {}", self.volume),
            ));
        }
        if self.open_price <= Decimal::ZERO {
            return Err(invalid(
                "open_price",
                format!("must be positive, got {}", self.open_price),
            ));
        }
        if self.close_price <= Decimal::ZERO {
            return Err(invalid(
                "close_price",
                format!("must be positive, got {}", self.close_price),
            ));
        }
        if let Some(spread) = self.spread {
            if spread < Decimal::ZERO {
                return Err(invalid(
                    "spread",
                    format!("must not be negative, got {spread}"),
                ));
            }
        }
        Ok(())
    }

    pub fn outcome(&self) -> Outcome {
        if self.profit > Decimal::ZERO {
            Outcome::Win
        } else if self.profit < Decimal::ZERO {
            Outcome::Loss
        } else {
            Outcome::BreakEven
        }
    }

    pub fn is_winner(&self) -> bool {
        self.outcome() == Outcome::Win
    }

    /// Holding time rounded half-up to whole minutes.
    pub fn duration_minutes(&self) -> u64 {
        let millis = (self.close_time - self.open_time).num_milliseconds().max(0) as u64;
        (millis + 30_000) / 60_000
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidInput(field.to_string(), reason.into())
}
