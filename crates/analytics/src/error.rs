use core_types::{CoreError, TradeId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Trade {trade_id} is invalid: {reason}")]
    InvalidInput { trade_id: TradeId, reason: String },

    #[error("Cannot build a report: the trade collection is empty")]
    EmptyReport,

    #[error("Invalid analytics configuration: {0}")]
    InvalidConfiguration(String),
}

impl AnalyticsError {
    /// Attributes a structural violation to the offending trade.
    pub fn invalid_trade(trade_id: TradeId, err: CoreError) -> Self {
        Self::InvalidInput {
            trade_id,
            reason: err.to_string(),
        }
    }
}
