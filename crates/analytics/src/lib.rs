//! # Trade Analytics Engine
//!
//! This crate turns a collection of closed trades into the complete statistics report
//! behind the analytics dashboard: win rate, profit factor, drawdown, streaks,
//! calendar/hour/symbol breakdowns, distributions and the equity curve.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** It has no knowledge of files, HTTP or storage. It depends only on
//!   `core-types` and on `configuration` for its settings.
//! - **Stateless Calculation:** The `AnalyticsEngine` orders the trades once and derives
//!   every figure from that order, so the same collection always yields the same
//!   report, however it was shuffled.
//!
//! ## Pipeline
//!
//! `sequencer` → (`series`, `streaks`, `grouping`, `distribution`) → `AnalyticsEngine`
//! composes the `AnalyticsReport`.

// Declare the modules that constitute this crate.
pub mod distribution;
pub mod engine;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod report;
pub mod sequencer;
pub mod series;
pub mod streaks;

// Re-export the key components to create a clean, public-facing API.
pub use distribution::{Histogram, HistogramBin};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::TradeFilter;
pub use report::{AnalyticsReport, DailyStats, HourlyStats, MonthlyStats, SymbolStats};
pub use series::EquitySeries;
pub use streaks::StreakSummary;
