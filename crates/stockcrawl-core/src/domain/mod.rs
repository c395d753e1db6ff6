//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Normalized ticker symbol |
//! | [`DailyBar`] | One day of open/high/low/close/volume, kept as upstream text |
//! | [`TimeSeries`] | Daily bars keyed by `YYYY-MM-DD` date |
//!
//! Prices and volumes are never parsed to numbers. The CSV output carries the
//! exact text the API returned.

mod series;
mod symbol;

pub use series::{DailyBar, TimeSeries};
pub use symbol::Symbol;
