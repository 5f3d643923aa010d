//! Signal computation.
//!
//! Turns daily prices and valuations into one [`Signal`] per ticker:
//! a valuation percentile, a price-vs-moving-average trend, a volume
//! flag, and a suggested action.
//!
//! [`Signal`]: signal_core::types::Signal

mod decision;
mod engine;
mod params;
mod trend;
mod universe;
mod valuation;

pub use decision::decide_action;
pub use engine::SignalEngine;
pub use params::{SignalParams, Thresholds};
pub use trend::{classify_trend, TrendSnapshot};
pub use universe::{Ticker, Universe};
pub use valuation::select_valuation;
