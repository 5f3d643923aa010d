//! Core data types for the signal generator.

mod market;
mod signal;

pub use market::{DateRange, InstrumentKind, MetricKind, PricePoint, ValuationPoint};
pub use signal::{Action, Percentile, Signal, Trend, Valuation};
