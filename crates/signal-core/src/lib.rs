//! Core types and traits for the daily signal generator.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PricePoint, ValuationPoint)
//! - Signal types (Signal, Valuation, Percentile, Trend, Action)
//! - Core traits for indicators and market data sources

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, IndicatorError, SignalError, SignalResult};
pub use traits::*;
pub use types::*;
