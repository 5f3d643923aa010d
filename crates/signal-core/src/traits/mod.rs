//! Core traits for the signal generator.

mod data_source;
mod indicator;

pub use data_source::MarketDataSource;
pub use indicator::Indicator;
