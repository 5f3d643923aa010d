//! CLI command implementations.

pub mod run;
pub mod tickers;
pub mod validate;
