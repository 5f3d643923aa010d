//! Indicators used by the daily signal computation.
//!
//! - Simple moving average over closes and volumes
//! - Percentile rank of a value within its own history

pub mod moving_average;
pub mod percentile;

pub use moving_average::{last_sma, Sma};
pub use percentile::percentile_rank;
