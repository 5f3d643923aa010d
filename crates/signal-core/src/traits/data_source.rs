//! Market data source trait definitions.

use crate::error::DataError;
use crate::types::{DateRange, InstrumentKind, PricePoint, ValuationPoint};
use async_trait::async_trait;

/// Trait for historical daily market data sources.
///
/// All series are returned ordered from oldest to newest.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch daily closes and volumes.
    ///
    /// # Arguments
    /// * `code` - Ticker code in provider format (e.g. `600519.SH`)
    /// * `kind` - Whether the code is a stock or a fund
    /// * `range` - Inclusive date range
    async fn daily_prices(
        &self,
        code: &str,
        kind: InstrumentKind,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, DataError>;

    /// Fetch daily valuation metrics of a stock.
    async fn stock_valuation(
        &self,
        code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError>;

    /// Fetch daily valuation metrics of an index.
    async fn index_valuation(
        &self,
        index_code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
