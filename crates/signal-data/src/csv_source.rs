//! CSV data source.
//!
//! Reads per-code files from a directory:
//! - `<code>_daily.csv` with `trade_date,close,vol`
//! - `<code>_valuation.csv` with `trade_date,pe_ttm,pb`
//!
//! Empty cells are treated as missing values.

use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::Deserialize;
use signal_core::error::DataError;
use signal_core::traits::MarketDataSource;
use signal_core::types::{DateRange, InstrumentKind, PricePoint, ValuationPoint};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{normalize_prices, normalize_valuations, parse_trade_date};

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(alias = "date", alias = "Date")]
    trade_date: String,
    #[serde(alias = "Close")]
    close: Option<f64>,
    #[serde(alias = "volume", alias = "Volume", default)]
    vol: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ValuationRecord {
    #[serde(alias = "date", alias = "Date")]
    trade_date: String,
    #[serde(alias = "pe", default)]
    pe_ttm: Option<f64>,
    #[serde(default)]
    pb: Option<f64>,
}

/// Offline market data read from a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvMarketData {
    dir: PathBuf,
}

impl CsvMarketData {
    /// Create a CSV data source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::ConnectionError(format!(
                "Data directory '{}' does not exist",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Path of the daily price file for a code.
    pub fn prices_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{}_daily.csv", code))
    }

    /// Path of the valuation file for a code.
    pub fn valuation_path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{}_valuation.csv", code))
    }

    fn reader(path: &Path, code: &str) -> Result<csv::Reader<std::fs::File>, DataError> {
        if !path.exists() {
            return Err(DataError::SymbolNotFound(code.to_string()));
        }
        ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))
    }

    fn load_prices(&self, code: &str, range: DateRange) -> Result<Vec<PricePoint>, DataError> {
        let path = self.prices_path(code);
        let mut reader = Self::reader(&path, code)?;

        let mut points = Vec::new();
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let date = parse_trade_date(&record.trade_date)?;
            if !range.contains(date) {
                continue;
            }
            let Some(close) = record.close.filter(|c| c.is_finite()) else {
                continue;
            };
            points.push(PricePoint::new(date, close, record.vol.unwrap_or(f64::NAN)));
        }

        debug!(code, rows = points.len(), path = %path.display(), "Loaded prices");
        Ok(normalize_prices(points))
    }

    fn load_valuations(
        &self,
        code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError> {
        let path = self.valuation_path(code);
        let mut reader = Self::reader(&path, code)?;

        let mut points = Vec::new();
        for result in reader.deserialize() {
            let record: ValuationRecord =
                result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let date = parse_trade_date(&record.trade_date)?;
            if range.contains(date) {
                points.push(ValuationPoint::new(date, record.pe_ttm, record.pb));
            }
        }

        debug!(code, rows = points.len(), path = %path.display(), "Loaded valuations");
        Ok(normalize_valuations(points))
    }
}

#[async_trait]
impl MarketDataSource for CsvMarketData {
    async fn daily_prices(
        &self,
        code: &str,
        _kind: InstrumentKind,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, DataError> {
        self.load_prices(code, range)
    }

    async fn stock_valuation(
        &self,
        code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError> {
        self.load_valuations(code, range)
    }

    async fn index_valuation(
        &self,
        index_code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError> {
        self.load_valuations(index_code, range)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_load_prices_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("600519.SH_daily.csv"),
            "trade_date,close,vol\n20240103,11.0,300\n20231229,9.0,100\n20240102,10.0,\n20240104,,50\n",
        )
        .unwrap();

        let source = CsvMarketData::new(dir.path()).unwrap();
        let prices = source
            .daily_prices("600519.SH", InstrumentKind::Stock, range())
            .await
            .unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].close, 10.0);
        assert!(prices[0].volume.is_nan());
        assert_eq!(prices[1].volume, 300.0);
    }

    #[tokio::test]
    async fn test_load_valuations_with_gaps() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("000300.SH_valuation.csv"),
            "trade_date,pe_ttm,pb\n2024-01-02,12.5,\n2024-01-03,,1.4\n",
        )
        .unwrap();

        let source = CsvMarketData::new(dir.path()).unwrap();
        let points = source.index_valuation("000300.SH", range()).await.unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].pe_ttm, Some(12.5));
        assert_eq!(points[0].pb, None);
        assert_eq!(points[1].pb, Some(1.4));
    }

    #[tokio::test]
    async fn test_missing_file_is_symbol_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvMarketData::new(dir.path()).unwrap();

        let err = source.stock_valuation("000001.SZ", range()).await.unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound(code) if code == "000001.SZ"));
    }

    #[test]
    fn test_missing_directory_rejected() {
        assert!(CsvMarketData::new("/definitely/not/here").is_err());
    }
}
