//! Daily market data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One trading day of price data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trade date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, close: f64, volume: f64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// One trading day of valuation data. Either metric may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    /// Trade date
    pub date: NaiveDate,
    /// Trailing twelve-month price/earnings
    pub pe_ttm: Option<f64>,
    /// Price/book
    pub pb: Option<f64>,
}

impl ValuationPoint {
    /// Create a new valuation point.
    pub fn new(date: NaiveDate, pe_ttm: Option<f64>, pb: Option<f64>) -> Self {
        Self { date, pe_ttm, pb }
    }

    /// Get the value of the given metric, ignoring non-finite values.
    pub fn metric(&self, kind: MetricKind) -> Option<f64> {
        let value = match kind {
            MetricKind::PeTtm => self.pe_ttm,
            MetricKind::Pb => self.pb,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Valuation metric used for the percentile rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Trailing PE
    PeTtm,
    /// Price/book
    Pb,
}

impl MetricKind {
    /// Metrics in order of preference.
    pub fn preference() -> &'static [MetricKind] {
        &[MetricKind::PeTtm, MetricKind::Pb]
    }

    /// Provider field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::PeTtm => "pe_ttm",
            MetricKind::Pb => "pb",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pe_ttm" | "pe" => Ok(MetricKind::PeTtm),
            "pb" => Ok(MetricKind::Pb),
            _ => Err(format!("Invalid valuation metric: {}", s)),
        }
    }
}

/// Kind of instrument behind a ticker code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Listed stock, valued on its own fundamentals
    Stock,
    /// Exchange-traded fund, valued through its underlying index
    Fund,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether a date falls inside the range.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
