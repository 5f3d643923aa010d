//! Market data sources for daily signals.

mod csv_source;
mod tushare;

pub use csv_source::CsvMarketData;
pub use tushare::{TushareClient, DEFAULT_BASE_URL};

use chrono::NaiveDate;
use signal_core::error::DataError;
use signal_core::types::{PricePoint, ValuationPoint};
use std::collections::BTreeMap;

/// Parse a provider trade date (`YYYYMMDD` or `YYYY-MM-DD`).
pub(crate) fn parse_trade_date(s: &str) -> Result<NaiveDate, DataError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| DataError::ParseError(format!("Could not parse date: {}", s)))
}

/// Sort prices by date; on duplicate dates the later record wins.
pub(crate) fn normalize_prices(points: Vec<PricePoint>) -> Vec<PricePoint> {
    points
        .into_iter()
        .map(|p| (p.date, p))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

/// Sort valuations by date; on duplicate dates the later record wins.
pub(crate) fn normalize_valuations(points: Vec<ValuationPoint>) -> Vec<ValuationPoint> {
    points
        .into_iter()
        .map(|p| (p.date, p))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trade_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_trade_date("20240115").unwrap(), expected);
        assert_eq!(parse_trade_date("2024-01-15").unwrap(), expected);
        assert!(parse_trade_date("15/01/2024").is_err());
    }

    #[test]
    fn test_normalize_prices_sorts_and_dedups() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let points = vec![
            PricePoint::new(d(3), 3.0, 1.0),
            PricePoint::new(d(1), 1.0, 1.0),
            PricePoint::new(d(3), 3.5, 2.0),
        ];

        let normalized = normalize_prices(points);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].date, d(1));
        assert_eq!(normalized[1].close, 3.5);
    }
}
