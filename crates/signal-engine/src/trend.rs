//! Price trend and volume confirmation.

use chrono::NaiveDate;
use signal_core::types::{PricePoint, Trend};
use signal_indicators::last_sma;

/// Classify a price against its moving average.
///
/// Prices within `tolerance_pct` percent of the average are `At`. Without
/// a usable average the trend is `Below`.
pub fn classify_trend(price: f64, moving_average: Option<f64>, tolerance_pct: f64) -> Trend {
    match moving_average {
        Some(ma) if ma.is_finite() && price.is_finite() => {
            let band = ma.abs() * tolerance_pct / 100.0;
            if (price - ma).abs() <= band {
                Trend::At
            } else if price > ma {
                Trend::Above
            } else {
                Trend::Below
            }
        }
        _ => Trend::Below,
    }
}

/// Latest price-derived readings of a ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSnapshot {
    pub as_of: NaiveDate,
    pub price: f64,
    pub moving_average: Option<f64>,
    pub trend: Trend,
    pub volume_above_average: bool,
}

impl TrendSnapshot {
    /// Build a snapshot from a chronological price series.
    ///
    /// Returns `None` for an empty series.
    pub fn from_prices(
        prices: &[PricePoint],
        ma_window: usize,
        volume_ma_window: usize,
        tolerance_pct: f64,
    ) -> Option<Self> {
        let last = prices.last()?;

        let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();
        let volumes: Vec<f64> = prices.iter().map(|p| p.volume).collect();

        let moving_average = last_sma(&closes, ma_window).filter(|v| v.is_finite());
        let volume_average = last_sma(&volumes, volume_ma_window).filter(|v| v.is_finite());

        let volume_above_average = match volume_average {
            Some(avg) => last.volume.is_finite() && last.volume > avg,
            None => false,
        };

        Some(Self {
            as_of: last.date,
            price: last.close,
            moving_average,
            trend: classify_trend(last.close, moving_average, tolerance_pct),
            volume_above_average,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(closes: &[f64], volumes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&c, &v))| PricePoint::new(start + chrono::Days::new(i as u64), c, v))
            .collect()
    }

    #[test]
    fn test_classify_trend() {
        assert_eq!(classify_trend(105.0, Some(100.0), 0.0), Trend::Above);
        assert_eq!(classify_trend(95.0, Some(100.0), 0.0), Trend::Below);
        assert_eq!(classify_trend(100.0, Some(100.0), 0.0), Trend::At);
        assert_eq!(classify_trend(100.5, Some(100.0), 1.0), Trend::At);
        assert_eq!(classify_trend(100.0, None, 0.0), Trend::Below);
        assert_eq!(classify_trend(100.0, Some(f64::NAN), 0.0), Trend::Below);
    }

    #[test]
    fn test_snapshot_uptrend_with_volume_spike() {
        let prices = series(&[10.0, 11.0, 12.0, 13.0], &[100.0, 100.0, 100.0, 400.0]);
        let snap = TrendSnapshot::from_prices(&prices, 3, 3, 0.0).unwrap();

        assert_eq!(snap.price, 13.0);
        assert_eq!(snap.moving_average, Some(12.0));
        assert_eq!(snap.trend, Trend::Above);
        assert!(snap.volume_above_average);
        assert_eq!(snap.as_of, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
    }

    #[test]
    fn test_snapshot_short_history() {
        let prices = series(&[10.0, 11.0], &[100.0, 200.0]);
        let snap = TrendSnapshot::from_prices(&prices, 200, 20, 0.0).unwrap();

        assert_eq!(snap.moving_average, None);
        assert_eq!(snap.trend, Trend::Below);
        assert!(!snap.volume_above_average);
    }

    #[test]
    fn test_snapshot_missing_volume() {
        let prices = series(&[10.0, 9.0], &[100.0, f64::NAN]);
        let snap = TrendSnapshot::from_prices(&prices, 2, 1, 0.0).unwrap();

        assert_eq!(snap.trend, Trend::Below);
        assert!(!snap.volume_above_average);
    }

    #[test]
    fn test_snapshot_empty() {
        assert!(TrendSnapshot::from_prices(&[], 200, 20, 0.0).is_none());
    }
}
