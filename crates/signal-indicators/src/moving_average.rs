//! Moving average indicators.

use signal_core::error::IndicatorError;
use signal_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Create a new SMA, rejecting a zero period.
    pub fn try_new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "SMA period must be greater than 0".into(),
            ));
        }
        Ok(Self { period })
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }

    /// Sums only the trailing window.
    fn latest(&self, data: &[f64]) -> Option<f64> {
        if data.len() < self.period {
            return None;
        }
        let window = &data[data.len() - self.period..];
        Some(window.iter().sum::<f64>() / self.period as f64)
    }
}

/// Mean of the last `period` values, or `None` when the history is shorter.
pub fn last_sma(data: &[f64], period: usize) -> Option<f64> {
    Sma::try_new(period).ok()?.latest(data)
}
