//! Signal computation parameters.

use serde::{Deserialize, Serialize};
use signal_core::error::SignalError;

/// Percentile thresholds driving the action decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Percentiles strictly below this are cheap
    pub add_below: f64,
    /// Percentiles strictly above this are expensive
    pub trim_above: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            add_below: 30.0,
            trim_above: 70.0,
        }
    }
}

impl Thresholds {
    /// Validate the thresholds.
    pub fn validate(&self) -> Result<(), SignalError> {
        for (name, value) in [("add_below", self.add_below), ("trim_above", self.trim_above)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(SignalError::Config(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }
        if self.add_below >= self.trim_above {
            return Err(SignalError::Config(format!(
                "add_below ({}) must be lower than trim_above ({})",
                self.add_below, self.trim_above
            )));
        }
        Ok(())
    }
}

/// Parameters of a signal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    /// Moving average window over closes, in trading days
    pub ma_window: usize,
    /// Moving average window over volumes, in trading days
    pub volume_ma_window: usize,
    /// Band around the moving average, in percent, classified as `at`
    pub trend_tolerance_pct: f64,
    /// Abort the run on the first ticker without data
    pub strict: bool,
    /// Action thresholds
    pub thresholds: Thresholds,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            ma_window: 200,
            volume_ma_window: 20,
            trend_tolerance_pct: 0.0,
            strict: true,
            thresholds: Thresholds::default(),
        }
    }
}

impl SignalParams {
    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.ma_window == 0 {
            return Err(SignalError::Config("ma_window must be greater than 0".into()));
        }
        if self.volume_ma_window == 0 {
            return Err(SignalError::Config(
                "volume_ma_window must be greater than 0".into(),
            ));
        }
        if !self.trend_tolerance_pct.is_finite() || self.trend_tolerance_pct < 0.0 {
            return Err(SignalError::Config(format!(
                "trend_tolerance_pct must be non-negative, got {}",
                self.trend_tolerance_pct
            )));
        }
        self.thresholds.validate()
    }
}
