//! Per-ticker signal types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::MetricKind;

/// Valuation percentile, always within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentile(f64);

impl Percentile {
    /// Lowest possible percentile.
    pub const MIN: Percentile = Percentile(0.0);
    /// Highest possible percentile.
    pub const MAX: Percentile = Percentile(100.0);

    /// Create a percentile, rejecting values outside [0, 100] and NaN.
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=100.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a percentile, clamping finite values into [0, 100].
    pub fn clamped(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self(value.clamp(0.0, 100.0)))
        } else {
            None
        }
    }

    /// Get the raw value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percentile {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Percentile::new(value).ok_or_else(|| format!("Percentile out of range: {}", value))
    }
}

impl From<Percentile> for f64 {
    fn from(p: Percentile) -> Self {
        p.0
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Position of the latest close relative to its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Above,
    Below,
    At,
}

impl Trend {
    /// Whether the trend confirms an entry (price not below its average).
    #[inline]
    pub fn is_supportive(&self) -> bool {
        matches!(self, Trend::Above | Trend::At)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Above => "above",
            Trend::Below => "below",
            Trend::At => "at",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested position action for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Cheap and trending up: add up to 5%
    Add,
    /// Expensive: trim up to 5%
    Trim,
    /// Nothing to do
    Hold,
    /// Cheap but trend not confirmed
    Wait,
}

impl Action {
    /// Human-readable label written to reports.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Add => "Add (≤5%)",
            Action::Trim => "Trim (≤5%)",
            Action::Hold => "Hold – no trade",
            Action::Wait => "Hold – wait for trend",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Latest valuation of a ticker and its historical rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Metric the rank was computed on
    pub metric: MetricKind,
    /// Latest observed value of the metric
    pub latest: f64,
    /// Rank of the latest value within its history
    pub percentile: Percentile,
}

/// Daily signal for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Ticker code
    pub ticker: String,
    /// Date of the latest price observation
    pub as_of: Option<NaiveDate>,
    /// Valuation rank, if a metric was available
    pub valuation: Option<Valuation>,
    /// Latest close
    pub price: Option<f64>,
    /// Moving average of closes
    pub moving_average: Option<f64>,
    /// Price relative to the moving average
    pub trend: Trend,
    /// Latest volume above its own moving average
    pub volume_above_average: bool,
    /// Suggested action
    pub action: Action,
}

impl Signal {
    /// A signal carrying no market information.
    ///
    /// Used when a ticker's data could not be obtained and the run
    /// continues anyway.
    pub fn degraded(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            as_of: None,
            valuation: None,
            price: None,
            moving_average: None,
            trend: Trend::Below,
            volume_above_average: false,
            action: Action::Hold,
        }
    }

    /// Percentile of the valuation, if any.
    pub fn percentile(&self) -> Option<Percentile> {
        self.valuation.map(|v| v.percentile)
    }
}
