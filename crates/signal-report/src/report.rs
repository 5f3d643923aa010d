//! Signal report generation.

use serde::{Deserialize, Serialize};
use signal_core::error::SignalResult;
use signal_core::types::{Action, Signal};
use std::path::Path;

use crate::csv_writer::{format_number, SignalCsvWriter};

/// Signals of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReport {
    /// Moving average window over closes
    pub ma_window: usize,
    /// Moving average window over volumes
    pub volume_ma_window: usize,
    /// One signal per ticker, in configured order
    pub signals: Vec<Signal>,
}

impl SignalReport {
    /// Create a report.
    pub fn new(signals: Vec<Signal>, ma_window: usize, volume_ma_window: usize) -> Self {
        Self {
            ma_window,
            volume_ma_window,
            signals,
        }
    }

    fn csv_writer(&self) -> SignalCsvWriter {
        SignalCsvWriter::new(self.ma_window, self.volume_ma_window)
    }

    /// Count signals with the given action.
    pub fn count(&self, action: Action) -> usize {
        self.signals.iter().filter(|s| s.action == action).count()
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════════════════\n");
        s.push_str("                           DAILY SIGNALS                               \n");
        s.push_str("═══════════════════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!(
            "  {:<12}{:<8}{:>10}{:>8}{:>12}{:>12}  {:<7}{}\n",
            "CODE", "METRIC", "LATEST", "PCT", "PRICE", format!("MA{}", self.ma_window), "TREND", "ACTION"
        ));
        s.push_str("───────────────────────────────────────────────────────────────────────\n");

        for signal in &self.signals {
            let valuation = signal.valuation.as_ref();
            s.push_str(&format!(
                "  {:<12}{:<8}{:>10}{:>8}{:>12}{:>12}  {:<7}{}\n",
                signal.ticker,
                valuation.map(|v| v.metric.as_str()).unwrap_or("na"),
                format_number(valuation.map(|v| v.latest), 2),
                valuation.map(|v| v.percentile.to_string()).unwrap_or_default(),
                format_number(signal.price, 2),
                format_number(signal.moving_average, 2),
                signal.trend.as_str(),
                signal.action.label(),
            ));
        }
        s.push('\n');

        s.push_str("ACTIONS\n");
        s.push_str("───────────────────────────────────────────────────────────────────────\n");
        for action in [Action::Add, Action::Trim, Action::Wait, Action::Hold] {
            s.push_str(&format!("  {:<24}{}\n", action.label(), self.count(action)));
        }
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV.
    pub fn to_csv(&self) -> SignalResult<String> {
        self.csv_writer().render(&self.signals)
    }

    /// Write the CSV file.
    pub fn save_csv(&self, path: &Path) -> SignalResult<()> {
        self.csv_writer().save(path, &self.signals)
    }
}
