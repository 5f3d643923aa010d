//! Flat CSV output, one row per ticker.

use csv::WriterBuilder;
use rust_decimal::Decimal;
use signal_core::error::{SignalError, SignalResult};
use signal_core::types::Signal;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Default output file name.
pub const DEFAULT_FILE_NAME: &str = "today_signals.csv";

/// Round `value` to `dp` decimals and print it without trailing zeros,
/// keeping at least one decimal (`25.0`, `0.3`, `25.1235`).
///
/// Missing or non-finite values become an empty string.
pub fn format_number(value: Option<f64>, dp: u32) -> String {
    value
        .filter(|v| v.is_finite())
        .and_then(Decimal::from_f64_retain)
        .map(|d| {
            let mut d = d.round_dp(dp).normalize();
            if dp > 0 && d.scale() == 0 {
                d.rescale(1);
            }
            d.to_string()
        })
        .unwrap_or_default()
}

/// Writes signals as CSV.
///
/// Column headers name the moving-average windows, e.g. `ma200` and
/// `vol_gt_vma20`.
#[derive(Debug, Clone)]
pub struct SignalCsvWriter {
    ma_window: usize,
    volume_ma_window: usize,
}

impl SignalCsvWriter {
    /// Create a writer for the given moving-average windows.
    pub fn new(ma_window: usize, volume_ma_window: usize) -> Self {
        Self {
            ma_window,
            volume_ma_window,
        }
    }

    /// Column headers in output order.
    pub fn headers(&self) -> Vec<String> {
        vec![
            "code".to_string(),
            "metric_name".to_string(),
            "latest_metric".to_string(),
            "percentile".to_string(),
            "price".to_string(),
            format!("ma{}", self.ma_window),
            "trend".to_string(),
            format!("vol_gt_vma{}", self.volume_ma_window),
            "action".to_string(),
            "as_of".to_string(),
        ]
    }

    fn record(signal: &Signal) -> [String; 10] {
        let valuation = signal.valuation.as_ref();
        [
            signal.ticker.clone(),
            valuation
                .map(|v| v.metric.to_string())
                .unwrap_or_else(|| "na".to_string()),
            format_number(valuation.map(|v| v.latest), 4),
            valuation
                .map(|v| v.percentile.to_string())
                .unwrap_or_default(),
            format_number(signal.price, 4),
            format_number(signal.moving_average, 4),
            signal.trend.to_string(),
            signal.volume_above_average.to_string(),
            signal.action.to_string(),
            signal
                .as_of
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ]
    }

    /// Write the header and one row per signal.
    pub fn write<W: Write>(&self, out: W, signals: &[Signal]) -> SignalResult<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);

        writer.write_record(self.headers()).map_err(csv_error)?;
        for signal in signals {
            writer.write_record(Self::record(signal)).map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Render the CSV into a string.
    pub fn render(&self, signals: &[Signal]) -> SignalResult<String> {
        let mut buf = Vec::new();
        self.write(&mut buf, signals)?;
        String::from_utf8(buf).map_err(|e| SignalError::Report(e.to_string()))
    }

    /// Write the CSV to `path`, replacing any previous file.
    ///
    /// The content goes to a sibling temporary file first and is renamed
    /// into place, so readers never observe a partial file.
    pub fn save(&self, path: &Path, signals: &[Signal]) -> SignalResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file_name = path
            .file_name()
            .ok_or_else(|| SignalError::Report(format!("invalid output path: {}", path.display())))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let file = fs::File::create(&tmp_path)?;
        if let Err(e) = self.write(&file, signals).and_then(|_| Ok(file.sync_all()?)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        info!(path = %path.display(), rows = signals.len(), "Signals written");
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> SignalError {
    SignalError::Report(e.to_string())
}
