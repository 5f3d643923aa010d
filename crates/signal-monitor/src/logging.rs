//! Logging setup.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging options.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    /// Directory for daily-rolling log files
    pub file_dir: Option<PathBuf>,
}

impl LogOptions {
    /// Options for console logging at `level`.
    pub fn new(level: impl Into<String>, format: LogFormat) -> Self {
        Self {
            level: level.into(),
            format,
            file_dir: None,
        }
    }

    /// Also write logs to daily files under `dir`.
    pub fn with_file_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file_dir = Some(dir.into());
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Setup logging with the given options.
///
/// The returned guard flushes the file writer on drop and must be held
/// for the lifetime of the program.
pub fn setup_logging(options: &LogOptions) -> Option<WorkerGuard> {
    let (file_layer, guard) = match &options.file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "daily-signals.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(options.filter())
        .with(file_layer);

    match options.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = LogOptions::new("debug", LogFormat::Json).with_file_dir("logs");

        assert_eq!(options.level, "debug");
        assert_eq!(options.format, LogFormat::Json);
        assert_eq!(options.file_dir, Some(PathBuf::from("logs")));
    }
}
