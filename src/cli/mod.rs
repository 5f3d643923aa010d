//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use signal_config::LoggingConfig;
use signal_monitor::{LogFormat, LogOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daily-signals")]
#[command(author, version, about = "Daily valuation percentile and trend signals")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SIGNALS_CONFIG", default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Merge command-line logging flags with the configured settings.
    pub fn log_options(&self, logging: Option<&LoggingConfig>) -> LogOptions {
        let level = match (&self.log_level, logging) {
            (Some(level), _) => level.as_str().to_string(),
            (None, Some(cfg)) => cfg.level.clone(),
            (None, None) => "info".to_string(),
        };
        let json = self.json_logs || logging.is_some_and(|cfg| cfg.format == "json");
        let format = if json { LogFormat::Json } else { LogFormat::Pretty };

        let options = LogOptions::new(level, format);
        match logging.and_then(|cfg| cfg.file.as_deref()) {
            Some(dir) => options.with_file_dir(dir),
            None => options,
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch data, compute signals and write the CSV report
    Run(RunArgs),
    /// List the configured tickers
    Tickers,
    /// Validate configuration
    ValidateConfig(ValidateArgs),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Read market data from CSV files in this directory instead of Tushare
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output CSV path (defaults to the configured output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Last day of history (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Terminal output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Emit degraded rows for tickers without data instead of failing
    #[arg(long)]
    pub lenient: bool,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Print the resolved configuration as TOML
    #[arg(long)]
    pub print: bool,
}
