//! Run command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use signal_config::{AppConfig, DataProvider};
use signal_core::traits::MarketDataSource;
use signal_data::{CsvMarketData, TushareClient};
use signal_engine::SignalEngine;
use signal_report::SignalReport;
use std::time::Duration;
use tracing::info;

use crate::cli::{OutputFormat, RunArgs};

pub async fn run(args: &RunArgs, mut config: AppConfig) -> Result<()> {
    // Command-line overrides
    if let Some(dir) = &args.data_dir {
        config.data.provider = DataProvider::Csv;
        config.data.csv_dir = Some(dir.clone());
    }
    if args.lenient {
        config.signal.strict = false;
    }
    config.validate().context("Invalid configuration")?;

    let universe = config.universe()?;
    let end = args.end.unwrap_or_else(|| Local::now().date_naive());
    let range = config.history_range(end);

    let source = build_source(&config)?;
    let engine = SignalEngine::new(source.as_ref(), config.signal.clone(), range)?;
    let signals = engine.run(&universe).await.context("Signal run failed")?;

    let report = SignalReport::new(
        signals,
        config.signal.ma_window,
        config.signal.volume_ma_window,
    );
    let path = args.output.clone().unwrap_or_else(|| config.output.path());
    report
        .save_csv(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }
    info!("Signals saved to {}", path.display());

    Ok(())
}

fn build_source(config: &AppConfig) -> Result<Box<dyn MarketDataSource>> {
    match config.data.provider {
        DataProvider::Tushare => {
            let token = config.tushare.resolve_token()?;
            let client = TushareClient::with_options(
                token,
                config.tushare.base_url.clone(),
                Duration::from_secs(config.tushare.timeout_secs),
            )?;
            Ok(Box::new(client))
        }
        DataProvider::Csv => {
            let dir = config
                .data
                .csv_dir
                .as_ref()
                .context("data.csv_dir is not set")?;
            Ok(Box::new(CsvMarketData::new(dir)?))
        }
    }
}
