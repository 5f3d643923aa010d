//! Daily valuation and trend signal generator.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use signal_config::{load_config, AppConfig};
use signal_monitor::setup_logging;
use std::path::Path;

fn load(path: &Path) -> Result<AppConfig> {
    load_config(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Execute command
    match &cli.command {
        Commands::Run(args) => {
            let config = load(&cli.config)?;
            let _guard = setup_logging(&cli.log_options(Some(&config.logging)));
            cli::commands::run::run(args, config).await
        }
        Commands::Tickers => {
            let config = load(&cli.config)?;
            let _guard = setup_logging(&cli.log_options(Some(&config.logging)));
            cli::commands::tickers::run(&config).await
        }
        Commands::ValidateConfig(args) => {
            let _guard = setup_logging(&cli.log_options(None));
            cli::commands::validate::run(args, &cli.config).await
        }
    }
}
