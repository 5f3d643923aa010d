//! Validate configuration command.

use anyhow::Result;
use signal_config::load_validated;
use std::path::Path;

use crate::cli::ValidateArgs;

pub async fn run(args: &ValidateArgs, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_validated(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Tickers: {}", config.universe.tickers.len());
            println!("Funds: {}", config.universe.funds.len());
            println!("History from: {}", config.data.start_date);
            println!("MA window: {}", config.signal.ma_window);
            println!(
                "Thresholds: add < {}, trim > {}",
                config.signal.thresholds.add_below, config.signal.thresholds.trim_above
            );
            println!("Output: {}", config.output.path().display());

            if args.print {
                println!();
                println!("{}", config.to_toml()?);
            }
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
