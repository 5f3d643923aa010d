//! List tickers command.

use anyhow::Result;
use signal_config::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let universe = config.universe()?;

    println!("Monitored tickers");
    println!("═══════════════════════════════════════════════════════════");

    for ticker in universe.iter() {
        match &ticker.underlying {
            Some(index) => println!("  - {:<12} fund, valued on {}", ticker.code, index),
            None => println!("  - {:<12} stock", ticker.code),
        }
    }

    println!();
    println!("{} tickers", universe.len());

    Ok(())
}
