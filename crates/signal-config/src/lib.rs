//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DataProvider, DataSettings, FundMapping, LoggingConfig,
    OutputSettings, TushareSettings, UniverseSettings,
};

use config::{Config, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing credential: set {0} or tushare.token")]
    MissingToken(String),

    #[error("Could not render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

impl From<signal_core::SignalError> for ConfigError {
    fn from(e: signal_core::SignalError) -> Self {
        match e {
            signal_core::SignalError::Config(msg) => ConfigError::Invalid(msg),
            other => ConfigError::Invalid(other.to_string()),
        }
    }
}

/// Load configuration from file and environment.
///
/// Environment variables prefixed `SIGNALS__` override file values, with
/// `__` separating nested keys (e.g. `SIGNALS__SIGNAL__MA_WINDOW=120`).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("SIGNALS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Load and validate configuration.
pub fn load_validated(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = load_config(path)?;
    config.validate()?;
    Ok(config)
}
