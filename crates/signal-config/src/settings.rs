//! Configuration structures.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use signal_core::types::DateRange;
use signal_data::DEFAULT_BASE_URL;
use signal_engine::{SignalParams, Universe};
use signal_report::DEFAULT_FILE_NAME;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::ConfigError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub universe: UniverseSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub tushare: TushareSettings,
    #[serde(default)]
    pub signal: SignalParams,
    #[serde(default)]
    pub output: OutputSettings,
}

impl AppConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.universe()?;
        self.signal.validate()?;

        let today = Local::now().date_naive();
        if self.data.start_date > today {
            return Err(ConfigError::Invalid(format!(
                "data.start_date {} is in the future",
                self.data.start_date
            )));
        }
        if self.data.provider == DataProvider::Csv && self.data.csv_dir.is_none() {
            return Err(ConfigError::Invalid(
                "data.csv_dir is required when data.provider = \"csv\"".into(),
            ));
        }
        if self.output.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("output.file_name is empty".into()));
        }
        Ok(())
    }

    /// Build the ticker universe.
    pub fn universe(&self) -> Result<Universe, ConfigError> {
        Ok(Universe::new(
            &self.universe.tickers,
            &self.universe.underlying_map(),
        )?)
    }

    /// History window ending at `end`.
    pub fn history_range(&self, end: NaiveDate) -> DateRange {
        DateRange::new(self.data.start_date, end)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "daily-signals".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory for rolling log files
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// A fund and the index whose valuation it follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundMapping {
    pub code: String,
    pub index: String,
}

/// Tickers to evaluate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseSettings {
    /// Ticker codes, evaluated in this order
    pub tickers: Vec<String>,
    /// Funds valued through their underlying index
    pub funds: Vec<FundMapping>,
}

impl UniverseSettings {
    /// Map of fund code to index code.
    pub fn underlying_map(&self) -> BTreeMap<String, String> {
        self.funds
            .iter()
            .map(|f| (f.code.trim().to_string(), f.index.trim().to_string()))
            .collect()
    }
}

/// Where market data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataProvider {
    #[default]
    Tushare,
    Csv,
}

/// Market data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub provider: DataProvider,
    /// Directory of `<code>_daily.csv` / `<code>_valuation.csv` files
    pub csv_dir: Option<PathBuf>,
    /// First day of history used for ranks and averages
    pub start_date: NaiveDate,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            provider: DataProvider::Tushare,
            csv_dir: None,
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
        }
    }
}

/// Tushare Pro settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TushareSettings {
    /// Environment variable holding the API token
    pub token_env: String,
    /// Token used when the environment variable is unset
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for TushareSettings {
    fn default() -> Self {
        Self {
            token_env: "TUSHARE_TOKEN".to_string(),
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl TushareSettings {
    /// Resolve the API token, environment first.
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        let from_env = std::env::var(&self.token_env).ok();
        [from_env, self.token.clone()]
            .into_iter()
            .flatten()
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingToken(self.token_env.clone()))
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
    pub file_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl OutputSettings {
    /// Full output path.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}
