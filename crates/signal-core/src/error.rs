//! Error types for the signal generator.

use thiserror::Error;

/// Top-level signal generator error.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error for {ticker}: {source}")]
    Data {
        ticker: String,
        #[source]
        source: DataError,
    },

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SignalError {
    /// Attach a ticker to a data source failure.
    pub fn data(ticker: impl Into<String>, source: DataError) -> Self {
        SignalError::Data {
            ticker: ticker.into(),
            source,
        }
    }
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for {0} in the requested range")]
    NoDataAvailable(String),

    #[error("No valuation metric available for {0}")]
    NoValuation(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error {code}: {message}")]
    ApiError { code: i64, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;
