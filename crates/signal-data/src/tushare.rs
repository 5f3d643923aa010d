//! Tushare Pro API client for A-share daily data.
//!
//! Endpoints used:
//! - `daily`: stock daily K-line
//! - `fund_daily`: exchange-traded fund daily K-line
//! - `daily_basic`: stock valuation (`pe_ttm`, `pb`)
//! - `index_dailybasic`: index valuation (`pe_ttm`, `pb`)
//!
//! Every call is a `POST` of `{api_name, token, params, fields}` to the
//! base URL. Responses carry a column list and row arrays:
//! `{"code": 0, "msg": "", "data": {"fields": [..], "items": [[..]]}}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use signal_core::error::DataError;
use signal_core::traits::MarketDataSource;
use signal_core::types::{DateRange, InstrumentKind, PricePoint, ValuationPoint};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{normalize_prices, normalize_valuations, parse_trade_date};

/// Public Tushare Pro endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.tushare.pro";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const PRICE_FIELDS: &str = "trade_date,close,vol";
const VALUATION_FIELDS: &str = "trade_date,pe_ttm,pb";

/// Tushare Pro HTTP client.
pub struct TushareClient {
    token: String,
    client: Client,
    base_url: String,
}

impl TushareClient {
    /// Create a client against the public endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self, DataError> {
        Self::with_options(token, DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom base URL and request timeout.
    pub fn with_options(
        token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(DataError::Authentication("Tushare token is empty".into()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self {
            token,
            client,
            base_url: base_url.into(),
        })
    }

    /// Call an API endpoint and return its table.
    async fn call_api(
        &self,
        api_name: &str,
        params: BTreeMap<&str, String>,
        fields: &str,
    ) -> Result<TushareTable, DataError> {
        let request = TushareRequest {
            api_name,
            token: &self.token,
            params,
            fields,
        };

        debug!(api = api_name, "Calling Tushare");

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::ConnectionError(format!(
                "Tushare HTTP {}: {}",
                status, body
            )));
        }

        let result: TushareResponse = response
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("Invalid Tushare response: {}", e)))?;

        if result.code != 0 {
            warn!(api = api_name, code = result.code, "Tushare returned an error");
            return Err(DataError::ApiError {
                code: result.code,
                message: result.msg.unwrap_or_default(),
            });
        }

        Ok(result.data.unwrap_or_default())
    }

    fn range_params(code: &str, range: DateRange) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        params.insert("ts_code", code.to_string());
        params.insert("start_date", range.start.format("%Y%m%d").to_string());
        params.insert("end_date", range.end.format("%Y%m%d").to_string());
        params
    }

    async fn fetch_valuation(
        &self,
        api_name: &str,
        code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError> {
        let table = self
            .call_api(api_name, Self::range_params(code, range), VALUATION_FIELDS)
            .await?;
        let points = table.valuations()?;
        debug!(code, api = api_name, rows = points.len(), "Fetched valuations");
        Ok(normalize_valuations(points))
    }
}

#[async_trait]
impl MarketDataSource for TushareClient {
    async fn daily_prices(
        &self,
        code: &str,
        kind: InstrumentKind,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, DataError> {
        let api_name = match kind {
            InstrumentKind::Stock => "daily",
            InstrumentKind::Fund => "fund_daily",
        };
        let table = self
            .call_api(api_name, Self::range_params(code, range), PRICE_FIELDS)
            .await?;
        let points = table.prices()?;
        debug!(code, api = api_name, rows = points.len(), "Fetched prices");
        Ok(normalize_prices(points))
    }

    async fn stock_valuation(
        &self,
        code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError> {
        self.fetch_valuation("daily_basic", code, range).await
    }

    async fn index_valuation(
        &self,
        index_code: &str,
        range: DateRange,
    ) -> Result<Vec<ValuationPoint>, DataError> {
        self.fetch_valuation("index_dailybasic", index_code, range)
            .await
    }

    fn name(&self) -> &str {
        "tushare"
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TushareRequest<'a> {
    api_name: &'a str,
    token: &'a str,
    params: BTreeMap<&'a str, String>,
    fields: &'a str,
}

#[derive(Debug, Deserialize)]
struct TushareResponse {
    code: i64,
    msg: Option<String>,
    data: Option<TushareTable>,
}

#[derive(Debug, Default, Deserialize)]
struct TushareTable {
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    items: Vec<Vec<Value>>,
}

impl TushareTable {
    fn column(&self, name: &str) -> Result<usize, DataError> {
        self.fields
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| DataError::ParseError(format!("Missing column: {}", name)))
    }

    /// Rows with no close are dropped; a missing volume becomes NaN.
    fn prices(&self) -> Result<Vec<PricePoint>, DataError> {
        if self.items.is_empty() {
            return Ok(Vec::new());
        }
        let date_col = self.column("trade_date")?;
        let close_col = self.column("close")?;
        let vol_col = self.column("vol")?;

        let mut points = Vec::with_capacity(self.items.len());
        for row in &self.items {
            let date = parse_trade_date(cell_str(row, date_col)?)?;
            let Some(close) = cell_f64(row, close_col) else {
                continue;
            };
            let volume = cell_f64(row, vol_col).unwrap_or(f64::NAN);
            points.push(PricePoint::new(date, close, volume));
        }
        Ok(points)
    }

    fn valuations(&self) -> Result<Vec<ValuationPoint>, DataError> {
        if self.items.is_empty() {
            return Ok(Vec::new());
        }
        let date_col = self.column("trade_date")?;
        let pe_col = self.column("pe_ttm").ok();
        let pb_col = self.column("pb").ok();

        let mut points = Vec::with_capacity(self.items.len());
        for row in &self.items {
            let date = parse_trade_date(cell_str(row, date_col)?)?;
            let pe_ttm = pe_col.and_then(|c| cell_f64(row, c));
            let pb = pb_col.and_then(|c| cell_f64(row, c));
            points.push(ValuationPoint::new(date, pe_ttm, pb));
        }
        Ok(points)
    }
}

fn cell_str(row: &[Value], col: usize) -> Result<&str, DataError> {
    row.get(col)
        .and_then(Value::as_str)
        .ok_or_else(|| DataError::ParseError(format!("Expected text in column {}", col)))
}

/// Numbers may arrive as JSON numbers, numeric strings, or null.
fn cell_f64(row: &[Value], col: usize) -> Option<f64> {
    let value = match row.get(col)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}
