//! Ticker universe.

use serde::{Deserialize, Serialize};
use signal_core::error::SignalError;
use signal_core::types::InstrumentKind;
use std::collections::{BTreeMap, HashSet};

/// A ticker to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Provider code, e.g. `600519.SH`
    pub code: String,
    /// Index whose valuation stands in for this fund
    pub underlying: Option<String>,
}

impl Ticker {
    /// Funds carry an underlying index; everything else is a stock.
    pub fn kind(&self) -> InstrumentKind {
        if self.underlying.is_some() {
            InstrumentKind::Fund
        } else {
            InstrumentKind::Stock
        }
    }
}

/// Ordered set of unique tickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    tickers: Vec<Ticker>,
}

impl Universe {
    /// Build a universe from codes and a fund-to-index map.
    ///
    /// Fails on empty or duplicate codes, and on map entries that name a
    /// code outside the list.
    pub fn new<S: AsRef<str>>(
        codes: &[S],
        underlying: &BTreeMap<String, String>,
    ) -> Result<Self, SignalError> {
        if codes.is_empty() {
            return Err(SignalError::Config("ticker list is empty".into()));
        }

        let mut seen = HashSet::with_capacity(codes.len());
        let mut tickers = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() {
                return Err(SignalError::Config("ticker code is empty".into()));
            }
            if !seen.insert(code.to_string()) {
                return Err(SignalError::Config(format!("duplicate ticker code: {}", code)));
            }
            tickers.push(Ticker {
                code: code.to_string(),
                underlying: underlying.get(code).cloned(),
            });
        }

        if let Some(orphan) = underlying.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(SignalError::Config(format!(
                "underlying index mapped for unknown ticker: {}",
                orphan
            )));
        }

        Ok(Self { tickers })
    }

    /// Get the tickers in configured order.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticker> {
        self.tickers.iter()
    }
}
