//! Signal engine: fetch, compute, decide.

use signal_core::error::{DataError, SignalError, SignalResult};
use signal_core::traits::MarketDataSource;
use signal_core::types::{DateRange, Signal, Trend, Valuation};
use tracing::{debug, info, warn};

use crate::{decide_action, select_valuation, SignalParams, Ticker, TrendSnapshot, Universe};

/// Computes daily signals from a market data source.
pub struct SignalEngine<'a> {
    source: &'a dyn MarketDataSource,
    params: SignalParams,
    range: DateRange,
}

impl<'a> SignalEngine<'a> {
    /// Create an engine reading `range` from `source`.
    pub fn new(
        source: &'a dyn MarketDataSource,
        params: SignalParams,
        range: DateRange,
    ) -> SignalResult<Self> {
        params.validate()?;
        if range.start > range.end {
            return Err(SignalError::Config(format!(
                "history start {} is after end {}",
                range.start, range.end
            )));
        }
        Ok(Self {
            source,
            params,
            range,
        })
    }

    /// Get the run parameters.
    pub fn params(&self) -> &SignalParams {
        &self.params
    }

    /// Evaluate every ticker in order, yielding exactly one signal each.
    ///
    /// In strict mode the first failing ticker aborts the run. Otherwise
    /// failures are logged and the ticker keeps whatever data was available.
    pub async fn run(&self, universe: &Universe) -> SignalResult<Vec<Signal>> {
        info!(
            source = self.source.name(),
            tickers = universe.len(),
            start = %self.range.start,
            end = %self.range.end,
            "Computing signals"
        );

        let mut signals = Vec::with_capacity(universe.len());
        for ticker in universe.iter() {
            let signal = self
                .evaluate(ticker)
                .await
                .map_err(|e| SignalError::data(&ticker.code, e))?;
            info!(
                ticker = %signal.ticker,
                percentile = ?signal.percentile().map(|p| p.value()),
                trend = %signal.trend,
                action = %signal.action,
                "Signal computed"
            );
            signals.push(signal);
        }

        Ok(signals)
    }

    /// Evaluate a single ticker.
    ///
    /// Stocks are valued on their own metrics, funds on their underlying
    /// index. In strict mode any fetch failure or a missing valuation is an
    /// error. Otherwise prices and valuation are read independently: a
    /// ticker without prices keeps its valuation with trend `below`, and a
    /// ticker without valuation holds.
    pub async fn evaluate(&self, ticker: &Ticker) -> Result<Signal, DataError> {
        if self.params.strict {
            let snapshot = self.price_snapshot(ticker).await?;
            let valuation = self
                .valuation(ticker)
                .await?
                .ok_or_else(|| DataError::NoValuation(ticker.code.clone()))?;
            return Ok(self.signal(ticker, Some(snapshot), Some(valuation)));
        }

        let snapshot = match self.price_snapshot(ticker).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(ticker = %ticker.code, error = %e, "Prices unavailable, trend set to below");
                None
            }
        };
        let valuation = match self.valuation(ticker).await {
            Ok(Some(valuation)) => Some(valuation),
            Ok(None) => {
                warn!(ticker = %ticker.code, "No valuation metric available");
                None
            }
            Err(e) => {
                warn!(ticker = %ticker.code, error = %e, "Valuation unavailable");
                None
            }
        };

        Ok(self.signal(ticker, snapshot, valuation))
    }

    async fn price_snapshot(&self, ticker: &Ticker) -> Result<TrendSnapshot, DataError> {
        let prices = self
            .source
            .daily_prices(&ticker.code, ticker.kind(), self.range)
            .await?;
        debug!(ticker = %ticker.code, prices = prices.len(), "Fetched prices");

        TrendSnapshot::from_prices(
            &prices,
            self.params.ma_window,
            self.params.volume_ma_window,
            self.params.trend_tolerance_pct,
        )
        .ok_or_else(|| DataError::NoDataAvailable(ticker.code.clone()))
    }

    async fn valuation(&self, ticker: &Ticker) -> Result<Option<Valuation>, DataError> {
        let valuations = match &ticker.underlying {
            Some(index) => self.source.index_valuation(index, self.range).await?,
            None => self.source.stock_valuation(&ticker.code, self.range).await?,
        };
        debug!(ticker = %ticker.code, valuations = valuations.len(), "Fetched valuations");

        Ok(select_valuation(&valuations))
    }

    /// Without prices the trend is `below` and the price fields stay empty.
    fn signal(
        &self,
        ticker: &Ticker,
        snapshot: Option<TrendSnapshot>,
        valuation: Option<Valuation>,
    ) -> Signal {
        let trend = snapshot.as_ref().map_or(Trend::Below, |s| s.trend);
        let action = decide_action(
            valuation.map(|v| v.percentile),
            trend,
            &self.params.thresholds,
        );

        Signal {
            ticker: ticker.code.clone(),
            as_of: snapshot.as_ref().map(|s| s.as_of),
            valuation,
            price: snapshot.as_ref().map(|s| s.price),
            moving_average: snapshot.as_ref().and_then(|s| s.moving_average),
            trend,
            volume_above_average: snapshot.as_ref().is_some_and(|s| s.volume_above_average),
            action,
        }
    }
}
