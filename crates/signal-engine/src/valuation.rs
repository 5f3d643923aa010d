//! Valuation metric selection and ranking.

use signal_core::types::{MetricKind, Valuation, ValuationPoint};
use signal_indicators::percentile_rank;

/// Pick the preferred metric that has data and rank its latest value.
///
/// `pe_ttm` is used when the history holds any value for it, `pb`
/// otherwise. The rank is taken over all non-missing observations of the
/// chosen metric.
pub fn select_valuation(points: &[ValuationPoint]) -> Option<Valuation> {
    MetricKind::preference().iter().find_map(|&metric| {
        let history: Vec<f64> = points.iter().filter_map(|p| p.metric(metric)).collect();
        let latest = *history.last()?;
        let percentile = percentile_rank(&history, latest)?;
        Some(Valuation {
            metric,
            latest,
            percentile,
        })
    })
}
