//! Action decision.

use signal_core::types::{Action, Percentile, Trend};

use crate::Thresholds;

/// Decide the action for a ticker.
///
/// Expensive tickers are trimmed regardless of trend. Cheap tickers are
/// added only when the trend is supportive; otherwise they wait.
pub fn decide_action(percentile: Option<Percentile>, trend: Trend, thresholds: &Thresholds) -> Action {
    let Some(p) = percentile.map(|p| p.value()) else {
        return Action::Hold;
    };

    if p > thresholds.trim_above {
        Action::Trim
    } else if p < thresholds.add_below {
        if trend.is_supportive() {
            Action::Add
        } else {
            Action::Wait
        }
    } else {
        Action::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(v: f64) -> Option<Percentile> {
        Percentile::new(v)
    }

    #[test]
    fn test_no_percentile_holds() {
        let t = Thresholds::default();
        assert_eq!(decide_action(None, Trend::Above, &t), Action::Hold);
    }

    #[test]
    fn test_expensive_trims_in_any_trend() {
        let t = Thresholds::default();
        assert_eq!(decide_action(pct(85.0), Trend::Above, &t), Action::Trim);
        assert_eq!(decide_action(pct(85.0), Trend::Below, &t), Action::Trim);
    }

    #[test]
    fn test_cheap_depends_on_trend() {
        let t = Thresholds::default();
        assert_eq!(decide_action(pct(12.0), Trend::Above, &t), Action::Add);
        assert_eq!(decide_action(pct(12.0), Trend::At, &t), Action::Add);
        assert_eq!(decide_action(pct(12.0), Trend::Below, &t), Action::Wait);
    }

    #[test]
    fn test_boundaries_hold() {
        let t = Thresholds::default();
        assert_eq!(decide_action(pct(70.0), Trend::Above, &t), Action::Hold);
        assert_eq!(decide_action(pct(30.0), Trend::Above, &t), Action::Hold);
        assert_eq!(decide_action(pct(50.0), Trend::Below, &t), Action::Hold);
    }
}
