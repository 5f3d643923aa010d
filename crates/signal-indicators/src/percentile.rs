//! Percentile rank of a value within a historical distribution.

use signal_core::types::Percentile;

/// Rank `value` against `history`.
///
/// The rank is the share of finite observations strictly below `value`,
/// expressed on a 0-100 scale and rounded to one decimal. Non-finite
/// observations are skipped. Returns `None` when no finite observation
/// remains or `value` itself is not finite.
pub fn percentile_rank(history: &[f64], value: f64) -> Option<Percentile> {
    if !value.is_finite() {
        return None;
    }

    let mut total = 0usize;
    let mut below = 0usize;
    for &x in history.iter().filter(|x| x.is_finite()) {
        total += 1;
        if x < value {
            below += 1;
        }
    }

    if total == 0 {
        return None;
    }

    let raw = below as f64 / total as f64 * 100.0;
    Percentile::clamped((raw * 10.0).round() / 10.0)
}
