//! Normalisation functions for the score components.

/// Citation sparsity: 1 / (1 + count). Always in (0, 1], strictly
/// decreasing in `count`.
pub fn inverse_count(count: u64) -> f64 {
    1.0 / (1.0 + count as f64)
}

/// Linear position of `value` between `min_val` and `max_val`, not clamped.
/// Returns `None` when the range is degenerate.
pub fn minmax_unclamped(value: f64, min_val: f64, max_val: f64) -> Option<f64> {
    let span = max_val - min_val;
    if span == 0.0 {
        return None;
    }
    Some((value - min_val) / span)
}

/// Recency of a publication year against the corpus minimum and the
/// reference year: (year - min_year) / (reference_year - min_year).
/// `None` when `reference_year == min_year`.
pub fn recency(year: i32, min_year: i32, reference_year: i32) -> Option<f64> {
    minmax_unclamped(year as f64, min_year as f64, reference_year as f64)
}
