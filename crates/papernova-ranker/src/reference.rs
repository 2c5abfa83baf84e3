//! High-impact reference set selection.
//!
//! The threshold is a citation-count quantile (median by default) using
//! linear interpolation between order statistics. Every paper at or above
//! the threshold joins the reference set.

use serde::Serialize;

/// Linear-interpolation quantile of `values` at `q` in [0, 1].
/// Returns `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Fixed subset of paper indices, determined once per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferenceSet {
    /// Citation threshold; `None` only for an empty corpus.
    pub threshold: Option<f64>,
    /// Member indices in ascending order.
    pub indices: Vec<usize>,
}

impl ReferenceSet {
    /// Select every paper whose citation count is `>=` the `impact_quantile` threshold.
    pub fn select(citation_counts: &[u64], impact_quantile: f64) -> Self {
        let values: Vec<f64> = citation_counts.iter().map(|&c| c as f64).collect();
        let Some(threshold) = quantile(&values, impact_quantile) else {
            return Self::default();
        };

        let indices = values
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c >= threshold)
            .map(|(i, _)| i)
            .collect();

        Self { threshold: Some(threshold), indices }
    }


    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
