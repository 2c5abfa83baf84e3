//! Peak similarity of each paper to the high-impact reference set.

use crate::reference::ReferenceSet;
use crate::similarity::SimilarityMatrix;

/// `max(sim(i, r))` over reference members `r`, skipping exact matches
/// (`sim == 1.0`). The matrix stores any cosine within
/// [`UNIT_SNAP_EPSILON`](crate::similarity::UNIT_SNAP_EPSILON) of 1 as exactly
/// 1.0, so near-exact matches are dropped as well. Self-similarity is excluded
/// this way whether or not `i` is itself a reference member, as is a duplicate
/// text. Returns 0 when no candidate remains.
pub fn max_similarity_to_reference(sims: &SimilarityMatrix, reference: &ReferenceSet, i: usize) -> f64 {
    let row = sims.row(i);
    reference
        .indices
        .iter()
        .map(|&r| row[r])
        .filter(|&s| s != 1.0)
        .fold(0.0, f64::max)
}

/// Peak reference similarity for every paper, index-aligned with the matrix.
pub fn max_similarities(sims: &SimilarityMatrix, reference: &ReferenceSet) -> Vec<f64> {
    let n = sims.len();

    #[cfg(feature = "parallel")]
    let peaks: Vec<f64> = {
        use rayon::prelude::*;
        (0..n)
            .into_par_iter()
            .map(|i| max_similarity_to_reference(sims, reference, i))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let peaks: Vec<f64> = (0..n)
        .map(|i| max_similarity_to_reference(sims, reference, i))
        .collect();

    peaks
}
