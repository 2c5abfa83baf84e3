//! Dense pairwise cosine similarity matrix.
//!
//! This is the single O(n²) cost centre of the engine. The matrix is built
//! once per run and queried by row/column afterwards.

use serde::Serialize;

use crate::vectorizer::SparseVector;

/// Distance from 1.0 under which a cosine value is treated as an exact match.
pub const UNIT_SNAP_EPSILON: f64 = 1e-9;

/// Cosine similarity of two sparse vectors, in [0, 1].
/// A zero vector has similarity 0 against anything, itself included.
/// Values within `UNIT_SNAP_EPSILON` of 1 snap to exactly 1.0.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    cosine_with_norms(a, a.norm(), b, b.norm())
}

/// Symmetric `n × n` similarity matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute every pair `(i, j)`, including the diagonal.
    pub fn build(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(SparseVector::norm).collect();

        let row = |i: usize| -> Vec<f64> {
            (0..n).map(|j| cosine_with_norms(&vectors[i], norms[i], &vectors[j], norms[j])).collect()
        };

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<f64>> = {
            use rayon::prelude::*;
            (0..n).into_par_iter().map(row).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<f64>> = (0..n).map(row).collect();

        let data = rows.into_iter().flatten().collect();
        tracing::debug!(papers = n, cells = n * n, "Similarity matrix built");
        Self { n, data }
    }

    /// Number of rows (= columns).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Same as [`cosine`] with precomputed norms.
fn cosine_with_norms(a: &SparseVector, norm_a: f64, b: &SparseVector, norm_b: f64) -> f64 {
    let denom = norm_a * norm_b;
    if denom == 0.0 {
        return 0.0;
    }
    let sim = (a.dot(b) / denom).clamp(0.0, 1.0);
    if (1.0 - sim) <= UNIT_SNAP_EPSILON {
        1.0
    } else {
        sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfIdfModel;

    fn matrix_for(texts: &[&str]) -> SimilarityMatrix {
        let (_, vectors) = TfIdfModel::fit_transform(texts, 1000);
        SimilarityMatrix::build(&vectors)
    }

    #[test]
    fn test_empty_matrix() {
        let m = SimilarityMatrix::build(&[]);
        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
    }

    #[test]
    fn test_diagonal_is_one_for_non_zero_vectors() {
        let m = matrix_for(&["graph neural network", "protein structure prediction"]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
    }

    #[test]
    fn test_zero_vector_similarity_is_zero() {
        let m = matrix_for(&["graph neural network", ""]);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 0), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let m = matrix_for(&[
            "graph neural network message passing",
            "graph attention network",
            "protein folding structure",
            "neural protein structure model",
        ]);
        for i in 0..m.len() {
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i), "asymmetry at ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_values_within_unit_interval() {
        let m = matrix_for(&["alpha beta", "beta gamma", "gamma delta", "alpha"]);
        for i in 0..m.len() {
            for &v in m.row(i) {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_disjoint_texts_have_zero_similarity() {
        let m = matrix_for(&["quantum computing", "marine biology"]);
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn test_exact_duplicates_snap_to_one() {
        let m = matrix_for(&["sparse retrieval model", "sparse retrieval model", "other topic"]);
        assert_eq!(m.get(0, 1), 1.0);
    }

    #[test]
    fn test_cosine_matches_matrix_entries() {
        let (_, vectors) = TfIdfModel::fit_transform(&["a1 b2 c3", "b2 c3 d4"], 100);
        let m = SimilarityMatrix::build(&vectors);
        assert_eq!(cosine(&vectors[0], &vectors[1]), m.get(0, 1));
    }
}
