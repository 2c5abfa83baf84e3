//! Composite novelty score computation.
//!
//! novelty_score  = α·novelty_citations + β·max_similarity + γ·recency
//! combined_score = novelty_score × citation_count
//!
//! `max_similarity` enters positively, so papers textually closest to the
//! high-impact reference set score *higher*. This rewards closeness to
//! established work, not novelty in the ordinary sense, and is most likely
//! an inverted term. It is kept literal so rankings stay compatible with
//! earlier runs; changing the sign of β is a ranking change, not a fix.

use papernova_common::{NovaError, Paper, RecencyFallback, Result};
use serde::Serialize;

use crate::normalise::{inverse_count, recency};
use crate::vectorizer::SparseVector;
use crate::weights::ScoreWeights;

/// A paper with every field the engine derives for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPaper {
    #[serde(flatten)]
    pub paper: Paper,
    #[serde(skip_serializing)]
    pub text_vector: SparseVector,
    /// Peak similarity to the reference set, in [0, 1]
    pub max_similarity: f64,
    /// 1 / (1 + citations), in (0, 1]
    pub novelty_citations: f64,
    pub recency: f64,
    pub novelty_score: f64,
    /// Unbounded above; scales with citation count
    pub combined_score: f64,
}

/// Per-paper recency against the corpus minimum year.
///
/// When every paper shares `reference_year` as its publication year the
/// denominator vanishes and `fallback` decides the outcome.
pub fn recency_scores(years: &[i32], reference_year: i32, fallback: RecencyFallback) -> Result<Vec<f64>> {
    let Some(&min_year) = years.iter().min() else {
        return Ok(vec![]);
    };

    if min_year == reference_year {
        let value = match fallback {
            RecencyFallback::Zero => 0.0,
            RecencyFallback::One => 1.0,
            RecencyFallback::Error => {
                return Err(NovaError::UndefinedRecency { reference_year });
            }
        };
        tracing::warn!(
            reference_year,
            fallback = ?fallback,
            "Recency denominator is zero; using fallback value {value} for every paper"
        );
        return Ok(vec![value; years.len()]);
    }

    Ok(years
        .iter()
        .map(|&y| recency(y, min_year, reference_year).unwrap_or(0.0))
        .collect())
}

/// Weighted blend of the three components.
pub fn compute_novelty_score(
    novelty_citations: f64,
    max_similarity: f64,
    recency: f64,
    weights: &ScoreWeights,
) -> f64 {
    let components = [novelty_citations, max_similarity, recency];
    components
        .iter()
        .zip(weights.as_array().iter())
        .map(|(n, w)| n * w)
        .sum()
}

/// Derive every score field for the corpus.
///
/// `papers`, `vectors` and `max_similarities` must be index-aligned.
pub fn compose_scores(
    papers: &[Paper],
    vectors: Vec<SparseVector>,
    max_similarities: &[f64],
    weights: &ScoreWeights,
    reference_year: i32,
    fallback: RecencyFallback,
) -> Result<Vec<ScoredPaper>> {
    if papers.len() != vectors.len() || papers.len() != max_similarities.len() {
        return Err(NovaError::InvalidInput(format!(
            "misaligned inputs: {} papers, {} vectors, {} similarity values",
            papers.len(),
            vectors.len(),
            max_similarities.len()
        )));
    }

    let years: Vec<i32> = papers.iter().map(|p| p.year).collect();
    let recencies = recency_scores(&years, reference_year, fallback)?;

    let scored = papers
        .iter()
        .zip(vectors)
        .zip(max_similarities.iter().zip(recencies))
        .map(|((paper, text_vector), (&max_similarity, recency))| {
            let novelty_citations = inverse_count(paper.citation_count);
            let novelty_score = compute_novelty_score(novelty_citations, max_similarity, recency, weights);
            ScoredPaper {
                paper: paper.clone(),
                text_vector,
                max_similarity,
                novelty_citations,
                recency,
                novelty_score,
                combined_score: novelty_score * paper.citation_count as f64,
            }
        })
        .collect();

    Ok(scored)
}
