//! Batch pipeline tying the scoring stages together.
//!
//! One call to [`NoveltyEngine::run`] recomputes everything from the input
//! records. No state survives between runs, and the reference year is always
//! passed in so results never depend on the wall clock.

use papernova_common::{EngineConfig, NovaError, Paper, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

use crate::insights::{filter_papers, CorpusInsights};
use crate::novelty::max_similarities;
use crate::ranking::{rank_by, RankKey};
use crate::reference::ReferenceSet;
use crate::scorer::{compose_scores, ScoredPaper};
use crate::similarity::SimilarityMatrix;
use crate::vectorizer::TfIdfModel;
use crate::weights::ScoreWeights;

pub struct NoveltyEngine {
    config: EngineConfig,
}

impl NoveltyEngine {
    /// Build an engine, rejecting invalid option values up front.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score and rank one corpus snapshot.
    pub fn run(&self, papers: &[Paper], reference_year: i32) -> Result<NoveltyReport> {
        ensure_unique_ids(papers)?;
        info!(papers = papers.len(), reference_year, "Starting novelty scoring run");

        // 1. Vectorize title + abstract
        let texts: Vec<String> = papers.iter().map(Paper::text).collect();
        let (model, vectors) =
            TfIdfModel::fit_transform(&texts, self.config.vectorizer.max_vocabulary_size);
        let empty_vectors = vectors.iter().filter(|v| v.is_zero()).count();
        info!(vocabulary = model.len(), empty_vectors, "Vectorized corpus");

        // 2. Pairwise similarity
        let similarities = SimilarityMatrix::build(&vectors);

        // 3. High-impact reference set
        let citations: Vec<u64> = papers.iter().map(|p| p.citation_count).collect();
        let reference = ReferenceSet::select(&citations, self.config.reference.impact_quantile);
        info!(
            threshold = ?reference.threshold,
            reference_papers = reference.len(),
            "Selected high-impact reference set"
        );

        // 4. Peak similarity to the reference set
        let max_sims = max_similarities(&similarities, &reference);
        debug!(
            nonzero = max_sims.iter().filter(|&&s| s > 0.0).count(),
            "Computed reference similarities"
        );

        // 5. Blend scores
        let mut weights = ScoreWeights::from(&self.config.scoring);
        if self.config.scoring.normalise_weights {
            weights.normalise();
            debug!(weights = ?weights.as_array(), "Normalised score weights");
        }
        if !weights.validate() {
            warn!(
                alpha = weights.alpha,
                beta = weights.beta,
                gamma = weights.gamma,
                "Score weights do not sum to 1.0; using them as given"
            );
        }
        let scored = compose_scores(
            papers,
            vectors,
            &max_sims,
            &weights,
            reference_year,
            self.config.scoring.recency_fallback,
        )?;

        info!(papers = scored.len(), "Novelty scoring complete");

        Ok(NoveltyReport {
            reference_year,
            weights,
            model,
            reference,
            similarities,
            papers: scored,
        })
    }
}

fn ensure_unique_ids(papers: &[Paper]) -> Result<()> {
    let mut seen = HashSet::with_capacity(papers.len());
    for p in papers {
        if !seen.insert(p.id.as_str()) {
            return Err(NovaError::InvalidInput(format!("duplicate paper id '{}'", p.id)));
        }
    }
    Ok(())
}

/// Output of one run. `papers` is in input order.
#[derive(Debug, Clone, Serialize)]
pub struct NoveltyReport {
    pub reference_year: i32,
    pub weights: ScoreWeights,
    #[serde(skip)]
    pub model: TfIdfModel,
    pub reference: ReferenceSet,
    #[serde(skip)]
    pub similarities: SimilarityMatrix,
    pub papers: Vec<ScoredPaper>,
}

impl NoveltyReport {
    pub fn vocabulary(&self) -> &[String] {
        &self.model.vocabulary
    }

    pub fn ranked_by(&self, key: RankKey) -> Vec<ScoredPaper> {
        rank_by(&self.papers, key)
    }

    pub fn ranked_by_novelty(&self) -> Vec<ScoredPaper> {
        self.ranked_by(RankKey::Novelty)
    }

    pub fn ranked_by_combined(&self) -> Vec<ScoredPaper> {
        self.ranked_by(RankKey::Combined)
    }

    /// Aggregates over the papers inside `years` with at least `min_citations`.
    pub fn insights(&self, years: Option<RangeInclusive<i32>>, min_citations: u64) -> CorpusInsights {
        let kept = filter_papers(&self.papers, years, min_citations);
        debug!(kept = kept.len(), total = self.papers.len(), "Filtered papers for insights");
        CorpusInsights::compute(&kept)
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> NoveltyEngine {
        NoveltyEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_corpus_yields_empty_report() {
        let report = engine().run(&[], 2024).unwrap();
        assert!(report.is_empty());
        assert!(report.vocabulary().is_empty());
        assert!(report.reference.is_empty());
        assert!(report.similarities.is_empty());
        assert!(report.ranked_by_novelty().is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let papers = vec![Paper::new("p1", "a b", "", 2020), Paper::new("p1", "c d", "", 2021)];
        assert!(matches!(engine().run(&papers, 2024), Err(NovaError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.reference.impact_quantile = -0.5;
        assert!(NoveltyEngine::new(config).is_err());
    }

    #[test]
    fn test_report_keeps_input_order() {
        let papers = vec![
            Paper::new("z", "graph network", "", 2018).with_citations(1),
            Paper::new("a", "graph model", "", 2022).with_citations(9),
        ];
        let report = engine().run(&papers, 2024).unwrap();
        let ids: Vec<&str> = report.papers.iter().map(|p| p.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"]);
        assert_eq!(report.reference.indices, vec![1]);
    }

    #[test]
    fn test_normalise_weights_rescales_before_scoring() {
        let papers = vec![
            Paper::new("old", "graph network", "", 2000).with_citations(3),
            Paper::new("new", "graph model", "", 2020).with_citations(0),
        ];

        let mut config = EngineConfig::default();
        config.scoring.alpha = 2.0;
        config.scoring.beta = 0.0;
        config.scoring.gamma = 2.0;
        let raw = NoveltyEngine::new(config.clone()).unwrap().run(&papers, 2024).unwrap();
        assert_eq!(raw.weights.as_array(), [2.0, 0.0, 2.0]);

        config.scoring.normalise_weights = true;
        let report = NoveltyEngine::new(config).unwrap().run(&papers, 2024).unwrap();
        assert_eq!(report.weights.as_array(), [0.5, 0.0, 0.5]);
        for (scaled, p) in raw.papers.iter().zip(&report.papers) {
            assert!((scaled.novelty_score / 4.0 - p.novelty_score).abs() < 1e-12);
        }
    }
}
