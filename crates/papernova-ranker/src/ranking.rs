//! Total orderings over the scored corpus.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::scorer::ScoredPaper;

/// Score field a ranking view is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankKey {
    #[default]
    Novelty,
    Combined,
}

impl RankKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankKey::Novelty  => "novelty",
            RankKey::Combined => "combined",
        }
    }

    pub fn score(&self, paper: &ScoredPaper) -> f64 {
        match self {
            RankKey::Novelty  => paper.novelty_score,
            RankKey::Combined => paper.combined_score,
        }
    }
}

impl FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "novelty" | "novelty_score" => Ok(RankKey::Novelty),
            "combined" | "combined_score" => Ok(RankKey::Combined),
            other => Err(format!("unknown ranking key '{other}' (expected novelty or combined)")),
        }
    }
}

/// Indices of `papers` ordered by `key` descending.
/// The sort is stable, so equal scores (`0.0 == -0.0` included) keep input order.
pub fn rank_indices(papers: &[ScoredPaper], key: RankKey) -> Vec<usize> {
    let mut order: Vec<usize> = (0..papers.len()).collect();
    order.sort_by(|&a, &b| descending(key.score(&papers[a]), key.score(&papers[b])));
    order
}

/// Descending comparison under IEEE equality.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// The full record set reordered by `key` descending. Nothing is dropped
/// or deduplicated.
pub fn rank_by(papers: &[ScoredPaper], key: RankKey) -> Vec<ScoredPaper> {
    rank_indices(papers, key)
        .into_iter()
        .map(|i| papers[i].clone())
        .collect()
}

pub fn rank_by_novelty(papers: &[ScoredPaper]) -> Vec<ScoredPaper> {
    rank_by(papers, RankKey::Novelty)
}

pub fn rank_by_combined(papers: &[ScoredPaper]) -> Vec<ScoredPaper> {
    rank_by(papers, RankKey::Combined)
}
