//! papernova-ranker — Similarity & novelty scoring engine.
//!
//! Data flows strictly downstream:
//! cleaned records → vectors → similarity matrix → reference set + novelty
//! signal → composed scores → ranked output.

pub mod vectorizer;
pub mod similarity;
pub mod reference;
pub mod novelty;
pub mod normalise;
pub mod weights;
pub mod scorer;
pub mod ranking;
pub mod insights;
pub mod engine;

pub use engine::{NoveltyEngine, NoveltyReport};
pub use ranking::RankKey;
pub use scorer::ScoredPaper;
pub use vectorizer::{SparseVector, TfIdfModel};
pub use weights::ScoreWeights;
