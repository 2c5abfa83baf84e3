//! Term-frequency × inverse-document-frequency vectorizer.
//!
//! The vocabulary is fitted once over the whole corpus and never refit per
//! paper. Selection keeps the `max_vocabulary_size` terms with the highest
//! total count across the corpus, ties broken by lexical order, so a fixed
//! corpus always yields the same vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Tokens are runs of two or more word characters, matched after lower-casing.
fn token_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"(?u)\b\w\w+\b").unwrap())
}

/// Split cleaned text into lower-cased tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sparse weight vector over the vocabulary.
/// `indices` are strictly increasing positions in `TfIdfModel::vocabulary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// All-zero vector.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from `(index, weight)` pairs. Zero weights are dropped and
    /// duplicate indices are summed.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(idx, _)| idx);

        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (idx, w) in pairs {
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last += w;
                }
            } else {
                indices.push(idx);
                values.push(w);
            }
        }

        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|&(_, w)| w != 0.0)
            .unzip();
        Self { indices, values }
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }


    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product, accumulated in ascending index order so that
    /// `a.dot(b)` and `b.dot(a)` are bit-identical.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    /// Scale to unit L2 norm. Zero vectors are left untouched.
    fn l2_normalised(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
        self
    }
}

/// Fitted vocabulary plus per-term IDF weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfIdfModel {
    /// Vocabulary in lexical order; vector indices point into it.
    pub vocabulary: Vec<String>,
    /// Smoothed IDF, index-aligned with `vocabulary`.
    pub idf: Vec<f64>,
}

impl TfIdfModel {
    /// Fit the vocabulary on `texts` and vectorize every text.
    /// Output vectors are index-aligned with the input.
    pub fn fit_transform<S: AsRef<str>>(texts: &[S], max_vocabulary_size: usize) -> (Self, Vec<SparseVector>) {
        let doc_counts: Vec<HashMap<String, u32>> = texts
            .iter()
            .map(|t| count_terms(t.as_ref()))
            .collect();

        let model = Self::fit_counts(&doc_counts, max_vocabulary_size);
        let vectors = doc_counts.iter().map(|c| model.vectorize_counts(c)).collect();
        (model, vectors)
    }

    fn fit_counts(doc_counts: &[HashMap<String, u32>], max_vocabulary_size: usize) -> Self {
        let n_docs = doc_counts.len();

        let mut corpus_freq: HashMap<&str, u64> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for counts in doc_counts {
            for (term, &count) in counts {
                *corpus_freq.entry(term.as_str()).or_insert(0) += count as u64;
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        // Most frequent first, ties broken lexically
        let mut ranked: Vec<(&str, u64)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_vocabulary_size);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();

        let idf = vocabulary
            .iter()
            .map(|t| smoothed_idf(n_docs, doc_freq.get(t.as_str()).copied().unwrap_or(0)))
            .collect();

        Self { vocabulary, idf }
    }

    fn vectorize_counts(&self, counts: &HashMap<String, u32>) -> SparseVector {
        let pairs: Vec<(usize, f64)> = counts
            .iter()
            .filter_map(|(term, &count)| {
                self.term_index(term).map(|idx| (idx, count as f64 * self.idf[idx]))
            })
            .collect();
        SparseVector::from_pairs(pairs).l2_normalised()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// ln((1 + n) / (1 + df)) + 1
fn smoothed_idf(n_docs: usize, df: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

fn count_terms(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}
