//! Paper records as handed over by the ingestion step.
//!
//! Text fields are expected to be cleaned already (lower-cased, punctuation
//! and stop words stripped). The engine never mutates these records; derived
//! values live in `papernova_ranker::ScoredPaper`.

use serde::{Deserialize, Serialize};

/// One paper of the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique, stable identifier.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    pub year: i32,
    /// Ordered author names. Order matters for co-authorship only.
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub citation_count: u64,
    /// Venue/author h-index aggregate. Carried through, not scored.
    #[serde(default)]
    pub h_index: u32,
}

impl Paper {
    pub fn new(id: impl Into<String>, title: impl Into<String>, abstract_text: impl Into<String>, year: i32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: abstract_text.into(),
            year,
            authors: vec![],
            citation_count: 0,
            h_index: 0,
        }
    }

    pub fn with_citations(mut self, citation_count: u64) -> Self {
        self.citation_count = citation_count;
        self
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Text fed to the vectorizer: title and abstract joined by a space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text)
    }
}

/// Split a `", "`-separated author string into names, dropping empty entries.
pub fn split_authors(raw: &str) -> Vec<String> {
    raw.split(", ")
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_numeric_fields_default_to_zero() {
        let json = r#"{"id": "p1", "title": "graph learning", "abstract": "node embedding", "year": 2020}"#;
        let paper: Paper = serde_json::from_str(json).unwrap();
        assert_eq!(paper.citation_count, 0);
        assert_eq!(paper.h_index, 0);
        assert!(paper.authors.is_empty());
        assert_eq!(paper.abstract_text, "node embedding");
    }

    #[test]
    fn test_text_joins_title_and_abstract() {
        let paper = Paper::new("p1", "sparse attention", "long context model", 2023);
        assert_eq!(paper.text(), "sparse attention long context model");
    }

    #[test]
    fn test_split_authors() {
        assert_eq!(split_authors("Ada Lovelace, Alan Turing"), vec!["Ada Lovelace", "Alan Turing"]);
        assert!(split_authors("").is_empty());
    }

    #[test]
    fn test_abstract_serializes_under_original_name() {
        let paper = Paper::new("p1", "t", "a", 2020);
        let value = serde_json::to_value(&paper).unwrap();
        assert_eq!(value["abstract"], "a");
    }
}
