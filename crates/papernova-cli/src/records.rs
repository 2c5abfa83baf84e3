//! Loading already-cleaned paper records from disk.
//!
//! JSON input is an array of `Paper` objects. CSV input has one row per
//! paper with an `authors` column holding `", "`-separated names; missing
//! numeric cells default to 0.

use papernova_common::paper::split_authors;
use papernova_common::{NovaError, Paper, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvPaperRow {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    year: i32,
    #[serde(default)]
    authors: Option<String>,
    #[serde(default)]
    citation_count: Option<u64>,
    #[serde(default)]
    h_index: Option<u32>,
}

impl From<CsvPaperRow> for Paper {
    fn from(row: CsvPaperRow) -> Self {
        Paper {
            id: row.id,
            title: row.title.unwrap_or_default(),
            abstract_text: row.abstract_text.unwrap_or_default(),
            year: row.year,
            authors: row.authors.as_deref().map(split_authors).unwrap_or_default(),
            citation_count: row.citation_count.unwrap_or(0),
            h_index: row.h_index.unwrap_or(0),
        }
    }
}

/// Load papers, choosing the parser from the file extension.
pub fn load_papers(path: &Path) -> Result<Vec<Paper>> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => parse_csv(&content),
        Some("json") => Ok(serde_json::from_str(&content)?),
        other => Err(NovaError::InvalidInput(format!(
            "unsupported input extension {other:?} (expected .json or .csv)"
        ))),
    }
}

pub fn parse_csv(content: &str) -> Result<Vec<Paper>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut papers = Vec::new();
    for result in reader.deserialize::<CsvPaperRow>() {
        papers.push(Paper::from(result?));
    }
    debug!(rows = papers.len(), "Parsed CSV paper rows");
    Ok(papers)
}
