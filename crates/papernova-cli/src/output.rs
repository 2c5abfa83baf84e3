//! Writing a ranking view to JSON or CSV.

use anyhow::Context;
use papernova_common::OutputFormat;
use papernova_ranker::insights::CorpusInsights;
use papernova_ranker::reference::ReferenceSet;
use papernova_ranker::{NoveltyReport, ScoreWeights, ScoredPaper};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::config::RunSettings;

#[derive(Serialize)]
struct JsonOutput<'a> {
    rank_by: &'static str,
    reference_year: i32,
    weights: ScoreWeights,
    reference: &'a ReferenceSet,
    vocabulary_size: usize,
    total_papers: usize,
    papers: &'a [ScoredPaper],
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<CorpusInsights>,
}

#[derive(Serialize)]
struct CsvRankRow<'a> {
    rank: usize,
    id: &'a str,
    title: &'a str,
    year: i32,
    authors: String,
    citation_count: u64,
    h_index: u32,
    max_similarity: f64,
    novelty_citations: f64,
    recency: f64,
    novelty_score: f64,
    combined_score: f64,
}

impl<'a> CsvRankRow<'a> {
    fn new(rank: usize, p: &'a ScoredPaper) -> Self {
        Self {
            rank,
            id: &p.paper.id,
            title: &p.paper.title,
            year: p.paper.year,
            authors: p.paper.authors.join(", "),
            citation_count: p.paper.citation_count,
            h_index: p.paper.h_index,
            max_similarity: p.max_similarity,
            novelty_citations: p.novelty_citations,
            recency: p.recency,
            novelty_score: p.novelty_score,
            combined_score: p.combined_score,
        }
    }
}

/// Write the top `settings.top_n` entries of `ranked` to `path`, or stdout.
pub fn write_report(
    report: &NoveltyReport,
    ranked: &[ScoredPaper],
    settings: &RunSettings,
    path: Option<&Path>,
) -> anyhow::Result<()> {
    let mut sink: Box<dyn Write> = match path {
        Some(p) => Box::new(
            std::fs::File::create(p).with_context(|| format!("Failed to create {}", p.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    render(report, ranked, settings, &mut sink)?;
    sink.flush()?;
    Ok(())
}

fn render<W: Write>(
    report: &NoveltyReport,
    ranked: &[ScoredPaper],
    settings: &RunSettings,
    out: &mut W,
) -> anyhow::Result<()> {
    let top = &ranked[..ranked.len().min(settings.top_n)];

    match settings.format {
        OutputFormat::Json => {
            let doc = JsonOutput {
                rank_by: settings.rank_by.as_str(),
                reference_year: report.reference_year,
                weights: report.weights,
                reference: &report.reference,
                vocabulary_size: report.vocabulary().len(),
                total_papers: report.len(),
                papers: top,
                insights: settings
                    .insights
                    .then(|| report.insights(settings.insight_years.clone(), settings.min_citations)),
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            if settings.insights {
                tracing::warn!("Insights are only written in JSON output; skipping");
            }
            let mut writer = csv::Writer::from_writer(&mut *out);
            for (i, p) in top.iter().enumerate() {
                writer.serialize(CsvRankRow::new(i + 1, p))?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use papernova_common::EngineConfig;
    use papernova_ranker::{NoveltyEngine, RankKey};
    use papernova_test_utils::median_scenario_corpus;

    fn settings(format: OutputFormat, top_n: usize, insights: bool) -> RunSettings {
        RunSettings {
            engine: EngineConfig::default(),
            reference_year: 2025,
            rank_by: RankKey::Novelty,
            top_n,
            format,
            insights,
            insight_years: None,
            min_citations: 0,
        }
    }

    fn report() -> NoveltyReport {
        NoveltyEngine::new(EngineConfig::default())
            .unwrap()
            .run(&median_scenario_corpus(), 2025)
            .unwrap()
    }

    #[test]
    fn test_json_output_truncates_to_top_n() {
        let report = report();
        let ranked = report.ranked_by_novelty();
        let mut buf = Vec::new();
        render(&report, &ranked, &settings(OutputFormat::Json, 2, false), &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["rank_by"], "novelty");
        assert_eq!(value["total_papers"], 4);
        assert_eq!(value["papers"].as_array().unwrap().len(), 2);
        assert_eq!(value["papers"][0]["id"], ranked[0].paper.id.as_str());
        assert!(value.get("insights").is_none());
    }

    #[test]
    fn test_json_output_with_insights() {
        let report = report();
        let ranked = report.ranked_by_novelty();
        let mut buf = Vec::new();
        render(&report, &ranked, &settings(OutputFormat::Json, 10, true), &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["papers"].as_array().unwrap().len(), 4);
        assert!(value["insights"]["authors"].is_array());
    }

    #[test]
    fn test_json_insights_respect_filters() {
        let report = report();
        let ranked = report.ranked_by_novelty();
        let mut settings = settings(OutputFormat::Json, 10, true);
        settings.insight_years = Some(2018..=2021);
        settings.min_citations = 10;
        let mut buf = Vec::new();
        render(&report, &ranked, &settings, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        // Ranked papers are unfiltered
        assert_eq!(value["papers"].as_array().unwrap().len(), 4);
        let years: Vec<i64> = value["insights"]["yearly_trend"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["year"].as_i64().unwrap())
            .collect();
        assert_eq!(years, vec![2018, 2019]);
    }

    #[test]
    fn test_csv_output_rows_ranked() {
        let report = report();
        let ranked = report.ranked_by_combined();
        let mut buf = Vec::new();
        render(&report, &ranked, &settings(OutputFormat::Csv, 3, false), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("rank,id,title,year,authors"));
        assert!(lines[1].starts_with(&format!("1,{},", ranked[0].paper.id)));
    }
}
