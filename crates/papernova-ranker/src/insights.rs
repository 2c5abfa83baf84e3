//! Corpus-level aggregations over scored papers: per-author and per-year
//! statistics, filtering, and the co-authorship edge list.
//!
//! Author aggregation expands records into explicit `(paper, author)` pairs
//! first. None of these feed back into scoring.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use crate::ranking::descending;
use crate::scorer::ScoredPaper;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorStats {
    pub author: String,
    pub papers: usize,
    pub mean_novelty_score: f64,
    pub mean_citation_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTrend {
    pub year: i32,
    pub papers: usize,
    pub mean_novelty_score: f64,
}

/// Undirected co-authorship edge; `source < target` lexically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoauthorEdge {
    pub source: String,
    pub target: String,
    /// Number of papers the two authors share
    pub papers: usize,
}

/// Keep papers inside `years` (inclusive, when given) with at least `min_citations`.
pub fn filter_papers(
    papers: &[ScoredPaper],
    years: Option<RangeInclusive<i32>>,
    min_citations: u64,
) -> Vec<ScoredPaper> {
    papers
        .iter()
        .filter(|p| years.as_ref().map_or(true, |r| r.contains(&p.paper.year)))
        .filter(|p| p.paper.citation_count >= min_citations)
        .cloned()
        .collect()
}

/// Explicit `(paper index, author)` expansion.
pub fn author_pairs(papers: &[ScoredPaper]) -> Vec<(usize, &str)> {
    papers
        .iter()
        .enumerate()
        .flat_map(|(i, p)| p.paper.authors.iter().map(move |a| (i, a.as_str())))
        .collect()
}

/// Mean novelty score and mean citation count per author, highest mean
/// novelty first, ties by author name.
pub fn author_stats(papers: &[ScoredPaper]) -> Vec<AuthorStats> {
    let mut groups: BTreeMap<&str, (usize, f64, f64)> = BTreeMap::new();
    for (i, author) in author_pairs(papers) {
        let entry = groups.entry(author).or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += papers[i].novelty_score;
        entry.2 += papers[i].paper.citation_count as f64;
    }

    let mut stats: Vec<AuthorStats> = groups
        .into_iter()
        .map(|(author, (count, novelty_sum, citation_sum))| AuthorStats {
            author: author.to_string(),
            papers: count,
            mean_novelty_score: novelty_sum / count as f64,
            mean_citation_count: citation_sum / count as f64,
        })
        .collect();

    // Stable sort over the name-ordered groups keeps ties alphabetical
    stats.sort_by(|a, b| descending(a.mean_novelty_score, b.mean_novelty_score));
    stats
}

/// Mean novelty score per publication year, ascending by year.
pub fn yearly_trend(papers: &[ScoredPaper]) -> Vec<YearTrend> {
    let mut groups: BTreeMap<i32, (usize, f64)> = BTreeMap::new();
    for p in papers {
        let entry = groups.entry(p.paper.year).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += p.novelty_score;
    }

    groups
        .into_iter()
        .map(|(year, (count, sum))| YearTrend {
            year,
            papers: count,
            mean_novelty_score: sum / count as f64,
        })
        .collect()
}

/// Highest-novelty paper of each year, ascending by year.
/// On equal scores the earlier paper in input order wins.
pub fn top_per_year(papers: &[ScoredPaper]) -> Vec<ScoredPaper> {
    let mut best: BTreeMap<i32, &ScoredPaper> = BTreeMap::new();
    for p in papers {
        best.entry(p.paper.year)
            .and_modify(|cur| {
                if p.novelty_score > cur.novelty_score {
                    *cur = p;
                }
            })
            .or_insert(p);
    }
    best.into_values().cloned().collect()
}

/// Co-authorship edges across the corpus, ordered by `(source, target)`.
/// Repeated names within one paper count once.
pub fn coauthor_edges(papers: &[ScoredPaper]) -> Vec<CoauthorEdge> {
    let mut edges: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for p in papers {
        let authors: Vec<&str> = p
            .paper
            .authors
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        for (i, &a) in authors.iter().enumerate() {
            for &b in &authors[i + 1..] {
                *edges.entry((a, b)).or_insert(0) += 1;
            }
        }
    }

    edges
        .into_iter()
        .map(|((source, target), papers)| CoauthorEdge {
            source: source.to_string(),
            target: target.to_string(),
            papers,
        })
        .collect()
}

/// All aggregations bundled for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusInsights {
    pub authors: Vec<AuthorStats>,
    pub yearly_trend: Vec<YearTrend>,
    pub top_per_year: Vec<ScoredPaper>,
    pub coauthor_edges: Vec<CoauthorEdge>,
}

impl CorpusInsights {
    pub fn compute(papers: &[ScoredPaper]) -> Self {
        Self {
            authors: author_stats(papers),
            yearly_trend: yearly_trend(papers),
            top_per_year: top_per_year(papers),
            coauthor_edges: coauthor_edges(papers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::SparseVector;
    use papernova_common::Paper;
    use pretty_assertions::assert_eq;

    fn scored(id: &str, year: i32, citations: u64, novelty: f64, authors: &[&str]) -> ScoredPaper {
        ScoredPaper {
            paper: Paper::new(id, "", "", year)
                .with_citations(citations)
                .with_authors(authors.iter().copied()),
            text_vector: SparseVector::zero(),
            max_similarity: 0.0,
            novelty_citations: 0.0,
            recency: 0.0,
            novelty_score: novelty,
            combined_score: novelty * citations as f64,
        }
    }

    fn corpus() -> Vec<ScoredPaper> {
        vec![
            scored("p1", 2019, 10, 0.2, &["Ada", "Grace"]),
            scored("p2", 2020, 0, 0.8, &["Ada", "Linus"]),
            scored("p3", 2020, 4, 0.6, &["Grace", "Ada", "Grace"]),
            scored("p4", 2021, 2, 0.4, &[]),
        ]
    }

    #[test]
    fn test_author_pairs_expand_each_author() {
        let papers = corpus();
        let pairs = author_pairs(&papers);
        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs[0], (0, "Ada"));
        assert_eq!(pairs[2], (1, "Ada"));
    }

    #[test]
    fn test_author_stats_means_and_order() {
        let stats = author_stats(&corpus()[..2]);
        let names: Vec<&str> = stats.iter().map(|s| s.author.as_str()).collect();
        assert_eq!(names, vec!["Linus", "Ada", "Grace"]);
        let ada = &stats[1];
        assert_eq!(ada.papers, 2);
        assert!((ada.mean_novelty_score - 0.5).abs() < 1e-12);
        assert!((ada.mean_citation_count - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_author_stats_signed_zero_means_tie_by_name() {
        let papers = vec![scored("p1", 2020, 0, -0.0, &["Zed"]), scored("p2", 2020, 0, 0.0, &["Amy"])];
        let names: Vec<String> = author_stats(&papers).into_iter().map(|s| s.author).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }

    #[test]
    fn test_yearly_trend() {
        let trend = yearly_trend(&corpus());
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[1].year, 2020);
        assert_eq!(trend[1].papers, 2);
        assert!((trend[1].mean_novelty_score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_top_per_year() {
        let top = top_per_year(&corpus());
        let ids: Vec<&str> = top.iter().map(|p| p.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p4"]);
    }

    #[test]
    fn test_top_per_year_ties_keep_first() {
        let papers = vec![scored("a", 2020, 0, 0.5, &[]), scored("b", 2020, 0, 0.5, &[])];
        assert_eq!(top_per_year(&papers)[0].paper.id, "a");
    }

    #[test]
    fn test_coauthor_edges_counted_and_deduplicated() {
        let edges = coauthor_edges(&corpus());
        assert_eq!(
            edges,
            vec![
                CoauthorEdge { source: "Ada".into(), target: "Grace".into(), papers: 2 },
                CoauthorEdge { source: "Ada".into(), target: "Linus".into(), papers: 1 },
            ]
        );
    }

    #[test]
    fn test_filter_papers() {
        let papers = corpus();
        let kept = filter_papers(&papers, Some(2020..=2021), 1);
        let ids: Vec<&str> = kept.iter().map(|p| p.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p4"]);
        assert_eq!(filter_papers(&papers, None, 0).len(), 4);
    }

    #[test]
    fn test_insights_on_empty_corpus() {
        let insights = CorpusInsights::compute(&[]);
        assert!(insights.authors.is_empty());
        assert!(insights.yearly_trend.is_empty());
        assert!(insights.top_per_year.is_empty());
        assert!(insights.coauthor_edges.is_empty());
    }
}
