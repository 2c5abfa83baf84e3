//! Corpus fixtures shared by Papernova tests.

use papernova_common::Paper;

/// Paper with id, cleaned title/abstract, year and citation count.
pub fn paper(id: &str, title: &str, abstract_text: &str, year: i32, citations: u64) -> Paper {
    Paper::new(id, title, abstract_text, year).with_citations(citations)
}

/// Four papers with citation counts `[0, 10, 10, 100]`.
/// Paper 0 shares vocabulary with every other paper, mostly with paper 1.
pub fn median_scenario_corpus() -> Vec<Paper> {
    vec![
        paper("p0", "graph neural network", "message passing molecule property", 2021, 0)
            .with_authors(["Ada Lovelace", "Alan Turing"]),
        paper("p1", "graph neural network", "message passing benchmark", 2018, 10)
            .with_authors(["Alan Turing"]),
        paper("p2", "protein structure", "molecule folding prediction", 2019, 10)
            .with_authors(["Grace Hopper", "Ada Lovelace"]),
        paper("p3", "transformer language model", "network pretraining", 2015, 100)
            .with_authors(["Grace Hopper"]),
    ]
}

/// `n` papers whose title and abstract are both empty.
pub fn empty_text_corpus(n: usize) -> Vec<Paper> {
    (0..n)
        .map(|i| paper(&format!("e{i}"), "", "", 2010 + i as i32, (i * 3) as u64))
        .collect()
}

/// A mixed corpus for property-style checks.
pub fn mixed_corpus() -> Vec<Paper> {
    let topics = [
        ("sparse retrieval", "inverted index ranking bm25"),
        ("dense retrieval", "embedding ranking contrastive"),
        ("graph neural network", "node classification message passing"),
        ("protein language model", "sequence embedding structure"),
        ("reinforcement learning", "policy gradient reward"),
        ("sparse attention", "long context transformer"),
        ("", ""),
        ("retrieval augmented generation", "language model ranking"),
    ];
    topics
        .iter()
        .enumerate()
        .map(|(i, (t, a))| paper(&format!("m{i}"), t, a, 2012 + (i as i32 % 5), [3, 0, 40, 7, 7, 120, 0, 15][i]))
        .collect()
}

/// Parse a JSON array of papers.
pub fn corpus_from_json(json: &str) -> Vec<Paper> {
    serde_json::from_str(json).expect("fixture JSON must parse")
}
