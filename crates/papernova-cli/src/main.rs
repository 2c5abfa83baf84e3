//! Papernova — research paper novelty ranking.
//! Entry point for the batch scoring binary.

mod config;
mod output;
mod records;

use anyhow::Context;
use clap::Parser;
use papernova_ranker::{NoveltyEngine, RankKey};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "papernova")]
#[command(about = "Rank research papers by a blended novelty score", long_about = None)]
pub struct Cli {
    /// Cleaned paper records (JSON array or CSV)
    #[arg(short, long)]
    input: PathBuf,

    /// Config file (TOML, YAML or JSON). Defaults to $PAPERNOVA_CONFIG or ./papernova.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Year recency is measured against (default: config, then current year)
    #[arg(long)]
    reference_year: Option<i32>,

    /// Ranking view to write: novelty or combined
    #[arg(long, default_value = "novelty")]
    rank_by: String,

    /// Number of ranked papers to write (default: output.top_n from config)
    #[arg(long)]
    top: Option<usize>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: json or csv (default: output.format from config)
    #[arg(long)]
    format: Option<String>,

    /// Include per-author and per-year aggregates (JSON only)
    #[arg(long, default_value_t = false)]
    insights: bool,

    /// Earliest publication year included in insights
    #[arg(long)]
    year_from: Option<i32>,

    /// Latest publication year included in insights
    #[arg(long)]
    year_to: Option<i32>,

    /// Minimum citation count for a paper to count towards insights
    #[arg(long, default_value_t = 0)]
    min_citations: u64,
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("papernova=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Papernova {}", env!("CARGO_PKG_VERSION"));

    let settings = config::RunSettings::resolve(&cli)?;
    info!(
        reference_year = settings.reference_year,
        rank_by = settings.rank_by.as_str(),
        top_n = settings.top_n,
        "Configuration resolved"
    );

    let papers = records::load_papers(&cli.input)
        .with_context(|| format!("Failed to load papers from {}", cli.input.display()))?;
    info!(papers = papers.len(), "Loaded paper records");

    let engine = NoveltyEngine::new(settings.engine.clone())?;
    let report = engine.run(&papers, settings.reference_year)?;

    for key in [RankKey::Novelty, RankKey::Combined] {
        for (rank, p) in report.ranked_by(key).iter().take(5).enumerate() {
            info!(
                view = key.as_str(),
                rank = rank + 1,
                id = %p.paper.id,
                novelty_score = p.novelty_score,
                combined_score = p.combined_score,
                "{}",
                p.paper.title
            );
        }
    }

    let ranked = report.ranked_by(settings.rank_by);

    output::write_report(&report, &ranked, &settings, cli.output.as_deref())?;
    Ok(())
}
