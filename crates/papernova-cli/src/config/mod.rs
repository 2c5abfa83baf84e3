//! Run settings for the binary: the engine configuration file merged with
//! command-line overrides. Flags win over the file, the file wins over defaults.

use anyhow::Context;
use chrono::Datelike;
use papernova_common::{EngineConfig, OutputFormat};
use papernova_ranker::RankKey;
use std::ops::RangeInclusive;

use crate::Cli;

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub engine: EngineConfig,
    pub reference_year: i32,
    pub rank_by: RankKey,
    pub top_n: usize,
    pub format: OutputFormat,
    pub insights: bool,
    /// Publication years kept for insights; `None` keeps every year
    pub insight_years: Option<RangeInclusive<i32>>,
    pub min_citations: u64,
}

impl RunSettings {
    /// Load the config file named by `--config` (or the default location)
    /// and apply the command-line overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => EngineConfig::from_path(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => EngineConfig::load().context("Failed to load papernova.toml")?,
        };
        Self::resolve_with(cli, base, current_year())
    }

    /// Apply overrides to an already-loaded config. `current_year` is only
    /// used when neither the flag nor the config names a reference year.
    pub fn resolve_with(cli: &Cli, mut engine: EngineConfig, current_year: i32) -> anyhow::Result<Self> {
        if let Some(year) = cli.reference_year {
            engine.scoring.reference_year = Some(year);
        }
        if let Some(top) = cli.top {
            engine.output.top_n = top;
        }
        if let Some(ref format) = cli.format {
            engine.output.format = parse_format(format)?;
        }
        engine.validate()?;

        let rank_by: RankKey = cli.rank_by.parse().map_err(anyhow::Error::msg)?;
        let reference_year = engine.scoring.reference_year.unwrap_or(current_year);

        let insight_years = match (cli.year_from, cli.year_to) {
            (None, None) => None,
            (from, to) => {
                let from = from.unwrap_or(i32::MIN);
                let to = to.unwrap_or(i32::MAX);
                if from > to {
                    anyhow::bail!("--year-from {from} is after --year-to {to}");
                }
                Some(from..=to)
            }
        };

        Ok(Self {
            reference_year,
            rank_by,
            top_n: engine.output.top_n,
            format: engine.output.format,
            insights: cli.insights,
            insight_years,
            min_citations: cli.min_citations,
            engine,
        })
    }
}

fn parse_format(raw: &str) -> anyhow::Result<OutputFormat> {
    match raw.to_ascii_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "csv"  => Ok(OutputFormat::Csv),
        other  => anyhow::bail!("unknown output format '{other}' (expected json or csv)"),
    }
}

/// Wall-clock calendar year, read only at the binary boundary.
fn current_year() -> i32 {
    chrono::Utc::now().year()
}
