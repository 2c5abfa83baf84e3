//! Engine configuration.
//!
//! Every option has a default, so an empty file (or no file at all) yields a
//! working configuration. Users can override any subset via TOML, YAML or JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NovaError, Result};

/// Complete configuration for one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Text vectorizer options
    #[serde(default)]
    pub vectorizer: VectorizerConfig,

    /// High-impact reference selection
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Score blending weights and recency handling
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Output options (binary only)
    #[serde(default)]
    pub output: OutputConfig,
}

// ── Vectorizer ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Upper bound on the number of vocabulary terms kept
    #[serde(default = "default_max_vocabulary_size")]
    pub max_vocabulary_size: usize,
}

fn default_max_vocabulary_size() -> usize { 1000 }

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { max_vocabulary_size: default_max_vocabulary_size() }
    }
}

// ── Reference set ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Citation-count quantile in [0, 1]; papers at or above it form the reference set
    #[serde(default = "default_impact_quantile")]
    pub impact_quantile: f64,
}

fn default_impact_quantile() -> f64 { 0.5 }

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self { impact_quantile: default_impact_quantile() }
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

/// What to do when every paper was published in the reference year,
/// which leaves the recency denominator at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyFallback {
    /// Recency is 0 for every paper
    #[default]
    Zero,
    /// Recency is 1 for every paper
    One,
    /// Fail the run with `NovaError::UndefinedRecency`
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight for citation sparsity, 1 / (1 + citations)
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Weight for peak similarity to the reference set
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Weight for recency
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// Year recency is measured against. `None` means the current calendar
    /// year, resolved by the caller before the engine runs.
    #[serde(default)]
    pub reference_year: Option<i32>,

    #[serde(default)]
    pub recency_fallback: RecencyFallback,

    /// Rescale α, β, γ to sum to 1.0 before scoring
    #[serde(default)]
    pub normalise_weights: bool,
}

fn default_alpha() -> f64 { 0.4 }
fn default_beta() -> f64 { 0.4 }
fn default_gamma() -> f64 { 0.2 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            gamma: default_gamma(),
            reference_year: None,
            recency_fallback: RecencyFallback::default(),
            normalise_weights: false,
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Number of top results written
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize { 20 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: OutputFormat::default(), top_n: default_top_n() }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from a file, picking the parser from its extension (TOML if unknown).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            _ => Self::from_toml(path),
        }
    }

    /// Load configuration from papernova.toml.
    /// Checks PAPERNOVA_CONFIG env var first, then the current directory.
    /// Falls back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var("PAPERNOVA_CONFIG")
            .unwrap_or_else(|_| "papernova.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::debug!(path = %path, "No config file found, using defaults");
            return Ok(Self::default());
        }

        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject option values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.vectorizer.max_vocabulary_size == 0 {
            return Err(NovaError::Config("max_vocabulary_size must be at least 1".into()));
        }

        let q = self.reference.impact_quantile;
        if !(0.0..=1.0).contains(&q) {
            return Err(NovaError::Config(format!("impact_quantile must be in [0, 1], got {q}")));
        }

        for (name, w) in [
            ("alpha", self.scoring.alpha),
            ("beta", self.scoring.beta),
            ("gamma", self.scoring.gamma),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(NovaError::Config(format!(
                    "weight {name} must be a finite non-negative number, got {w}"
                )));
            }
        }

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
