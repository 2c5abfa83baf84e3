//! Weight vector for blending the novelty components.

use papernova_common::ScoringConfig;
use serde::{Deserialize, Serialize};

/// The 3-component weight vector (α, β, γ).
/// Recommended to sum to 1.0, but the composer never enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Citation sparsity, 1 / (1 + citations)
    pub alpha: f64,
    /// Peak similarity to the high-impact reference set
    pub beta: f64,
    /// Publication recency
    pub gamma: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            alpha: 0.4,
            beta:  0.4,
            gamma: 0.2,
        }
    }
}

impl From<&ScoringConfig> for ScoreWeights {
    fn from(cfg: &ScoringConfig) -> Self {
        Self {
            alpha: cfg.alpha,
            beta:  cfg.beta,
            gamma: cfg.gamma,
        }
    }
}

impl ScoreWeights {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Whether all weights sum to ~1.0
    pub fn validate(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }

    /// Renormalise weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.alpha /= sum;
            self.beta  /= sum;
            self.gamma /= sum;
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }

    fn sum(&self) -> f64 {
        self.alpha + self.beta + self.gamma
    }
}
