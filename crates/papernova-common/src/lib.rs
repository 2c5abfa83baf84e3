//! papernova-common — Shared types, errors, and configuration used across all Papernova crates.

pub mod error;
pub mod paper;
pub mod engine_config;

// Re-export commonly used types
pub use error::{NovaError, Result};
pub use paper::Paper;
pub use engine_config::{
    EngineConfig, OutputConfig, OutputFormat, RecencyFallback, ReferenceConfig, ScoringConfig,
    VectorizerConfig,
};
