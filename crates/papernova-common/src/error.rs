use thiserror::Error;

#[derive(Debug, Error)]
pub enum NovaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recency is undefined: every paper was published in the reference year {reference_year}")]
    UndefinedRecency { reference_year: i32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NovaError>;
