use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid planner configuration: {0}")]
    Config(String),

    #[error("could not encode value for hashing: {0}")]
    Hash(#[from] serde_json::Error),
}
