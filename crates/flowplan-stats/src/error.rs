use thiserror::Error;

use crate::status::StatsStatus;

/// Result type local to flowplan-stats.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid status transition {from} -> {to}")]
    InvalidTransition { from: StatsStatus, to: StatsStatus },

    #[error("stats sink error: {0}")]
    Sink(String),
}
