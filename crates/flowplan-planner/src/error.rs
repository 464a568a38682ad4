use thiserror::Error;

use flowplan_core::id::{ElementId, ScopeId};

/// Result type local to flowplan-planner.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("scope {scope} references {element}, which is not in the graph")]
    MissingEndpoint { scope: ScopeId, element: ElementId },

    #[error("duplicate element id {0}")]
    DuplicateElement(ElementId),

    #[error("duplicate scope id {0}")]
    DuplicateScope(ScopeId),

    #[error("graph has a cycle: {remaining} element(s) could not be ordered")]
    Cycle { remaining: usize },

    #[error("unit has {0} elements, more than a u32 ordinal can number")]
    TooManyElements(usize),

    #[error("export failed: {0}")]
    Export(String),

    #[error("diagram render failed: {0}")]
    Render(String),

    #[error("invalid graph document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Core(#[from] flowplan_core::error::Error),
}
