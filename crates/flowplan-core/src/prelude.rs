//! Convenient re-exports for downstream crates.

pub use crate::config::PlannerConfig;
pub use crate::element::{ElementKind, FlowElement};
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::id::{ElementId, IdGen, ScopeId};
pub use crate::node::{NodeDescriptor, NodeId};
pub use crate::scope::{Scope, ScopeKind};
