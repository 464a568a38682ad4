#![forbid(unsafe_code)]
//! flowplan-core: the pipeline element model shared by every planner crate.
//!
//! - `FlowElement` vertices and `Scope` edges (the planner's graph vocabulary)
//! - strongly-typed identifiers and a per-session id counter
//! - planning-unit descriptors the stats boundary keys on
//! - `PlannerConfig` and stable hashing helpers
//!
//! No graph algorithms live here; see `flowplan-planner`.

pub mod config;
pub mod element;
pub mod error;
pub mod hash;
pub mod id;
pub mod node;
pub mod prelude;
pub mod scope;

/// Crate version, printed next to fingerprints by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
