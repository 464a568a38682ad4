#![forbid(unsafe_code)]
//! flowplan: planning-time element graphs, masked subgraph views, and the
//! stats boundary. This package re-exports the workspace crates so the
//! integration tests and benches can reach them through one dependency.

pub use flowplan_core as core;
pub use flowplan_planner as planner;
pub use flowplan_stats as stats;
