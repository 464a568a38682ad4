#![forbid(unsafe_code)]
//! flowplan-planner: the graph layer the partitioning rules run against.
//!
//! Design:
//! - `ElementGraph` is the capability trait; planner code takes `&dyn ElementGraph`
//!   and never cares which representation it got.
//! - `BaseElementGraph` owns elements and scopes.
//! - `ElementMaskSubGraph` borrows any `ElementGraph` and hides a fixed set of
//!   elements/scopes. It copies nothing, and the borrow keeps the wrapped graph
//!   frozen for as long as the view lives.
//! - `graphs` holds the representation-independent algorithms (equality,
//!   fingerprint, topology) and `export` the DOT/diagram output.
//! - `FlowNode` is a committed partition: a materialized graph plus the
//!   identity the stats layer keys on.

pub mod dsl;
pub mod error;
pub mod export;
pub mod graph;
pub mod graphs;
pub mod node;

pub use dsl::yaml::{parse_yaml_graph, GraphConfig, ParsedGraph};
pub use error::{Error, Result};
pub use export::{DiagramRenderer, DotRenderer, ExportReport};
pub use graph::{BaseElementGraph, ElementGraph, ElementMask, ElementMaskSubGraph};
pub use node::FlowNode;
