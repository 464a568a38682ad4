#![forbid(unsafe_code)]
//! flowplan-stats: counters recorded against planning units at execution time.
//!
//! The planner hands each committed unit's `NodeDescriptor` to a
//! `FlowNodeStats`. Execution workers then record into it concurrently, and
//! the recorder flushes snapshots to whatever `StatsSink` it was given.
//! Persistence is the sink's business; nothing here stores stats.

pub mod error;
pub mod node;
pub mod sink;
pub mod slice;
pub mod status;

pub use error::{Error, Result};
pub use node::{Counters, FlowNodeStats, NodeRecord};
pub use sink::{JsonLinesSink, MemorySink, StatsSink, TracingSink};
pub use slice::FlowSliceStats;
pub use status::StatsStatus;
