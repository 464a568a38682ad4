//! `FlowNodeStats`: the recorder attached to one planning unit.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use flowplan_core::node::{NodeDescriptor, NodeId};

use crate::error::{Error, Result};
use crate::sink::StatsSink;
use crate::slice::FlowSliceStats;
use crate::status::StatsStatus;

/// group -> counter -> value
pub type Counters = BTreeMap<String, BTreeMap<String, u64>>;

pub(crate) fn add_counter(counters: &mut Counters, group: &str, counter: &str, amount: u64) {
    let slot = counters
        .entry(group.to_string())
        .or_default()
        .entry(counter.to_string())
        .or_insert(0);
    *slot = slot.saturating_add(amount);
}

/// Snapshot handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub ordinal: u32,
    pub status: StatsStatus,
    pub counters: Counters,
}

impl NodeRecord {
    pub fn counter(&self, group: &str, counter: &str) -> u64 {
        self.counters
            .get(group)
            .and_then(|g| g.get(counter))
            .copied()
            .unwrap_or(0)
    }
}

struct NodeState {
    status: StatsStatus,
    counters: Counters,
    slices: BTreeMap<String, FlowSliceStats>,
}

/// Counters for one planning unit, shared by every worker executing it.
///
/// All mutation and every flush happen under one lock, so a flushed snapshot
/// always reflects a whole number of `record` calls.
pub struct FlowNodeStats {
    node: NodeDescriptor,
    sink: Arc<dyn StatsSink>,
    state: Mutex<NodeState>,
}

impl FlowNodeStats {
    pub fn new(node: NodeDescriptor, sink: Arc<dyn StatsSink>) -> Self {
        Self {
            node,
            sink,
            state: Mutex::new(NodeState {
                status: StatsStatus::Pending,
                counters: Counters::new(),
                slices: BTreeMap::new(),
            }),
        }
    }

    pub fn id(&self) -> NodeId {
        self.node.id
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn ordinal(&self) -> u32 {
        self.node.ordinal
    }

    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.node
    }

    pub fn status(&self) -> StatsStatus {
        self.lock().status
    }

    pub fn counter(&self, group: &str, counter: &str) -> u64 {
        self.lock()
            .counters
            .get(group)
            .and_then(|g| g.get(counter))
            .copied()
            .unwrap_or(0)
    }

    /// Accumulate without flushing.
    pub fn increment(&self, group: &str, counter: &str, amount: u64) {
        add_counter(&mut self.lock().counters, group, counter, amount);
    }

    /// Accumulate and flush in one critical section.
    pub fn record(&self, group: &str, counter: &str, amount: u64) -> Result<()> {
        let mut state = self.lock();
        add_counter(&mut state.counters, group, counter, amount);
        self.flush(&state)
    }

    /// Flush the current counters and status to the sink.
    pub fn record_info(&self) -> Result<()> {
        let state = self.lock();
        self.flush(&state)
    }

    pub fn transition(&self, next: StatsStatus) -> Result<()> {
        let mut state = self.lock();
        if !state.status.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: state.status,
                to: next,
            });
        }
        tracing::debug!(node = %self.node.id, from = %state.status, to = %next, "node status");
        state.status = next;
        Ok(())
    }

    /// Register or replace the stats of one slice of this node.
    pub fn add_slice(&self, slice: FlowSliceStats) {
        self.lock().slices.insert(slice.id.clone(), slice);
    }

    pub fn slice_count(&self) -> usize {
        self.lock().slices.len()
    }

    /// Forward every registered slice to the sink, in slice-id order.
    pub fn record_child_stats(&self) -> Result<()> {
        let state = self.lock();
        for slice in state.slices.values() {
            self.sink.record_slice(self.node.id, slice)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> NodeRecord {
        let state = self.lock();
        self.record_of(&state)
    }

    fn record_of(&self, state: &NodeState) -> NodeRecord {
        NodeRecord {
            id: self.node.id,
            name: self.node.name.clone(),
            ordinal: self.node.ordinal,
            status: state.status,
            counters: state.counters.clone(),
        }
    }

    fn flush(&self, state: &NodeState) -> Result<()> {
        let record = self.record_of(state);
        tracing::debug!(
            node = %record.id,
            ordinal = record.ordinal,
            status = %record.status,
            groups = record.counters.len(),
            "flush node stats"
        );
        self.sink.record_node(&record)
    }

    // A panicking worker must not take the counters down with it.
    fn lock(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for FlowNodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowNodeStats")
            .field("node", &self.node)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FlowNodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node{{status={}, name='{}', id={}, ordinal={}}}",
            self.status(),
            self.node.name,
            self.node.id,
            self.node.ordinal
        )
    }
}
