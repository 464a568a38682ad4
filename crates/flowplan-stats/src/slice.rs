//! Per-slice (task attempt) stats reported under a node.

use serde::{Deserialize, Serialize};

use crate::node::{add_counter, Counters};
use crate::status::StatsStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSliceStats {
    pub id: String,
    pub status: StatsStatus,
    pub counters: Counters,
}

impl FlowSliceStats {
    pub fn new(id: impl Into<String>, status: StatsStatus) -> Self {
        Self {
            id: id.into(),
            status,
            counters: Counters::new(),
        }
    }

    pub fn increment(&mut self, group: &str, counter: &str, amount: u64) {
        add_counter(&mut self.counters, group, counter, amount);
    }

    pub fn counter(&self, group: &str, counter: &str) -> u64 {
        self.counters
            .get(group)
            .and_then(|g| g.get(counter))
            .copied()
            .unwrap_or(0)
    }
}
