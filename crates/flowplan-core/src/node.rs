//! Planning-unit identity.
//!
//! A planning unit (a committed partition of the element graph) gets a random
//! id when it is created. Stats recorders key on this descriptor, never on the
//! unit's graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn random() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Stable identity of one planning unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    pub name: String,
    /// Position of the unit within its plan.
    pub ordinal: u32,
}

impl NodeDescriptor {
    pub fn new(name: impl Into<String>, ordinal: u32) -> Self {
        Self {
            id: NodeId::random(),
            name: name.into(),
            ordinal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_get_distinct_ids() {
        let a = NodeDescriptor::new("map", 0);
        let b = NodeDescriptor::new("map", 0);
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn node_id_displays_as_simple_uuid() {
        let id = NodeId::random();
        let shown = id.to_string();
        assert_eq!(shown.len(), 32);
        assert!(!shown.contains('-'));
    }
}
