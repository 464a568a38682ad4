//! Pipeline elements: the vertices of every element graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::ElementId;

/// What a pipeline element does. Drives DOT shapes and head/tail checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Source,
    Sink,
    Each,
    Every,
    GroupBy,
    CoGroup,
    HashJoin,
    Merge,
    Checkpoint,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        use ElementKind::*;
        match self {
            Source => "source",
            Sink => "sink",
            Each => "each",
            Every => "every",
            GroupBy => "group_by",
            CoGroup => "co_group",
            HashJoin => "hash_join",
            Merge => "merge",
            Checkpoint => "checkpoint",
        }
    }

    /// Returns true for elements that read or write external data.
    pub fn is_tap(&self) -> bool {
        matches!(self, ElementKind::Source | ElementKind::Sink)
    }

    /// Returns true for elements that combine several input streams.
    pub fn is_splice(&self) -> bool {
        use ElementKind::*;
        matches!(self, GroupBy | CoGroup | HashJoin | Merge)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation node in a pipeline graph.
///
/// Identity is the `id`; equality and hashing still cover every field, so two
/// elements sharing an id but disagreeing on name/kind/ordinal are different.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowElement {
    pub id: ElementId,
    pub name: String,
    pub kind: ElementKind,
    /// Position within the owning planning unit.
    #[serde(default)]
    pub ordinal: u32,
}

impl FlowElement {
    pub fn new(id: ElementId, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            ordinal: 0,
        }
    }

    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }
}

impl fmt::Display for FlowElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.name)
    }
}
