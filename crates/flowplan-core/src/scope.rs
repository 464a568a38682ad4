//! Dependency scopes: the directed edges of every element graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{ElementId, ScopeId};

/// How data crosses a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// Read from / written to a tap.
    Tap,
    /// Tuple-at-a-time stream.
    Each,
    /// Aggregated stream inside a grouping.
    Every,
    /// Grouped (keyed) stream leaving a splice.
    Grouped,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Tap => "tap",
            ScopeKind::Each => "each",
            ScopeKind::Every => "every",
            ScopeKind::Grouped => "grouped",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge from `source` to `target`.
///
/// Several scopes may join the same pair of elements (e.g. a self-join feeds
/// one element into both inputs of a co-group); `ordinal` says which input of
/// `target` this scope feeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub id: ScopeId,
    pub source: ElementId,
    pub target: ElementId,
    pub kind: ScopeKind,
    #[serde(default)]
    pub ordinal: u32,
    /// Field names crossing the edge.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Scope {
    pub fn new(id: ScopeId, source: ElementId, target: ElementId, kind: ScopeKind) -> Self {
        Self {
            id,
            source,
            target,
            kind,
            ordinal: 0,
            fields: Vec::new(),
        }
    }

    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}, ordinal {})",
            self.source.get(),
            self.target.get(),
            self.kind,
            self.ordinal
        )
    }
}
