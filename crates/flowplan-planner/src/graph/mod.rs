//! The `ElementGraph` capability trait and its two representations.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use flowplan_core::element::FlowElement;
use flowplan_core::id::{ElementId, ScopeId};
use flowplan_core::scope::Scope;

use crate::graphs;

pub mod base;
pub mod mask;

pub use base::BaseElementGraph;
pub use mask::{ElementMask, ElementMaskSubGraph};

/// Everything the planner may ask of a pipeline graph.
///
/// All queries answer with the *visible* structure: a masked view never
/// reports a hidden element or scope. Asking about an element or scope the
/// graph does not contain yields an empty answer, not an error.
///
/// Listings are ordered by id.
pub trait ElementGraph: fmt::Debug {
    fn vertices(&self) -> Vec<&FlowElement>;

    fn edges(&self) -> Vec<&Scope>;

    fn vertex(&self, id: ElementId) -> Option<&FlowElement>;

    fn edge(&self, id: ScopeId) -> Option<&Scope>;

    /// Scopes leaving `id`.
    fn outgoing_edges(&self, id: ElementId) -> Vec<&Scope>;

    /// Scopes entering `id`.
    fn incoming_edges(&self, id: ElementId) -> Vec<&Scope>;

    /// Copy that keeps the representation: a base graph clones its storage,
    /// a view returns another handle over the same wrapped graph.
    fn copy_graph(&self) -> Box<dyn ElementGraph + '_>;

    /// Write the visible structure as DOT text to `path`, then try to render a
    /// diagram next to it. Returns whether the text was written; a failed
    /// diagram is logged and otherwise ignored.
    fn write_debug_export(&self, path: &Path) -> bool;

    fn contains_vertex(&self, id: ElementId) -> bool {
        self.vertex(id).is_some()
    }

    fn contains_edge(&self, id: ScopeId) -> bool {
        self.edge(id).is_some()
    }

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Outgoing then incoming scopes; a self-loop is listed once.
    fn incident_edges(&self, id: ElementId) -> Vec<&Scope> {
        let mut edges = self.outgoing_edges(id);
        edges.extend(
            self.incoming_edges(id)
                .into_iter()
                .filter(|s| s.source != s.target),
        );
        edges
    }

    /// Distinct targets of outgoing scopes.
    fn successors(&self, id: ElementId) -> Vec<&FlowElement> {
        let targets: BTreeSet<ElementId> =
            self.outgoing_edges(id).iter().map(|s| s.target).collect();
        targets.into_iter().filter_map(|t| self.vertex(t)).collect()
    }

    /// Distinct sources of incoming scopes.
    fn predecessors(&self, id: ElementId) -> Vec<&FlowElement> {
        let sources: BTreeSet<ElementId> =
            self.incoming_edges(id).iter().map(|s| s.source).collect();
        sources.into_iter().filter_map(|s| self.vertex(s)).collect()
    }
}

impl<'a, 'b> PartialEq<dyn ElementGraph + 'b> for dyn ElementGraph + 'a {
    fn eq(&self, other: &(dyn ElementGraph + 'b)) -> bool {
        graphs::equals(self, other)
    }
}

impl Eq for dyn ElementGraph + '_ {}
