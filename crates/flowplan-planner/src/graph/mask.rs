//! Masked subgraph views.
//!
//! A view answers every query by asking the wrapped graph and dropping what
//! the mask hides. It stores no elements or scopes of its own, so building
//! one costs only the mask sets, and views over views compose: each level
//! filters what the level below already filtered.
//!
//! The view borrows the wrapped graph for its whole lifetime. While any view
//! exists the base graph cannot be mutated.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use flowplan_core::element::FlowElement;
use flowplan_core::id::{ElementId, ScopeId};
use flowplan_core::scope::Scope;

use crate::export;
use crate::graph::{BaseElementGraph, ElementGraph};
use crate::graphs;

/// Hidden elements and scopes. Ids the wrapped graph does not contain are
/// harmless; they simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMask {
    elements: HashSet<ElementId>,
    scopes: HashSet<ScopeId>,
}

impl ElementMask {
    pub fn new<E, S>(elements: E, scopes: S) -> Self
    where
        E: IntoIterator<Item = ElementId>,
        S: IntoIterator<Item = ScopeId>,
    {
        Self {
            elements: elements.into_iter().collect(),
            scopes: scopes.into_iter().collect(),
        }
    }

    pub fn from_elements<E>(elements: E) -> Self
    where
        E: IntoIterator<Item = ElementId>,
    {
        Self::new(elements, std::iter::empty())
    }

    pub fn is_vertex_masked(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    /// A scope is hidden when listed itself or when either endpoint is hidden.
    pub fn is_edge_masked(&self, scope: &Scope) -> bool {
        self.scopes.contains(&scope.id)
            || self.elements.contains(&scope.source)
            || self.elements.contains(&scope.target)
    }

    pub fn hidden_elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().copied()
    }

    pub fn hidden_scopes(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.scopes.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.scopes.is_empty()
    }
}

/// Read-only projection of another `ElementGraph` minus a fixed mask.
///
/// `Clone` (and `copy_graph`) yields a new handle on the same wrapped graph
/// and shares the mask.
#[derive(Debug, Clone)]
pub struct ElementMaskSubGraph<'g> {
    graph: &'g dyn ElementGraph,
    mask: Arc<ElementMask>,
}

impl<'g> ElementMaskSubGraph<'g> {
    /// Hide `elements` and every scope touching them.
    pub fn new<E>(graph: &'g dyn ElementGraph, elements: E) -> Self
    where
        E: IntoIterator<Item = ElementId>,
    {
        Self::with_mask(graph, ElementMask::from_elements(elements))
    }

    /// Hide `elements` (with their scopes) and, independently, `scopes`.
    pub fn with_scopes<E, S>(graph: &'g dyn ElementGraph, elements: E, scopes: S) -> Self
    where
        E: IntoIterator<Item = ElementId>,
        S: IntoIterator<Item = ScopeId>,
    {
        Self::with_mask(graph, ElementMask::new(elements, scopes))
    }

    pub fn with_mask(graph: &'g dyn ElementGraph, mask: ElementMask) -> Self {
        tracing::trace!(
            hidden_elements = mask.elements.len(),
            hidden_scopes = mask.scopes.len(),
            "mask view"
        );
        Self {
            graph,
            mask: Arc::new(mask),
        }
    }

    /// A view hiding nothing.
    pub fn unmasked(graph: &'g dyn ElementGraph) -> Self {
        Self::with_mask(graph, ElementMask::default())
    }

    /// The graph this view filters.
    pub fn wrapped(&self) -> &'g dyn ElementGraph {
        self.graph
    }

    pub fn mask(&self) -> &ElementMask {
        &self.mask
    }

    fn visible_scopes<'s>(&self, scopes: Vec<&'s Scope>) -> Vec<&'s Scope> {
        scopes
            .into_iter()
            .filter(|s| !self.mask.is_edge_masked(s))
            .collect()
    }
}

impl ElementGraph for ElementMaskSubGraph<'_> {
    fn vertices(&self) -> Vec<&FlowElement> {
        self.graph
            .vertices()
            .into_iter()
            .filter(|v| !self.mask.is_vertex_masked(v.id))
            .collect()
    }

    fn edges(&self) -> Vec<&Scope> {
        self.visible_scopes(self.graph.edges())
    }

    fn vertex(&self, id: ElementId) -> Option<&FlowElement> {
        if self.mask.is_vertex_masked(id) {
            return None;
        }
        self.graph.vertex(id)
    }

    fn edge(&self, id: ScopeId) -> Option<&Scope> {
        self.graph
            .edge(id)
            .filter(|s| !self.mask.is_edge_masked(s))
    }

    fn outgoing_edges(&self, id: ElementId) -> Vec<&Scope> {
        if self.mask.is_vertex_masked(id) {
            return Vec::new();
        }
        self.visible_scopes(self.graph.outgoing_edges(id))
    }

    fn incoming_edges(&self, id: ElementId) -> Vec<&Scope> {
        if self.mask.is_vertex_masked(id) {
            return Vec::new();
        }
        self.visible_scopes(self.graph.incoming_edges(id))
    }

    fn copy_graph(&self) -> Box<dyn ElementGraph + '_> {
        Box::new(self.clone())
    }

    fn write_debug_export(&self, path: &Path) -> bool {
        export::write_debug_export(self, path)
    }
}

impl PartialEq<ElementMaskSubGraph<'_>> for ElementMaskSubGraph<'_> {
    fn eq(&self, other: &ElementMaskSubGraph<'_>) -> bool {
        graphs::equals(self, other)
    }
}

impl Eq for ElementMaskSubGraph<'_> {}

impl PartialEq<BaseElementGraph> for ElementMaskSubGraph<'_> {
    fn eq(&self, other: &BaseElementGraph) -> bool {
        graphs::equals(self, other)
    }
}

impl Hash for ElementMaskSubGraph<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        graphs::hash_graph(self, state);
    }
}
