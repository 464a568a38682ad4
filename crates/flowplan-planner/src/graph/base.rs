//! `BaseElementGraph`: the owning, mutable element graph.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};
use std::path::Path;

use flowplan_core::element::FlowElement;
use flowplan_core::id::{ElementId, ScopeId};
use flowplan_core::scope::Scope;

use crate::error::{Error, Result};
use crate::export;
use crate::graph::{ElementGraph, ElementMaskSubGraph};
use crate::graphs;

/// Owns a pipeline's elements and scopes.
///
/// Every scope's endpoints are present in the element set; `add_edge`
/// rejects anything else and `remove_vertex` drops incident scopes with the
/// element. Storage is id-ordered so listings and exports are deterministic.
#[derive(Debug, Clone, Default)]
pub struct BaseElementGraph {
    elements: BTreeMap<ElementId, FlowElement>,
    scopes: BTreeMap<ScopeId, Scope>,
    outgoing: BTreeMap<ElementId, BTreeSet<ScopeId>>,
    incoming: BTreeMap<ElementId, BTreeSet<ScopeId>>,
}

impl BaseElementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from element and scope lists, rejecting duplicate ids
    /// and dangling scopes.
    pub fn from_parts<E, S>(elements: E, scopes: S) -> Result<Self>
    where
        E: IntoIterator<Item = FlowElement>,
        S: IntoIterator<Item = Scope>,
    {
        let mut graph = Self::new();
        for element in elements {
            let id = element.id;
            if !graph.add_vertex(element) {
                return Err(Error::DuplicateElement(id));
            }
        }
        for scope in scopes {
            let id = scope.id;
            if !graph.add_edge(scope)? {
                return Err(Error::DuplicateScope(id));
            }
        }
        Ok(graph)
    }

    /// Insert `element`. Returns false (and keeps the existing element) if
    /// its id is already present.
    pub fn add_vertex(&mut self, element: FlowElement) -> bool {
        if self.elements.contains_key(&element.id) {
            return false;
        }
        self.outgoing.insert(element.id, BTreeSet::new());
        self.incoming.insert(element.id, BTreeSet::new());
        self.elements.insert(element.id, element);
        true
    }

    /// Insert `scope`. Both endpoints must already be present. Returns
    /// `Ok(false)` if the scope id is already present.
    pub fn add_edge(&mut self, scope: Scope) -> Result<bool> {
        for endpoint in [scope.source, scope.target] {
            if !self.elements.contains_key(&endpoint) {
                return Err(Error::MissingEndpoint {
                    scope: scope.id,
                    element: endpoint,
                });
            }
        }
        if self.scopes.contains_key(&scope.id) {
            return Ok(false);
        }
        self.outgoing
            .entry(scope.source)
            .or_default()
            .insert(scope.id);
        self.incoming
            .entry(scope.target)
            .or_default()
            .insert(scope.id);
        self.scopes.insert(scope.id, scope);
        Ok(true)
    }

    pub fn remove_edge(&mut self, id: ScopeId) -> Option<Scope> {
        let scope = self.scopes.remove(&id)?;
        if let Some(out) = self.outgoing.get_mut(&scope.source) {
            out.remove(&id);
        }
        if let Some(inc) = self.incoming.get_mut(&scope.target) {
            inc.remove(&id);
        }
        Some(scope)
    }

    /// Remove `id` together with every scope touching it.
    pub fn remove_vertex(&mut self, id: ElementId) -> Option<FlowElement> {
        let element = self.elements.remove(&id)?;
        let incident: Vec<ScopeId> = self
            .outgoing
            .remove(&id)
            .into_iter()
            .flatten()
            .chain(self.incoming.remove(&id).into_iter().flatten())
            .collect();
        for scope in incident {
            self.remove_edge(scope);
        }
        Some(element)
    }

    /// View of this graph hiding `elements` (and their scopes).
    pub fn mask<I>(&self, elements: I) -> ElementMaskSubGraph<'_>
    where
        I: IntoIterator<Item = ElementId>,
    {
        ElementMaskSubGraph::new(self, elements)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn resolve(&self, ids: Option<&BTreeSet<ScopeId>>) -> Vec<&Scope> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.scopes.get(id))
            .collect()
    }
}

impl ElementGraph for BaseElementGraph {
    fn vertices(&self) -> Vec<&FlowElement> {
        self.elements.values().collect()
    }

    fn edges(&self) -> Vec<&Scope> {
        self.scopes.values().collect()
    }

    fn vertex(&self, id: ElementId) -> Option<&FlowElement> {
        self.elements.get(&id)
    }

    fn edge(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(&id)
    }

    fn outgoing_edges(&self, id: ElementId) -> Vec<&Scope> {
        self.resolve(self.outgoing.get(&id))
    }

    fn incoming_edges(&self, id: ElementId) -> Vec<&Scope> {
        self.resolve(self.incoming.get(&id))
    }

    fn copy_graph(&self) -> Box<dyn ElementGraph + '_> {
        Box::new(self.clone())
    }

    fn write_debug_export(&self, path: &Path) -> bool {
        export::write_debug_export(self, path)
    }

    fn vertex_count(&self) -> usize {
        self.elements.len()
    }

    fn edge_count(&self) -> usize {
        self.scopes.len()
    }
}

impl PartialEq for BaseElementGraph {
    fn eq(&self, other: &Self) -> bool {
        graphs::equals(self, other)
    }
}

impl Eq for BaseElementGraph {}

impl PartialEq<ElementMaskSubGraph<'_>> for BaseElementGraph {
    fn eq(&self, other: &ElementMaskSubGraph<'_>) -> bool {
        graphs::equals(self, other)
    }
}

impl Hash for BaseElementGraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        graphs::hash_graph(self, state);
    }
}
