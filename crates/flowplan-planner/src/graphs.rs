//! Representation-independent algorithms over any `ElementGraph`.
//!
//! Everything here looks only at the visible vertices, scopes and incidence a
//! graph reports, never at how it stores them, so a base graph, a view and a
//! view over a view are all compared and ordered the same way.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use flowplan_core::element::FlowElement;
use flowplan_core::hash::{hash_serde, Hash256};
use flowplan_core::id::{ElementId, ScopeId};
use flowplan_core::scope::Scope;

use crate::error::{Error, Result};
use crate::graph::{BaseElementGraph, ElementGraph};

/// Structural equality: same elements, same scopes, and every element has the
/// same outgoing scopes in both graphs.
pub fn equals(lhs: &dyn ElementGraph, rhs: &dyn ElementGraph) -> bool {
    if lhs.vertex_count() != rhs.vertex_count() || lhs.edge_count() != rhs.edge_count() {
        return false;
    }
    if sorted_vertices(lhs) != sorted_vertices(rhs) {
        return false;
    }
    if sorted_edges(lhs) != sorted_edges(rhs) {
        return false;
    }
    lhs.vertices()
        .iter()
        .all(|v| outgoing_ids(lhs, v.id) == outgoing_ids(rhs, v.id))
}

/// Hash contribution for `Hash` impls. Deliberately coarse: only counts, which
/// equal graphs always share. Use `equals` or `fingerprint` to tell graphs apart.
pub fn hash_graph<H: Hasher>(graph: &dyn ElementGraph, state: &mut H) {
    graph.vertex_count().hash(state);
    graph.edge_count().hash(state);
}

/// Stable digest of the visible structure. Equal graphs share a fingerprint
/// whatever their representation.
pub fn fingerprint(graph: &dyn ElementGraph) -> Result<Hash256> {
    Ok(hash_serde(&(sorted_vertices(graph), sorted_edges(graph)))?)
}

/// Copy the visible structure into a new owning graph.
pub fn materialize(graph: &dyn ElementGraph) -> Result<BaseElementGraph> {
    BaseElementGraph::from_parts(
        graph.vertices().into_iter().cloned(),
        graph.edges().into_iter().cloned(),
    )
}

/// Elements in dependency order. Ties are broken by id, so the order is
/// deterministic. Parallel scopes each count toward in-degree.
pub fn topological_order(graph: &dyn ElementGraph) -> Result<Vec<ElementId>> {
    let mut in_degree: BTreeMap<ElementId, usize> = graph
        .vertices()
        .iter()
        .map(|v| (v.id, graph.incoming_edges(v.id).len()))
        .collect();

    let mut ready: BTreeSet<ElementId> = in_degree
        .iter()
        .filter_map(|(id, &deg)| if deg == 0 { Some(*id) } else { None })
        .collect();

    let mut order = Vec::with_capacity(in_degree.len());
    while let Some(next) = ready.pop_first() {
        order.push(next);
        for scope in graph.outgoing_edges(next) {
            if let Some(deg) = in_degree.get_mut(&scope.target) {
                *deg -= 1;
                if *deg == 0 {
                    ready.insert(scope.target);
                }
            }
        }
    }

    if order.len() != in_degree.len() {
        return Err(Error::Cycle {
            remaining: in_degree.len() - order.len(),
        });
    }
    Ok(order)
}

/// Elements with no visible incoming scope.
pub fn sources(graph: &dyn ElementGraph) -> Vec<&FlowElement> {
    graph
        .vertices()
        .into_iter()
        .filter(|v| graph.incoming_edges(v.id).is_empty())
        .collect()
}

/// Elements with no visible outgoing scope.
pub fn sinks(graph: &dyn ElementGraph) -> Vec<&FlowElement> {
    graph
        .vertices()
        .into_iter()
        .filter(|v| graph.outgoing_edges(v.id).is_empty())
        .collect()
}

/// Visible elements named `name`. Names are not unique.
pub fn find_by_name<'a>(graph: &'a dyn ElementGraph, name: &str) -> Vec<&'a FlowElement> {
    graph
        .vertices()
        .into_iter()
        .filter(|v| v.name == name)
        .collect()
}

pub(crate) fn sorted_vertices(graph: &dyn ElementGraph) -> Vec<&FlowElement> {
    let mut vertices = graph.vertices();
    vertices.sort_by_key(|v| v.id);
    vertices
}

pub(crate) fn sorted_edges(graph: &dyn ElementGraph) -> Vec<&Scope> {
    let mut edges = graph.edges();
    edges.sort_by_key(|s| s.id);
    edges
}

fn outgoing_ids(graph: &dyn ElementGraph, id: ElementId) -> BTreeSet<ScopeId> {
    graph.outgoing_edges(id).iter().map(|s| s.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowplan_core::element::ElementKind;
    use flowplan_core::scope::ScopeKind;

    fn chain(ids: &[u64]) -> BaseElementGraph {
        let els = ids
            .iter()
            .map(|&i| FlowElement::new(ElementId::new(i), format!("e{i}"), ElementKind::Each));
        let scopes = ids.windows(2).map(|w| {
            Scope::new(
                ScopeId::new(100 + w[0]),
                ElementId::new(w[0]),
                ElementId::new(w[1]),
                ScopeKind::Each,
            )
        });
        BaseElementGraph::from_parts(els, scopes).unwrap()
    }

    #[test]
    fn topological_order_follows_scopes_not_ids() {
        let g = chain(&[5, 2, 9, 1]);
        let order: Vec<u64> = topological_order(&g)
            .unwrap()
            .into_iter()
            .map(|id| id.get())
            .collect();
        assert_eq!(order, vec![5, 2, 9, 1]);
    }

    #[test]
    fn cycle_is_reported() {
        let mut g = chain(&[1, 2, 3]);
        g.add_edge(Scope::new(
            ScopeId::new(50),
            ElementId::new(3),
            ElementId::new(1),
            ScopeKind::Each,
        ))
        .unwrap();
        let err = topological_order(&g).unwrap_err();
        assert!(matches!(err, Error::Cycle { remaining: 3 }));
    }

    #[test]
    fn masking_a_cycle_member_breaks_the_cycle() {
        let mut g = chain(&[1, 2, 3]);
        g.add_edge(Scope::new(
            ScopeId::new(50),
            ElementId::new(3),
            ElementId::new(1),
            ScopeKind::Each,
        ))
        .unwrap();
        let view = g.mask([ElementId::new(2)]);
        let order: Vec<u64> = topological_order(&view)
            .unwrap()
            .into_iter()
            .map(|id| id.get())
            .collect();
        assert_eq!(order, vec![3, 1]);
    }

    #[test]
    fn sources_and_sinks_respect_the_mask() {
        let g = chain(&[1, 2, 3]);
        let view = g.mask([ElementId::new(1)]);
        let heads: Vec<u64> = sources(&view).iter().map(|e| e.id.get()).collect();
        let tails: Vec<u64> = sinks(&view).iter().map(|e| e.id.get()).collect();
        assert_eq!(heads, vec![2]);
        assert_eq!(tails, vec![3]);
    }

    #[test]
    fn same_elements_different_incidence_are_unequal() {
        let a = chain(&[1, 2, 3]);
        let mut b = chain(&[1, 2, 3]);
        let moved = b.remove_edge(ScopeId::new(101)).unwrap();
        b.add_edge(Scope {
            target: ElementId::new(1),
            ..moved
        })
        .unwrap();
        assert!(!equals(&a, &b));
        assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn materialize_drops_hidden_structure() {
        let g = chain(&[1, 2, 3]);
        let view = g.mask([ElementId::new(3)]);
        let committed = materialize(&view).unwrap();
        assert_eq!(committed.vertex_count(), 2);
        assert_eq!(committed.edge_count(), 1);
        assert_eq!(committed, view);
    }
}
