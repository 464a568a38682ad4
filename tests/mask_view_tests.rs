//! Masked subgraph view behavior over base graphs and other views

mod common;

use common::{abc, diamond, edge_ids, eid, sid, vertex_ids};
use flowplan_core::id::ElementId;
use flowplan_planner::{graphs, ElementGraph, ElementMask, ElementMaskSubGraph};

#[test]
fn test_hiding_middle_of_chain() {
    let base = abc();
    let view = ElementMaskSubGraph::new(&base, [eid(2)]);

    assert_eq!(vertex_ids(&view), vec![1, 3]);
    assert!(view.edges().is_empty());
    assert!(view.successors(eid(1)).is_empty());
    assert!(view.predecessors(eid(3)).is_empty());

    // An empty view over the view is the same graph
    let again = ElementMaskSubGraph::unmasked(&view);
    assert_eq!(again, view);
}

#[test]
fn test_hidden_vertex_hides_incident_scopes() {
    let base = diamond();
    let view = ElementMaskSubGraph::new(&base, [eid(2)]);

    assert_eq!(vertex_ids(&view), vec![1, 3, 4, 5]);
    assert_eq!(edge_ids(&view), vec![11, 13, 14]);
    assert!(!view.contains_edge(sid(10)));
    assert!(!view.contains_edge(sid(12)));

    let join_inputs: Vec<u64> = view
        .incoming_edges(eid(4))
        .iter()
        .map(|s| s.id.get())
        .collect();
    assert_eq!(join_inputs, vec![13]);

    let read_next: Vec<&str> = view
        .successors(eid(1))
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(read_next, vec!["parse"]);
}

#[test]
fn test_hidden_scope_keeps_its_endpoints() {
    let base = diamond();
    let view = ElementMaskSubGraph::with_scopes(&base, Vec::<ElementId>::new(), [sid(13)]);

    assert_eq!(view.vertex_count(), 5);
    assert_eq!(edge_ids(&view), vec![10, 11, 12, 14]);
    assert!(view.outgoing_edges(eid(3)).is_empty());
    assert_eq!(view.incident_edges(eid(4)).len(), 2);
}

#[test]
fn test_hidden_and_absent_queries_are_empty() {
    let base = diamond();
    let view = ElementMaskSubGraph::new(&base, [eid(4)]);

    assert!(view.vertex(eid(4)).is_none());
    assert!(!view.contains_vertex(eid(4)));
    assert!(view.outgoing_edges(eid(4)).is_empty());
    assert!(view.incoming_edges(eid(4)).is_empty());
    assert!(view.incident_edges(eid(99)).is_empty());
    assert!(view.edge(sid(14)).is_none());
}

#[test]
fn test_unknown_ids_in_mask_are_ignored() {
    let base = abc();
    let view = ElementMaskSubGraph::with_scopes(&base, [eid(42)], [sid(420)]);
    assert_eq!(view, base);
}

#[test]
fn test_views_do_not_touch_wrapped_graph() {
    let base = diamond();
    let before = base.clone();

    {
        let outer = ElementMaskSubGraph::new(&base, [eid(2), eid(5)]);
        let inner = ElementMaskSubGraph::new(&outer, [eid(3)]);
        let _ = inner.vertices();
        let _ = inner.copy_graph();
        let _ = graphs::materialize(&inner).unwrap();
    }

    assert_eq!(base, before);
    assert_eq!(base.vertex_count(), 5);
    assert_eq!(base.edge_count(), 5);
}

#[test]
fn test_nested_views_compose_like_union() {
    let base = diamond();
    let outer = ElementMaskSubGraph::new(&base, [eid(2)]);
    let nested = ElementMaskSubGraph::with_scopes(&outer, [eid(5)], [sid(11)]);

    let flat = ElementMaskSubGraph::with_mask(
        &base,
        ElementMask::new([eid(2), eid(5)], [sid(11)]),
    );

    assert_eq!(nested, flat);
    assert_eq!(vertex_ids(&nested), vec![1, 3, 4]);
    assert_eq!(edge_ids(&nested), vec![13]);
}

#[test]
fn test_view_copies_share_graph_and_mask() {
    let base = diamond();
    let view = ElementMaskSubGraph::new(&base, [eid(3)]);

    let copy = view.clone();
    assert!(std::ptr::addr_eq(copy.wrapped(), view.wrapped()));
    assert_eq!(copy.mask(), view.mask());
    assert_eq!(copy, view);

    let boxed = view.copy_graph();
    assert!(graphs::equals(boxed.as_ref(), &view));
    assert_eq!(boxed.vertex_count(), 4);
}

#[test]
fn test_base_copy_is_independent() {
    let base = diamond();
    let mut copy = base.clone();
    copy.remove_vertex(eid(4));

    assert_eq!(copy.vertex_count(), 4);
    assert_eq!(copy.edge_count(), 2);
    assert_eq!(base.vertex_count(), 5);
    assert_ne!(copy, base);

    let boxed = base.copy_graph();
    assert!(graphs::equals(boxed.as_ref(), &base));
}

#[test]
fn test_cycle_broken_by_mask() {
    let mut base = abc();
    base.add_edge(common::scope(12, 3, 1)).unwrap();
    assert!(graphs::topological_order(&base).is_err());

    let view = ElementMaskSubGraph::with_scopes(&base, Vec::<ElementId>::new(), [sid(12)]);
    let order: Vec<u64> = graphs::topological_order(&view)
        .unwrap()
        .into_iter()
        .map(|id| id.get())
        .collect();
    assert_eq!(order, vec![1, 2, 3]);
}
