//! Small graphs shared by the integration tests.
#![allow(dead_code)]

use flowplan_core::prelude::{ElementId, ElementKind, FlowElement, Scope, ScopeId, ScopeKind};
use flowplan_planner::{BaseElementGraph, ElementGraph};

pub fn element(id: u64, name: &str, kind: ElementKind) -> FlowElement {
    FlowElement::new(ElementId::new(id), name, kind)
}

pub fn scope(id: u64, source: u64, target: u64) -> Scope {
    Scope::new(
        ScopeId::new(id),
        ElementId::new(source),
        ElementId::new(target),
        ScopeKind::Each,
    )
}

pub fn eid(id: u64) -> ElementId {
    ElementId::new(id)
}

pub fn sid(id: u64) -> ScopeId {
    ScopeId::new(id)
}

/// `A(1) -> B(2) -> C(3)` through scopes 10 and 11.
pub fn abc() -> BaseElementGraph {
    BaseElementGraph::from_parts(
        vec![
            element(1, "A", ElementKind::Source),
            element(2, "B", ElementKind::Each),
            element(3, "C", ElementKind::Sink),
        ],
        vec![scope(10, 1, 2), scope(11, 2, 3)],
    )
    .expect("abc fixture")
}

/// ```text
///        +-10-> split(2) -12-+
/// read(1)                    +-> join(4) -14-> write(5)
///        +-11-> parse(3) -13-+
/// ```
pub fn diamond() -> BaseElementGraph {
    BaseElementGraph::from_parts(
        vec![
            element(1, "read", ElementKind::Source),
            element(2, "split", ElementKind::Each),
            element(3, "parse", ElementKind::Each),
            element(4, "join", ElementKind::CoGroup),
            element(5, "write", ElementKind::Sink),
        ],
        vec![
            scope(10, 1, 2),
            scope(11, 1, 3),
            scope(12, 2, 4),
            scope(13, 3, 4).with_ordinal(1),
            scope(14, 4, 5),
        ],
    )
    .expect("diamond fixture")
}

pub fn vertex_ids(graph: &dyn ElementGraph) -> Vec<u64> {
    graph.vertices().iter().map(|e| e.id.get()).collect()
}

pub fn edge_ids(graph: &dyn ElementGraph) -> Vec<u64> {
    graph.edges().iter().map(|s| s.id.get()).collect()
}

/// Fresh directory under the system temp dir, unique per test.
pub fn scratch_dir(test: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "flowplan-{}-{}-{}",
        test,
        std::process::id(),
        flowplan_core::node::NodeId::random()
    ));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
