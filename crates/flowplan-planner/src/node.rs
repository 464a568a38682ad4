//! Planning units: committed partitions of the element graph.

use std::path::Path;

use flowplan_core::element::FlowElement;
use flowplan_core::hash::Hash256;
use flowplan_core::node::{NodeDescriptor, NodeId};

use crate::error::{Error, Result};
use crate::graph::{BaseElementGraph, ElementGraph};
use crate::{export, graphs};

/// A partition the rule engine decided to keep.
///
/// The unit owns a materialized copy of the partition, so it outlives the
/// views it was cut from. Element ordinals are renumbered to each element's
/// topological position inside the unit.
#[derive(Debug, Clone)]
pub struct FlowNode {
    descriptor: NodeDescriptor,
    graph: BaseElementGraph,
}

impl FlowNode {
    /// Commit `graph` (typically a masked view) as unit `ordinal`.
    pub fn from_graph(name: impl Into<String>, ordinal: u32, graph: &dyn ElementGraph) -> Result<Self> {
        let order = graphs::topological_order(graph)?;
        let mut elements = Vec::with_capacity(order.len());
        for (pos, id) in order.iter().enumerate() {
            let position =
                u32::try_from(pos).map_err(|_| Error::TooManyElements(order.len()))?;
            if let Some(element) = graph.vertex(*id) {
                elements.push(element.clone().with_ordinal(position));
            }
        }
        let committed = BaseElementGraph::from_parts(
            elements,
            graph.edges().into_iter().cloned(),
        )?;

        let descriptor = NodeDescriptor::new(name, ordinal);
        tracing::debug!(
            node = %descriptor.id,
            name = %descriptor.name,
            ordinal,
            elements = committed.vertex_count(),
            scopes = committed.edge_count(),
            "flow node committed"
        );
        Ok(Self {
            descriptor,
            graph: committed,
        })
    }

    pub fn id(&self) -> NodeId {
        self.descriptor.id
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn ordinal(&self) -> u32 {
        self.descriptor.ordinal
    }

    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    pub fn graph(&self) -> &BaseElementGraph {
        &self.graph
    }

    /// Elements reading into this unit.
    pub fn heads(&self) -> Vec<&FlowElement> {
        graphs::sources(&self.graph)
    }

    /// Elements this unit writes out through.
    pub fn tails(&self) -> Vec<&FlowElement> {
        graphs::sinks(&self.graph)
    }

    pub fn fingerprint(&self) -> Result<Hash256> {
        graphs::fingerprint(&self.graph)
    }

    pub fn write_debug_export(&self, path: &Path) -> bool {
        export::write_debug_export(&self.graph, path)
    }
}
