//! YAML → `BaseElementGraph` loader.
//!
//! Example:
//! ```yaml
//! name: wordcount
//! config: { debug_dir: "/tmp/flowplan", render_diagrams: false }
//! elements:
//!   - { id: 1, name: lines, kind: source }
//!   - { id: 2, name: split, kind: each }
//!   - { id: 3, name: count, kind: group_by }
//! scopes:
//!   - { id: 10, source: 1, target: 2, kind: tap, fields: [line] }
//!   - { id: 11, source: 2, target: 3, kind: each, fields: [word] }
//! ```

use serde::{Deserialize, Serialize};

use flowplan_core::config::PlannerConfig;
use flowplan_core::element::FlowElement;
use flowplan_core::scope::Scope;

use crate::error::Result;
use crate::graph::BaseElementGraph;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub config: Option<GraphConfig>,
    pub elements: Vec<FlowElement>,
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

/// Per-document overrides applied on top of `PlannerConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub debug_dir: Option<String>,
    pub render_diagrams: Option<bool>,
    pub renderer_program: Option<String>,
    pub diagram_format: Option<String>,
}

impl GraphConfig {
    pub fn apply(&self, cfg: &mut PlannerConfig) {
        if let Some(dir) = &self.debug_dir {
            cfg.debug_dir = dir.clone();
        }
        if let Some(render) = self.render_diagrams {
            cfg.render_diagrams = render;
        }
        if let Some(program) = &self.renderer_program {
            cfg.renderer_program = program.clone();
        }
        if let Some(format) = &self.diagram_format {
            cfg.diagram_format = format.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedGraph {
    pub name: String,
    pub graph: BaseElementGraph,
    pub config: GraphConfig,
}

/// Parse a YAML graph document. Duplicate ids and scopes with missing
/// endpoints are errors.
pub fn parse_yaml_graph(yaml_src: &str) -> Result<ParsedGraph> {
    let doc: GraphDocument = serde_yaml::from_str(yaml_src)?;
    let graph = BaseElementGraph::from_parts(doc.elements, doc.scopes)?;
    Ok(ParsedGraph {
        name: doc.name.unwrap_or_else(|| "flow".to_string()),
        graph,
        config: doc.config.unwrap_or_default(),
    })
}
