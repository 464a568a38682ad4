//! Debug export: DOT text, then an optional rendered diagram.
//!
//! The DOT text is the product; it is written first and on its own. The
//! diagram is a convenience: any renderer failure is logged and reported as
//! `diagram: None`, never as an error.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use flowplan_core::config::PlannerConfig;
use flowplan_core::element::{ElementKind, FlowElement};
use flowplan_core::scope::Scope;

use crate::error::{Error, Result};
use crate::graph::ElementGraph;
use crate::graphs::{sorted_edges, sorted_vertices};

pub mod render;

pub use render::{DiagramRenderer, DotRenderer};

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub dot_path: PathBuf,
    /// Rendered diagram, if a renderer ran and succeeded.
    pub diagram: Option<PathBuf>,
}

/// Render the visible structure as DOT. Elements and scopes are ordered by id,
/// so equal graphs always produce identical text.
pub fn to_dot(graph: &dyn ElementGraph, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph {} {{", quote(&escape(name)));
    out.push_str("  rankdir=TB;\n");
    for element in sorted_vertices(graph) {
        let _ = writeln!(
            out,
            "  e{} [label={}, shape={}];",
            element.id.get(),
            quote(&element_label(element)),
            shape(element.kind)
        );
    }
    for scope in sorted_edges(graph) {
        let _ = writeln!(
            out,
            "  e{} -> e{} [label={}];",
            scope.source.get(),
            scope.target.get(),
            quote(&scope_label(scope))
        );
    }
    out.push_str("}\n");
    out
}

/// Write DOT text for `graph` to `path`, creating parent directories.
pub fn write_dot(graph: &dyn ElementGraph, path: &Path) -> Result<()> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("flow");
    let text = to_dot(graph, name);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Export(format!("mkparent {}: {e}", parent.display())))?;
        }
    }
    fs::write(path, text).map_err(|e| Error::Export(format!("write {}: {e}", path.display())))
}

/// Write DOT text to `path`, then hand it to `renderer` if one is given.
///
/// Only the textual write can fail this call.
pub fn export_graph(
    graph: &dyn ElementGraph,
    path: &Path,
    renderer: Option<&dyn DiagramRenderer>,
) -> Result<ExportReport> {
    write_dot(graph, path)?;

    let diagram = renderer.and_then(|r| match r.render(path) {
        Ok(diagram) => Some(diagram),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "diagram render failed; kept DOT only");
            None
        }
    });

    tracing::debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        rendered = diagram.is_some(),
        "graph exported"
    );
    Ok(ExportReport {
        dot_path: path.to_path_buf(),
        diagram,
    })
}

/// Export driven by `PlannerConfig::from_env()`. Bare names land under the
/// configured debug directory. Returns whether the DOT text was written.
pub fn write_debug_export(graph: &dyn ElementGraph, name: &Path) -> bool {
    write_debug_export_with(graph, name, &PlannerConfig::from_env())
}

pub fn write_debug_export_with(graph: &dyn ElementGraph, name: &Path, cfg: &PlannerConfig) -> bool {
    let path = cfg.resolve_debug_path(name);
    let renderer = DotRenderer::from_config(cfg);
    match export_graph(
        graph,
        &path,
        renderer.as_ref().map(|r| r as &dyn DiagramRenderer),
    ) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "debug export failed");
            false
        }
    }
}

fn element_label(element: &FlowElement) -> String {
    format!(
        "{}\\n{} #{}",
        escape(&element.name),
        element.kind,
        element.ordinal
    )
}

fn scope_label(scope: &Scope) -> String {
    let mut label = format!("{} {}:{}", scope.id.get(), scope.kind, scope.ordinal);
    if !scope.fields.is_empty() {
        let fields: Vec<String> = scope.fields.iter().map(|f| escape(f)).collect();
        let _ = write!(label, "\\n[{}]", fields.join(", "));
    }
    label
}

fn shape(kind: ElementKind) -> &'static str {
    if kind.is_tap() {
        "cylinder"
    } else if kind.is_splice() {
        "diamond"
    } else {
        "box"
    }
}

/// Escape backslashes and quotes; callers add DOT `\n` breaks afterwards.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BaseElementGraph;
    use flowplan_core::id::{ElementId, ScopeId};
    use flowplan_core::scope::ScopeKind;

    #[test]
    fn dot_text_is_ordered_and_escaped() {
        let g = BaseElementGraph::from_parts(
            [
                FlowElement::new(ElementId::new(2), "say \"hi\"", ElementKind::Each),
                FlowElement::new(ElementId::new(1), "in", ElementKind::Source),
            ],
            [Scope::new(
                ScopeId::new(7),
                ElementId::new(1),
                ElementId::new(2),
                ScopeKind::Tap,
            )
            .with_fields(["line"])],
        )
        .unwrap();

        let dot = to_dot(&g, "demo");
        let expected = "digraph \"demo\" {\n  rankdir=TB;\n  \
             e1 [label=\"in\\nsource #0\", shape=cylinder];\n  \
             e2 [label=\"say \\\"hi\\\"\\neach #0\", shape=box];\n  \
             e1 -> e2 [label=\"7 tap:0\\n[line]\"];\n}\n";
        assert_eq!(dot, expected);
    }
}
