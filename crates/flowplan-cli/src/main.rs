//! flowplan CLI: inspect, mask and export element graph documents.

use clap::{Parser, Subcommand};
use flowplan_core::config::PlannerConfig;
use flowplan_core::element::FlowElement;
use flowplan_core::id::{ElementId, ScopeId};
use flowplan_planner::export::export_graph;
use flowplan_planner::{
    graphs, parse_yaml_graph, DiagramRenderer, DotRenderer, ElementGraph, ElementMask,
    ElementMaskSubGraph, GraphConfig, ParsedGraph,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowplan")]
#[command(about = "Inspect, mask and export flow element graphs", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a graph document parses and is well formed
    Validate {
        /// Path to the graph YAML file
        #[arg(short, long)]
        graph: PathBuf,
    },

    /// Print counts, heads, tails, topological order and fingerprint
    Explain {
        /// Path to the graph YAML file
        #[arg(short, long)]
        graph: PathBuf,
    },

    /// Print the structure left visible after hiding elements and scopes
    Mask {
        /// Path to the graph YAML file
        #[arg(short, long)]
        graph: PathBuf,

        /// Element name to hide (repeatable)
        #[arg(long = "hide")]
        hide: Vec<String>,

        /// Scope id to hide (repeatable)
        #[arg(long = "hide-scope")]
        hide_scope: Vec<u64>,

        /// Also export the visible structure to this path
        #[arg(long)]
        export: Option<PathBuf>,

        /// Skip the rendered diagram when exporting
        #[arg(long)]
        no_render: bool,
    },

    /// Write DOT text and, unless disabled, a rendered diagram
    Export {
        /// Path to the graph YAML file
        #[arg(short, long)]
        graph: PathBuf,

        /// Output path; bare file names land under the debug directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Debug directory (overrides config)
        #[arg(long)]
        debug_dir: Option<String>,

        /// Diagram format passed to the renderer (overrides config)
        #[arg(long)]
        format: Option<String>,

        /// Skip the rendered diagram
        #[arg(long)]
        no_render: bool,
    },
}

/// CLI flags that take priority over the document and the environment.
#[derive(Debug, Default)]
struct Overrides {
    debug_dir: Option<String>,
    diagram_format: Option<String>,
    no_render: bool,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { graph } => {
            if let Err(e) = validate_graph(&graph) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Graph is valid");
        }
        Commands::Explain { graph } => {
            if let Err(e) = explain_graph(&graph) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Mask {
            graph,
            hide,
            hide_scope,
            export,
            no_render,
        } => {
            let overrides = Overrides {
                no_render,
                ..Default::default()
            };
            if let Err(e) = mask_graph(&graph, &hide, &hide_scope, export.as_deref(), &overrides) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Export {
            graph,
            out,
            debug_dir,
            format,
            no_render,
        } => {
            let overrides = Overrides {
                debug_dir,
                diagram_format: format,
                no_render,
            };
            if let Err(e) = export_document(&graph, out.as_deref(), &overrides) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load(path: &Path) -> CliResult<ParsedGraph> {
    let yaml_content = fs::read_to_string(path)?;
    Ok(parse_yaml_graph(&yaml_content)?)
}

fn validate_graph(path: &Path) -> CliResult<()> {
    let parsed = load(path)?;
    graphs::topological_order(&parsed.graph)?;
    Ok(())
}

fn explain_graph(path: &Path) -> CliResult<()> {
    let parsed = load(path)?;
    let graph = &parsed.graph;
    let order = graphs::topological_order(graph)?;

    println!("Graph: {}", parsed.name);
    println!("======");
    println!();
    println!("Elements: {}", graph.vertex_count());
    println!("Scopes:   {}", graph.edge_count());
    println!("Heads:    {}", names(graphs::sources(graph)));
    println!("Tails:    {}", names(graphs::sinks(graph)));
    println!(
        "Fingerprint: {} (flowplan-core {})",
        graphs::fingerprint(graph)?,
        flowplan_core::VERSION
    );
    println!();
    println!("Topological order:");
    for (i, id) in order.iter().enumerate() {
        if let Some(element) = graph.vertex(*id) {
            println!(
                "  {}. {} ({}) - {} in, {} out",
                i + 1,
                element,
                id,
                graph.incoming_edges(*id).len(),
                graph.outgoing_edges(*id).len()
            );
        }
    }

    Ok(())
}

fn mask_graph(
    path: &Path,
    hide: &[String],
    hide_scope: &[u64],
    export: Option<&Path>,
    overrides: &Overrides,
) -> CliResult<()> {
    let parsed = load(path)?;
    let hidden = hidden_elements(&parsed.graph, hide)?;
    let mask = ElementMask::new(hidden, hide_scope.iter().copied().map(ScopeId::new));
    let view = ElementMaskSubGraph::with_mask(&parsed.graph, mask);

    let mut hidden: Vec<u64> = view.mask().hidden_elements().map(|id| id.get()).collect();
    hidden.sort_unstable();
    let mut hidden_scopes: Vec<u64> = view.mask().hidden_scopes().map(|id| id.get()).collect();
    hidden_scopes.sort_unstable();
    println!("Hidden elements: {:?}", hidden);
    println!("Hidden scopes:   {:?}", hidden_scopes);
    print_structure(&view);

    if let Some(out) = export {
        let config = build_config(&parsed.config, overrides);
        export_with(&view, out, &config)?;
    }
    Ok(())
}

fn export_document(path: &Path, out: Option<&Path>, overrides: &Overrides) -> CliResult<()> {
    let parsed = load(path)?;
    let config = build_config(&parsed.config, overrides);
    let default_out = PathBuf::from(format!("{}.dot", parsed.name));
    export_with(&parsed.graph, out.unwrap_or(&default_out), &config)
}

fn export_with(graph: &dyn ElementGraph, out: &Path, config: &PlannerConfig) -> CliResult<()> {
    config.validate()?;
    let target = config.resolve_debug_path(out);
    let renderer = DotRenderer::from_config(config);
    let report = export_graph(
        graph,
        &target,
        renderer.as_ref().map(|r| r as &dyn DiagramRenderer),
    )?;

    println!("✓ Wrote {}", report.dot_path.display());
    match report.diagram {
        Some(diagram) => println!("✓ Rendered {}", diagram.display()),
        None if config.render_diagrams => println!("  Diagram not rendered (see log)"),
        None => {}
    }
    Ok(())
}

/// Environment first, then the document's config block, then CLI flags.
fn build_config(doc: &GraphConfig, overrides: &Overrides) -> PlannerConfig {
    let mut config = PlannerConfig::from_env();
    apply_overrides(&mut config, doc, overrides);
    config
}

fn apply_overrides(cfg: &mut PlannerConfig, doc: &GraphConfig, overrides: &Overrides) {
    doc.apply(cfg);
    if let Some(dir) = &overrides.debug_dir {
        cfg.debug_dir = dir.clone();
    }
    if let Some(format) = &overrides.diagram_format {
        cfg.diagram_format = format.clone();
    }
    if overrides.no_render {
        cfg.render_diagrams = false;
    }
}

/// Every element carrying one of `names`. An unknown name is an error so a
/// typo does not silently mask nothing.
fn hidden_elements(graph: &dyn ElementGraph, names: &[String]) -> CliResult<Vec<ElementId>> {
    let mut ids = Vec::new();
    for name in names {
        let found = graphs::find_by_name(graph, name);
        if found.is_empty() {
            return Err(format!("no element named '{}'", name).into());
        }
        ids.extend(found.into_iter().map(|e| e.id));
    }
    Ok(ids)
}

fn print_structure(graph: &dyn ElementGraph) {
    println!(
        "Visible: {} elements, {} scopes",
        graph.vertex_count(),
        graph.edge_count()
    );
    for element in graph.vertices() {
        println!("  {} ({})", element, element.id);
    }
    for scope in graph.edges() {
        println!("  {}", scope);
    }
}

fn names(elements: Vec<&FlowElement>) -> String {
    if elements.is_empty() {
        return "-".to_string();
    }
    elements
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{
        apply_overrides, hidden_elements, FlowElement, GraphConfig, Overrides, PlannerConfig,
    };
    use flowplan_core::element::ElementKind;
    use flowplan_core::id::{ElementId, ScopeId};
    use flowplan_core::scope::{Scope, ScopeKind};
    use flowplan_planner::BaseElementGraph;

    #[test]
    fn document_config_overrides_env_defaults() {
        let mut config = PlannerConfig::default();
        let doc = GraphConfig {
            debug_dir: Some("/tmp/doc".into()),
            render_diagrams: Some(false),
            ..Default::default()
        };
        apply_overrides(&mut config, &doc, &Overrides::default());
        assert_eq!(config.debug_dir, "/tmp/doc");
        assert!(!config.render_diagrams);
        assert_eq!(config.diagram_format, "pdf");
    }

    #[test]
    fn cli_flags_win_over_document() {
        let mut config = PlannerConfig::default();
        let doc = GraphConfig {
            debug_dir: Some("/tmp/doc".into()),
            diagram_format: Some("png".into()),
            ..Default::default()
        };
        let overrides = Overrides {
            debug_dir: Some("/tmp/cli".into()),
            diagram_format: Some("svg".into()),
            no_render: true,
        };
        apply_overrides(&mut config, &doc, &overrides);
        assert_eq!(config.debug_dir, "/tmp/cli");
        assert_eq!(config.diagram_format, "svg");
        assert!(!config.render_diagrams);
    }

    #[test]
    fn hide_resolves_names_and_rejects_unknown() {
        let graph = BaseElementGraph::from_parts(
            vec![
                FlowElement::new(ElementId::new(1), "read", ElementKind::Source),
                FlowElement::new(ElementId::new(2), "parse", ElementKind::Each),
            ],
            vec![Scope::new(
                ScopeId::new(10),
                ElementId::new(1),
                ElementId::new(2),
                ScopeKind::Tap,
            )],
        )
        .unwrap();

        let ids = hidden_elements(&graph, &["parse".to_string()]).unwrap();
        assert_eq!(ids, vec![ElementId::new(2)]);
        assert!(hidden_elements(&graph, &["missing".to_string()]).is_err());
    }
}
