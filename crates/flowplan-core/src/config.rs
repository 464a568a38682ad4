//! Planner configuration that downstream crates can serialize/deserialize.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Directory that bare debug-export file names are written under.
    pub debug_dir: String,

    /// Attempt a rendered diagram after every textual export.
    pub render_diagrams: bool,

    /// External renderer invoked on the DOT file (graphviz `dot` by default).
    pub renderer_program: String,

    /// Output format passed to the renderer as `-T<format>`.
    pub diagram_format: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            debug_dir: "/tmp/flowplan-debug".to_string(),
            render_diagrams: true,
            renderer_program: "dot".to_string(),
            diagram_format: "pdf".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `FLOWPLAN_DEBUG_DIR`: debug export directory
    /// - `FLOWPLAN_RENDER_DIAGRAMS`: `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`)
    /// - `FLOWPLAN_RENDERER`: renderer program
    /// - `FLOWPLAN_DIAGRAM_FORMAT`: renderer output format
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("FLOWPLAN_DEBUG_DIR") {
            cfg.debug_dir = s;
        }

        if let Ok(s) = std::env::var("FLOWPLAN_RENDER_DIAGRAMS") {
            if let Some(v) = parse_flag(&s) {
                cfg.render_diagrams = v;
            }
        }

        if let Ok(s) = std::env::var("FLOWPLAN_RENDERER") {
            cfg.renderer_program = s;
        }

        if let Ok(s) = std::env::var("FLOWPLAN_DIAGRAM_FORMAT") {
            cfg.diagram_format = s;
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.render_diagrams {
            if self.renderer_program.trim().is_empty() {
                return Err(Error::Config(
                    "renderer_program is empty but render_diagrams is on".into(),
                ));
            }
            if self.diagram_format.trim().is_empty() {
                return Err(Error::Config(
                    "diagram_format is empty but render_diagrams is on".into(),
                ));
            }
        }
        Ok(())
    }

    /// Map a debug export name to the file the DOT text is written to.
    ///
    /// Absolute paths and paths with a directory component are kept as given;
    /// bare file names land under `debug_dir`. A missing extension becomes `.dot`.
    pub fn resolve_debug_path(&self, name: &Path) -> PathBuf {
        let mut resolved = if name.is_absolute() || name.components().count() > 1 {
            name.to_path_buf()
        } else {
            Path::new(&self.debug_dir).join(name)
        };
        if resolved.extension().is_none() {
            resolved.set_extension("dot");
        }
        resolved
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
