//! Diagram renderers run after the DOT text has been written.

use std::path::{Path, PathBuf};
use std::process::Command;

use flowplan_core::config::PlannerConfig;

use crate::error::{Error, Result};

/// Turns a DOT file into a diagram. Implementations report failure through
/// `Error::Render`; the export layer logs it and keeps going.
pub trait DiagramRenderer {
    /// Render `dot_path`, returning the diagram's path.
    fn render(&self, dot_path: &Path) -> Result<PathBuf>;
}

/// Runs an external graphviz-compatible program: `<program> -T<format> in -o out`.
/// The diagram lands next to the DOT file with `format` as its extension.
/// A DOT file already named `*.<format>` gets the format appended instead,
/// so the diagram never replaces the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotRenderer {
    program: String,
    format: String,
}

impl DotRenderer {
    pub fn new(program: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format: format.into(),
        }
    }

    /// `None` when the config turns rendering off.
    pub fn from_config(cfg: &PlannerConfig) -> Option<Self> {
        if !cfg.render_diagrams {
            return None;
        }
        Some(Self::new(&cfg.renderer_program, &cfg.diagram_format))
    }

    pub fn output_path(&self, dot_path: &Path) -> PathBuf {
        let swapped = dot_path.with_extension(&self.format);
        if swapped != dot_path {
            return swapped;
        }
        let mut appended = dot_path.as_os_str().to_owned();
        appended.push(".");
        appended.push(&self.format);
        PathBuf::from(appended)
    }
}

impl DiagramRenderer for DotRenderer {
    fn render(&self, dot_path: &Path) -> Result<PathBuf> {
        let output = self.output_path(dot_path);
        let result = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .arg(dot_path)
            .arg("-o")
            .arg(&output)
            .output()
            .map_err(|e| Error::Render(format!("spawn {}: {e}", self.program)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Render(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }
        Ok(output)
    }
}
