//! Graphviz rendering of the peering graph.

use super::DiagramSink;
use crate::cmd;
use crate::config;
use crate::error::VnetError;
use crate::models::UndirectedPeeringEdge;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Writes `<dir>/vnet_peering_diagram.dot` and, unless disabled, turns it into
/// a PNG with the `dot` binary.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    pub dir: PathBuf,
    pub render_png: bool,
}

impl DotRenderer {
    pub fn new(dir: impl Into<PathBuf>, render_png: bool) -> Self {
        DotRenderer {
            dir: dir.into(),
            render_png,
        }
    }

    pub fn dot_path(&self) -> PathBuf {
        self.dir.join(format!("{}.dot", config::DIAGRAM_BASENAME))
    }

    pub fn png_path(&self) -> PathBuf {
        self.dir.join(format!("{}.png", config::DIAGRAM_BASENAME))
    }
}

impl DiagramSink for DotRenderer {
    fn render(&self, edges: &[UndirectedPeeringEdge]) -> Result<(), VnetError> {
        let dot_path = self.dot_path();
        std::fs::write(&dot_path, render_dot(edges))
            .map_err(|e| VnetError::sink(dot_path.display().to_string(), e))?;
        log::info!("Diagram source saved as {}", dot_path.display());

        if !self.render_png {
            return Ok(());
        }
        let png_path = self.png_path();
        cmd::run(&format!(
            "dot -Tpng -o '{}' '{}'",
            png_path.display(),
            dot_path.display()
        ))
        .map_err(|e| VnetError::sink(png_path.display().to_string(), e))?;
        log::info!("Diagram saved as {}", png_path.display());
        Ok(())
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Undirected DOT graph, one line per edge.
pub fn render_dot(edges: &[UndirectedPeeringEdge]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// VNet Peering Diagram");
    let _ = writeln!(out, "graph vnet_peering {{");
    let _ = writeln!(out, "    size=\"11,8.5\";");
    let _ = writeln!(out, "    ratio=fill;");
    let _ = writeln!(out, "    dpi=1000;");
    for e in edges {
        let mut attrs = vec![format!("color={}", quote(e.color))];
        if let Some(state) = &e.state {
            attrs.push(format!("label={}", quote(state)));
        }
        let _ = writeln!(
            out,
            "    {} -- {} [{}];",
            quote(&e.endpoint_a),
            quote(&e.endpoint_b),
            attrs.join(", ")
        );
    }
    let _ = writeln!(out, "}}");
    out
}
