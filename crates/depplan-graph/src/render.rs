//! Snapshot rendering for inspecting a graph outside the process.
//!
//! Renderers only ever see a [`GraphSnapshot`], a detached copy of the node
//! and edge lists. Nothing in the graph depends on them.

use crate::edge::Edge;
use crate::graph::{DependencyGraph, NodeLabel};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to format output: {0}")]
    Fmt(#[from] std::fmt::Error),
    #[error("Failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only copy of a graph's nodes and edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot<N> {
    pub nodes: Vec<N>,
    pub edges: Vec<Edge<N>>,
}

impl<N: NodeLabel> DependencyGraph<N> {
    /// Takes a snapshot for rendering.
    pub fn snapshot(&self) -> GraphSnapshot<N> {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges(),
        }
    }
}

/// Turns a snapshot into text.
pub trait Renderer<N> {
    fn render(&self, snapshot: &GraphSnapshot<N>) -> Result<String, RenderError>;
}

/// Graphviz DOT output. Labels are written with their `Debug` form, which
/// quotes and escapes strings the way DOT expects.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    pub name: String,
    pub node_color: String,
    pub edge_color: String,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            name: "dependencies".to_string(),
            node_color: "orange".to_string(),
            edge_color: "red".to_string(),
        }
    }
}

impl<N: Debug> Renderer<N> for DotRenderer {
    fn render(&self, snapshot: &GraphSnapshot<N>) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "digraph {:?} {{", self.name)?;
        writeln!(
            out,
            "    node [style=filled, fillcolor={:?}];",
            self.node_color
        )?;
        writeln!(out, "    edge [color={:?}];", self.edge_color)?;

        for node in &snapshot.nodes {
            writeln!(out, "    {:?};", node)?;
        }
        for edge in &snapshot.edges {
            writeln!(out, "    {:?} -> {:?};", edge.parent, edge.child)?;
        }

        out.push_str("}\n");
        Ok(out)
    }
}

/// Pretty-printed JSON output.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl<N: Serialize> Renderer<N> for JsonRenderer {
    fn render(&self, snapshot: &GraphSnapshot<N>) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DependencyGraph<String> {
        DependencyGraph::from_parts(
            vec![("Report 1".to_string(), "Report 5".to_string())],
            vec!["Report 11".to_string()],
        )
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut graph = sample();
        let snapshot = graph.snapshot();
        graph.add_edge("Report 5".to_string(), "Report 8".to_string());

        assert_eq!(snapshot.nodes.len(), 3);
        assert_eq!(snapshot.edges.len(), 1);
    }

    #[test]
    fn test_dot_output() {
        let dot = DotRenderer::default().render(&sample().snapshot()).unwrap();

        assert!(dot.starts_with("digraph \"dependencies\" {\n"));
        assert!(dot.contains("    \"Report 11\";\n"));
        assert!(dot.contains("    \"Report 1\" -> \"Report 5\";\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_dot_escapes_quotes() {
        let graph = DependencyGraph::from_parts(vec![("say \"hi\"", "b")], Vec::<&str>::new());
        let dot = DotRenderer::default().render(&graph.snapshot()).unwrap();

        assert!(dot.contains(r#""say \"hi\"" -> "b";"#));
    }

    #[test]
    fn test_json_output_round_trips() {
        let snapshot = sample().snapshot();
        let json = JsonRenderer.render(&snapshot).unwrap();
        let parsed: GraphSnapshot<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
    }
}
