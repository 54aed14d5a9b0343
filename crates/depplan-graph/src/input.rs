//! Plan file loading.
//!
//! A plan file is JSON holding dependency pairs and, optionally, items
//! that have no dependencies at all.

use crate::graph::DependencyGraph;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read plan file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid plan file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A plan file: dependency pairs plus optional standalone items.
///
/// ```json
/// {
///   "edges": [["Report 1", "Report 5"], ["Report 5", "Report 8"]],
///   "nodes": ["Report 11"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInput {
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub nodes: Vec<String>,
}

impl PlanInput {
    /// Loads a plan file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses a plan document.
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the dependency graph described by this input.
    pub fn into_graph(self) -> DependencyGraph<String> {
        DependencyGraph::from_parts(self.edges, self.nodes)
    }
}
