//! Depplan Graph - Dependency plans for named work items
//!
//! This crate builds a directed dependency graph over work items (reports,
//! jobs, anything with an identity) and answers structural questions about
//! it: what runs before or after an item, how many independent dependency
//! trees exist, and which item each tree starts from.
//!
//! # Architecture
//!
//! The graph uses petgraph internally with a label index on top. Queries
//! are split by concern:
//! - Components: weakly connected "trees"
//! - Depth: breadth-first depth tables per tree
//! - Plan: one summary record per tree
//! - Query: successors, predecessors, degrees, root/leaf walks
//!
//! # Example
//!
//! ```
//! use depplan_graph::DependencyGraph;
//!
//! let graph = DependencyGraph::from_parts(
//!     vec![("extract", "transform"), ("transform", "load")],
//!     vec!["audit"],
//! );
//!
//! let plan = graph.compute_plan().unwrap();
//! assert_eq!(plan.len(), 2);
//! assert_eq!(plan[0].node, "extract");
//! assert_eq!(graph.find_root_node(&"load").unwrap(), "extract");
//! ```

mod builder;
mod components;
mod depth;
mod edge;
mod error;
mod graph;
mod input;
mod plan;
mod query;
mod render;

#[cfg(test)]
mod test_support;

pub use builder::GraphBuilder;
pub use depth::DepthMap;
pub use edge::Edge;
pub use error::GraphError;
pub use graph::{DependencyGraph, NodeId, NodeLabel};
pub use input::{InputError, PlanInput};
pub use plan::{PlanRecord, TreePlan};
pub use query::GraphStats;
pub use render::{DotRenderer, GraphSnapshot, JsonRenderer, RenderError, Renderer};
