//! Core graph data structure.
//!
//! The DependencyGraph wraps petgraph and keeps a label index so callers
//! address work items by their own identifiers instead of petgraph indexes.
//! Everything else in the crate works against this type.

use crate::error::GraphError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Anything usable as a node label: an opaque, hashable identity.
pub trait NodeLabel: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeLabel for T {}

/// Index of a node inside the underlying petgraph graph.
pub type NodeId = NodeIndex;

/// Directed dependency graph over work items.
///
/// An edge `parent → child` means the parent must be processed before the
/// child. Nodes are never removed, so petgraph indexes follow insertion
/// order and every iteration in this crate is deterministic.
#[derive(Debug, Clone)]
pub struct DependencyGraph<N: NodeLabel> {
    /// The underlying petgraph graph.
    pub(crate) graph: DiGraph<N, ()>,

    /// Maps labels to graph node indexes.
    index: HashMap<N, NodeId>,
}

impl<N: NodeLabel> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeLabel> DependencyGraph<N> {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a graph from an edge list plus standalone nodes.
    ///
    /// The result contains exactly the union of edge endpoints and the
    /// listed nodes. Edges are inserted first.
    pub fn from_parts<E, V>(edges: E, nodes: V) -> Self
    where
        E: IntoIterator<Item = (N, N)>,
        V: IntoIterator<Item = N>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph.add_nodes(nodes);
        graph
    }

    /// Inserts every `(parent, child)` pair, creating endpoints as needed.
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (N, N)>,
    {
        for (parent, child) in edges {
            self.add_edge(parent, child);
        }
    }

    /// Inserts one directed edge.
    ///
    /// Returns `false` when the edge already existed; duplicates are ignored.
    pub fn add_edge(&mut self, parent: N, child: N) -> bool {
        let from = self.add_node(parent);
        let to = self.add_node(child);

        // petgraph allows parallel edges, we don't
        if self.graph.contains_edge(from, to) {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    /// Inserts standalone nodes. Existing labels are left alone.
    pub fn add_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Inserts a node if absent and returns its index either way.
    pub fn add_node(&mut self, node: N) -> NodeId {
        if let Some(&index) = self.index.get(&node) {
            return index;
        }
        let index = self.graph.add_node(node.clone());
        self.index.insert(node, index);
        index
    }

    /// Returns true if the label is part of the graph.
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all node labels in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// Gets the node index for a label.
    pub fn get_index(&self, node: &N) -> Option<NodeId> {
        self.index.get(node).copied()
    }

    /// Like `get_index`, but a missing label is an error.
    pub(crate) fn require(&self, node: &N) -> Result<NodeId, GraphError> {
        self.get_index(node)
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    /// Label stored at an index handed out by this graph.
    pub(crate) fn label(&self, index: NodeId) -> &N {
        &self.graph[index]
    }

    /// Adjacent nodes in one direction, in edge insertion order.
    ///
    /// petgraph walks its adjacency lists newest-first.
    pub(crate) fn adjacent(&self, index: NodeId, direction: Direction) -> Vec<NodeId> {
        let mut adjacent: Vec<NodeId> = self.graph.neighbors_directed(index, direction).collect();
        adjacent.reverse();
        adjacent
    }

    pub(crate) fn labels(&self, indexes: &[NodeId]) -> Vec<N> {
        indexes.iter().map(|&idx| self.label(idx).clone()).collect()
    }
}
