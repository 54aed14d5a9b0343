//! Graph builder for assembling a dependency graph piece by piece.
//!
//! The builder collects edges and standalone nodes, then inserts them in
//! two passes:
//! 1. Add all edges (creating their endpoints)
//! 2. Add standalone nodes that were not already created
//!
//! Keeping the passes in this order fixes node insertion order, which in
//! turn fixes the order trees are discovered in.

use crate::edge::Edge;
use crate::graph::{DependencyGraph, NodeLabel};

/// Builds a DependencyGraph from edges and standalone nodes.
#[derive(Debug, Clone)]
pub struct GraphBuilder<N: NodeLabel> {
    edges: Vec<(N, N)>,
    nodes: Vec<N>,
}

impl<N: NodeLabel> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeLabel> GraphBuilder<N> {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Queues one `parent → child` dependency.
    pub fn edge(mut self, parent: N, child: N) -> Self {
        self.edges.push((parent, child));
        self
    }

    /// Queues many dependencies. Accepts pairs or `Edge` values.
    pub fn edges<I, E>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<N>>,
    {
        for edge in edges {
            let edge: Edge<N> = edge.into();
            self.edges.push(edge.into_pair());
        }
        self
    }

    /// Queues a node that may have no dependencies at all.
    pub fn node(mut self, node: N) -> Self {
        self.nodes.push(node);
        self
    }

    /// Queues many standalone nodes.
    pub fn nodes<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        self.nodes.extend(nodes);
        self
    }

    /// Finishes building and returns the graph.
    pub fn build(self) -> DependencyGraph<N> {
        DependencyGraph::from_parts(self.edges, self.nodes)
    }
}

impl<N: NodeLabel> From<&DependencyGraph<N>> for GraphBuilder<N> {
    /// Seeds a builder with an existing graph's contents, to extend a copy.
    fn from(graph: &DependencyGraph<N>) -> Self {
        Self::new()
            .edges(graph.edges())
            .nodes(graph.nodes().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_adds_edges_then_nodes() {
        let graph = GraphBuilder::new()
            .node("isolated")
            .edge("a", "b")
            .edges(vec![("b", "c")])
            .build();

        let nodes: Vec<&str> = graph.nodes().copied().collect();
        assert_eq!(nodes, vec!["a", "b", "c", "isolated"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_builder_accepts_edge_values() {
        let graph = GraphBuilder::<u32>::new()
            .edges(vec![Edge::new(1, 2), Edge::new(2, 3)])
            .nodes(vec![3, 4])
            .build();

        assert_eq!(graph.node_count(), 4);
        assert!(graph.has_edge(&2, &3));
    }

    #[test]
    fn test_builder_from_graph_extends_a_copy() {
        let base = DependencyGraph::from_parts(vec![(1, 2)], vec![9]);
        let extended = GraphBuilder::from(&base).edge(2, 3).build();

        assert_eq!(base.edge_count(), 1);
        assert_eq!(extended.edge_count(), 2);
        assert_eq!(extended.nodes().copied().collect::<Vec<_>>(), vec![1, 2, 3, 9]);
    }
}
