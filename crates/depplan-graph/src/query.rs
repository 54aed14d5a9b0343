//! Structural queries over the dependency graph.
//!
//! Everything here is read-only. Single-node queries fail with
//! `NodeNotFound` for labels outside the graph; the reachability checks
//! answer `false` instead.

use crate::edge::Edge;
use crate::error::GraphError;
use crate::graph::{DependencyGraph, NodeId, NodeLabel};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Graph statistics for the status command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub tree_count: usize,
    pub root_count: usize,
    pub leaf_count: usize,
}

impl<N: NodeLabel> DependencyGraph<N> {
    /// Items that directly depend on `node`.
    pub fn successors(&self, node: &N) -> Result<HashSet<N>, GraphError> {
        self.adjacent_set(node, Direction::Outgoing)
    }

    /// Items `node` directly depends on.
    pub fn predecessors(&self, node: &N) -> Result<HashSet<N>, GraphError> {
        self.adjacent_set(node, Direction::Incoming)
    }

    /// Union of the successors of each direct successor.
    pub fn successors_of_successors(&self, node: &N) -> Result<HashSet<N>, GraphError> {
        self.two_hops(node, Direction::Outgoing)
    }

    /// Union of the predecessors of each direct predecessor.
    pub fn predecessors_of_predecessors(&self, node: &N) -> Result<HashSet<N>, GraphError> {
        self.two_hops(node, Direction::Incoming)
    }

    /// True if `candidate` can be reached from `node` by following one or
    /// more successor edges.
    pub fn has_successor(&self, node: &N, candidate: &N) -> bool {
        self.reaches(node, candidate, Direction::Outgoing)
    }

    /// True if `node` can be reached from `candidate` by following one or
    /// more successor edges.
    pub fn has_predecessor(&self, node: &N, candidate: &N) -> bool {
        self.reaches(node, candidate, Direction::Incoming)
    }

    /// True if the graph holds the literal edge `parent → child`.
    pub fn has_edge(&self, parent: &N, child: &N) -> bool {
        match (self.get_index(parent), self.get_index(child)) {
            (Some(from), Some(to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Total degree (in + out) of one node.
    pub fn degree(&self, node: &N) -> Result<usize, GraphError> {
        let index = self.require(node)?;
        Ok(self.degree_of(index))
    }

    /// Total degree of every node, in insertion order.
    pub fn degrees(&self) -> Vec<(N, usize)> {
        self.graph
            .node_indices()
            .map(|idx| (self.label(idx).clone(), self.degree_of(idx)))
            .collect()
    }

    /// Number of edges ending at `node`.
    pub fn in_degree(&self, node: &N) -> Result<usize, GraphError> {
        let index = self.require(node)?;
        Ok(self.count_directed(index, Direction::Incoming))
    }

    /// Number of edges leaving `node`.
    pub fn out_degree(&self, node: &N) -> Result<usize, GraphError> {
        let index = self.require(node)?;
        Ok(self.count_directed(index, Direction::Outgoing))
    }

    /// Every stored edge as a `(parent, child)` pair, in insertion order.
    pub fn edges(&self) -> Vec<Edge<N>> {
        self.graph
            .edge_references()
            .map(|edge_ref| {
                Edge::new(
                    self.label(edge_ref.source()).clone(),
                    self.label(edge_ref.target()).clone(),
                )
            })
            .collect()
    }

    /// Out-edge targets of `node`, in edge insertion order.
    pub fn neighbors(&self, node: &N) -> Result<Vec<N>, GraphError> {
        let index = self.require(node)?;
        Ok(self.labels(&self.adjacent(index, Direction::Outgoing)))
    }

    /// Successors followed by predecessors. A node on both sides appears twice.
    pub fn connected_nodes(&self, node: &N) -> Result<Vec<N>, GraphError> {
        let index = self.require(node)?;
        let mut connected = self.labels(&self.adjacent(index, Direction::Outgoing));
        connected.extend(self.labels(&self.adjacent(index, Direction::Incoming)));
        Ok(connected)
    }

    /// Follows the first predecessor until a node without predecessors.
    ///
    /// # Errors
    /// `CycleDetected` if the walk comes back to a node it already passed.
    pub fn find_root_node(&self, node: &N) -> Result<N, GraphError> {
        self.walk_to_end(node, Direction::Incoming)
    }

    /// Follows the first successor until a node without successors.
    pub fn find_leaf_node(&self, node: &N) -> Result<N, GraphError> {
        self.walk_to_end(node, Direction::Outgoing)
    }

    /// Every node without predecessors, in insertion order.
    pub fn roots(&self) -> Vec<N> {
        self.without_neighbors(Direction::Incoming)
    }

    /// Every node without successors, in insertion order.
    pub fn leaves(&self) -> Vec<N> {
        self.without_neighbors(Direction::Outgoing)
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            tree_count: self.tree_count(),
            root_count: self.roots().len(),
            leaf_count: self.leaves().len(),
        }
    }

    fn adjacent_set(&self, node: &N, direction: Direction) -> Result<HashSet<N>, GraphError> {
        let index = self.require(node)?;
        Ok(self
            .graph
            .neighbors_directed(index, direction)
            .map(|idx| self.label(idx).clone())
            .collect())
    }

    fn two_hops(&self, node: &N, direction: Direction) -> Result<HashSet<N>, GraphError> {
        let index = self.require(node)?;
        Ok(self
            .graph
            .neighbors_directed(index, direction)
            .flat_map(|hop| self.graph.neighbors_directed(hop, direction))
            .map(|idx| self.label(idx).clone())
            .collect())
    }

    fn reaches(&self, node: &N, candidate: &N, direction: Direction) -> bool {
        let (Some(start), Some(target)) = (self.get_index(node), self.get_index(candidate)) else {
            return false;
        };

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<NodeId> = self.graph.neighbors_directed(start, direction).collect();

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if visited.insert(current) {
                stack.extend(self.graph.neighbors_directed(current, direction));
            }
        }

        false
    }

    fn degree_of(&self, index: NodeId) -> usize {
        self.count_directed(index, Direction::Incoming)
            + self.count_directed(index, Direction::Outgoing)
    }

    fn count_directed(&self, index: NodeId, direction: Direction) -> usize {
        self.graph.edges_directed(index, direction).count()
    }

    fn walk_to_end(&self, node: &N, direction: Direction) -> Result<N, GraphError> {
        let mut current = self.require(node)?;
        let mut visited: HashSet<NodeId> = HashSet::new();

        while let Some(&next) = self.adjacent(current, direction).first() {
            if !visited.insert(current) {
                return Err(GraphError::cycle_at(self.label(current)));
            }
            current = next;
        }

        Ok(self.label(current).clone())
    }

    fn without_neighbors(&self, direction: Direction) -> Vec<N> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_directed(idx, direction).next().is_none())
            .map(|idx| self.label(idx).clone())
            .collect()
    }
}
