//! Weakly connected components ("trees").
//!
//! Edge direction is ignored when grouping nodes. Components are yielded
//! lazily, in the insertion order of the first node seen in each one, and
//! members are listed in breadth-first discovery order from that node.

use crate::graph::{DependencyGraph, NodeId, NodeLabel};
use petgraph::Direction;
use std::collections::{HashSet, VecDeque};

/// Lazy iterator over the weakly connected components of a graph.
///
/// Yields node indexes; `DependencyGraph::weakly_connected_components`
/// maps them to labels.
pub(crate) struct Components<'a, N: NodeLabel> {
    graph: &'a DependencyGraph<N>,
    seen: HashSet<NodeId>,
    cursor: usize,
}

impl<'a, N: NodeLabel> Components<'a, N> {
    pub(crate) fn new(graph: &'a DependencyGraph<N>) -> Self {
        Self {
            graph,
            seen: HashSet::new(),
            cursor: 0,
        }
    }

    fn collect_from(&mut self, start: NodeId) -> Vec<NodeId> {
        let mut members = Vec::new();
        let mut queue = VecDeque::from([start]);
        self.seen.insert(start);

        while let Some(current) = queue.pop_front() {
            members.push(current);

            let outgoing = self.graph.adjacent(current, Direction::Outgoing);
            let incoming = self.graph.adjacent(current, Direction::Incoming);
            for neighbor in outgoing.into_iter().chain(incoming) {
                if self.seen.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        members
    }
}

impl<N: NodeLabel> Iterator for Components<'_, N> {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.graph.node_count() {
            let start = NodeId::new(self.cursor);
            self.cursor += 1;
            if !self.seen.contains(&start) {
                return Some(self.collect_from(start));
            }
        }
        None
    }
}

impl<N: NodeLabel> DependencyGraph<N> {
    /// Partitions the nodes into weakly connected components.
    ///
    /// Every call starts fresh from the current graph state. The sequence
    /// is deterministic for a given insertion history.
    pub fn weakly_connected_components(&self) -> impl Iterator<Item = Vec<N>> + '_ {
        Components::new(self).map(move |members| self.labels(&members))
    }

    /// Returns the number of independent dependency trees.
    pub fn tree_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }
}
