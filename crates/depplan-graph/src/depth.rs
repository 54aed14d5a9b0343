//! Dependency depth calculation.
//!
//! A component's depth table is the unweighted breadth-first distance from
//! one canonical source. The source is picked by a predecessor expansion:
//! every member is seeded onto a work list, each processed node pushes all
//! of its predecessors, and each processed node's distance table replaces
//! the previous one. Whatever is processed last wins.
//!
//! The last node processed never has predecessors (they would have been
//! pushed after it), so on acyclic input the source is always a root.
//!
//! The work list itself can hold one entry per backward path, which grows
//! exponentially on layered graphs. It drains one generation at a time, so
//! the expansion is replayed generation by generation over distinct nodes.

use crate::error::GraphError;
use crate::graph::{DependencyGraph, NodeId, NodeLabel};
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

/// Insertion-ordered mapping from node to integer depth.
///
/// Re-inserting a node overwrites its depth but keeps its position.
#[derive(Debug, Clone)]
pub struct DepthMap<N: NodeLabel> {
    entries: Vec<(N, i64)>,
    positions: HashMap<N, usize>,
}

impl<N: NodeLabel> Default for DepthMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeLabel> DepthMap<N> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Records a depth, overwriting any earlier value for the node.
    pub fn insert(&mut self, node: N, depth: i64) {
        match self.positions.get(&node) {
            Some(&pos) => self.entries[pos].1 = depth,
            None => {
                self.positions.insert(node.clone(), self.entries.len());
                self.entries.push((node, depth));
            }
        }
    }

    /// Gets the depth recorded for a node.
    pub fn get(&self, node: &N) -> Option<i64> {
        self.positions.get(node).map(|&pos| self.entries[pos].1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, i64)> {
        self.entries.iter().map(|(node, depth)| (node, *depth))
    }

    /// Number of nodes with a recorded depth.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no depth has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups nodes by depth: `levels[d]` holds every node at depth `d`.
    ///
    /// Negative depths have no layer and are skipped.
    pub fn levels(&self) -> Vec<Vec<N>> {
        let mut levels: Vec<Vec<N>> = Vec::new();
        for (node, depth) in self.iter() {
            let Ok(layer) = usize::try_from(depth) else {
                continue;
            };
            if levels.len() <= layer {
                levels.resize_with(layer + 1, Vec::new);
            }
            levels[layer].push(node.clone());
        }
        levels
    }
}

impl<N: NodeLabel> FromIterator<(N, i64)> for DepthMap<N> {
    fn from_iter<I: IntoIterator<Item = (N, i64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (node, depth) in iter {
            map.insert(node, depth);
        }
        map
    }
}

impl<N: NodeLabel> DependencyGraph<N> {
    /// Computes the depth table for one component.
    ///
    /// # Errors
    /// `NodeNotFound` if a member is not in the graph, `CycleDetected` if the
    /// graph has a directed cycle (the predecessor expansion would not end).
    pub fn node_dependency_depths(&self, component: &[N]) -> Result<DepthMap<N>, GraphError> {
        let seeds = component
            .iter()
            .map(|node| self.require(node))
            .collect::<Result<Vec<_>, _>>()?;
        self.ensure_acyclic()?;
        Ok(self.depths_from_seeds(&seeds))
    }

    /// Unweighted shortest-path distances from `source` along successor edges.
    pub fn bfs_depths(&self, source: &N) -> Result<DepthMap<N>, GraphError> {
        let start = self.require(source)?;
        Ok(self.distances_from(start))
    }

    /// Fails with the first offending node if the graph is not a DAG.
    pub(crate) fn ensure_acyclic(&self) -> Result<(), GraphError> {
        petgraph::algo::toposort(&self.graph, None)
            .map(|_| ())
            .map_err(|cycle| {
                let node = self.label(cycle.node_id());
                warn!(node = ?node, "dependency cycle detected");
                GraphError::cycle_at(node)
            })
    }

    /// Runs the predecessor expansion. Callers must have checked for cycles.
    pub(crate) fn depths_from_seeds(&self, seeds: &[NodeId]) -> DepthMap<N> {
        match self.last_expanded(seeds) {
            Some((source, generations)) => {
                debug!(
                    source = ?self.label(source),
                    generations,
                    "depth source selected"
                );
                self.distances_from(source)
            }
            None => DepthMap::new(),
        }
    }

    /// Finds the node the predecessor work list pops last, and how many
    /// generations it drains.
    ///
    /// Generation `k + 1` is the concatenation of the predecessor lists of
    /// generation `k`'s entries, in queue order. Its tail comes from the
    /// latest entry of generation `k` that has predecessors, so each
    /// generation only needs its distinct nodes ranked by last occurrence.
    fn last_expanded(&self, seeds: &[NodeId]) -> Option<(NodeId, usize)> {
        let mut seed_rank: HashMap<NodeId, usize> = HashMap::new();
        for (position, &seed) in seeds.iter().enumerate() {
            seed_rank.insert(seed, position);
        }
        let mut generation = ranked(seed_rank);
        let mut last = None;
        let mut generations = 0usize;

        while let Some(&tail) = generation.last() {
            last = Some(tail);
            generations += 1;
            generation = self.next_generation(&generation);
        }

        last.map(|source| (source, generations))
    }

    fn next_generation(&self, generation: &[NodeId]) -> Vec<NodeId> {
        let mut keys: HashMap<NodeId, (usize, usize)> = HashMap::new();
        for (rank, &node) in generation.iter().enumerate() {
            for (slot, pred) in self.adjacent(node, Direction::Incoming).into_iter().enumerate() {
                // ranks only grow, so a later pusher always replaces the key
                keys.insert(pred, (rank, slot));
            }
        }
        ranked(keys)
    }

    fn distances_from(&self, start: NodeId) -> DepthMap<N> {
        let mut depths = DepthMap::new();
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::from([(start, 0i64)]);
        visited[start.index()] = true;

        while let Some((current, depth)) = queue.pop_front() {
            depths.insert(self.label(current).clone(), depth);
            for next in self.adjacent(current, Direction::Outgoing) {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back((next, depth + 1));
                }
            }
        }

        depths
    }
}

/// Distinct nodes sorted by their last-occurrence key.
fn ranked<K: Ord>(keys: HashMap<NodeId, K>) -> Vec<NodeId> {
    let mut entries: Vec<(K, NodeId)> = keys.into_iter().map(|(node, key)| (key, node)).collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().map(|(_, node)| node).collect()
}
