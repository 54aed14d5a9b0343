//! Edge type for the dependency graph.
//!
//! The graph itself stores unit edge weights; this type only exists at the
//! API boundary, for edge listings and snapshots.

use serde::{Deserialize, Serialize};

/// A directed dependency: `parent` must be processed before `child`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<N> {
    pub parent: N,
    pub child: N,
}

impl<N> Edge<N> {
    /// Creates a new edge.
    pub fn new(parent: N, child: N) -> Self {
        Self { parent, child }
    }

    /// Splits the edge back into a `(parent, child)` pair.
    pub fn into_pair(self) -> (N, N) {
        (self.parent, self.child)
    }
}

impl<N> From<(N, N)> for Edge<N> {
    fn from((parent, child): (N, N)) -> Self {
        Self::new(parent, child)
    }
}
