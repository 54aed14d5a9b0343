//! Error types for graph queries and plan computation.

use std::fmt::Debug;
use thiserror::Error;

/// Failures surfaced by graph queries.
///
/// Labels are rendered with `Debug` so the error stays independent of the
/// node label type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Cycle detected at node {0}")]
    CycleDetected(String),
}

impl GraphError {
    pub(crate) fn node_not_found<N: Debug>(node: &N) -> Self {
        Self::NodeNotFound(format!("{:?}", node))
    }

    pub(crate) fn cycle_at<N: Debug>(node: &N) -> Self {
        Self::CycleDetected(format!("{:?}", node))
    }
}
