//! Dependency plan building.
//!
//! One record per weakly connected component: the component's order-zero
//! node and how many items fan out directly from it.

use crate::components::Components;
use crate::depth::DepthMap;
use crate::error::GraphError;
use crate::graph::{DependencyGraph, NodeLabel};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Summary of one dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord<N> {
    /// The tree's order-zero node.
    pub node: N,
    /// Depth of `node`; always 0 for a retained record.
    pub order: i64,
    /// Number of direct successors of `node`.
    pub child: usize,
}

/// A plan record together with the execution layers below its node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePlan<N> {
    #[serde(flatten)]
    pub record: PlanRecord<N>,
    /// `levels[d]` holds every item `d` hops below the record's node.
    pub levels: Vec<Vec<N>>,
}

impl<N: NodeLabel> DependencyGraph<N> {
    /// Reduces a depth table to a plan record.
    ///
    /// The last entry with depth exactly 0 wins; earlier order-zero entries
    /// are dropped. Returns `None` when no entry sits at depth 0.
    ///
    /// # Errors
    /// `NodeNotFound` if the selected node is not part of this graph.
    pub fn build_plan_record(
        &self,
        depths: &DepthMap<N>,
    ) -> Result<Option<PlanRecord<N>>, GraphError> {
        let Some((node, order)) = depths.iter().filter(|(_, depth)| *depth == 0).last() else {
            return Ok(None);
        };

        let index = self.require(node)?;
        let child = self.graph.neighbors_directed(index, Direction::Outgoing).count();

        Ok(Some(PlanRecord {
            node: node.clone(),
            order,
            child,
        }))
    }

    /// Computes one plan record per dependency tree, in discovery order.
    ///
    /// Trees whose depth table has no order-zero entry are left out, so the
    /// result can be shorter than `tree_count()`.
    ///
    /// # Errors
    /// `CycleDetected` if the graph is not acyclic.
    pub fn compute_plan(&self) -> Result<Vec<PlanRecord<N>>, GraphError> {
        Ok(self
            .tree_plans()?
            .into_iter()
            .map(|tree| tree.record)
            .collect())
    }

    /// Like `compute_plan`, with each tree's execution layers attached.
    pub fn tree_plans(&self) -> Result<Vec<TreePlan<N>>, GraphError> {
        self.ensure_acyclic()?;

        let mut plans = Vec::new();
        for (tree, members) in Components::new(self).enumerate() {
            let depths = self.depths_from_seeds(&members);
            match self.build_plan_record(&depths)? {
                Some(record) => {
                    debug!(tree, node = ?record.node, child = record.child, "tree planned");
                    plans.push(TreePlan {
                        record,
                        levels: depths.levels(),
                    });
                }
                None => warn!(tree, size = members.len(), "tree has no order-zero node"),
            }
        }

        info!(trees = plans.len(), nodes = self.node_count(), "dependency plan computed");
        Ok(plans)
    }

    /// Execution layers below `root`: layer `d` holds the items at
    /// breadth-first distance `d`.
    pub fn execution_levels(&self, root: &N) -> Result<Vec<Vec<N>>, GraphError> {
        Ok(self.bfs_depths(root)?.levels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ladder_graph, numbered_graph, report, report_graph, reports};

    #[test]
    fn test_report_plan() {
        let graph = report_graph();
        let plan = graph.compute_plan().unwrap();

        let expected = vec![
            PlanRecord {
                node: report(1),
                order: 0,
                child: 2,
            },
            PlanRecord {
                node: report(2),
                order: 0,
                child: 1,
            },
            PlanRecord {
                node: report(11),
                order: 0,
                child: 0,
            },
        ];
        assert_eq!(plan, expected);
    }

    #[test]
    fn test_plan_with_numbered_labels() {
        let graph = numbered_graph();
        let plan = graph.compute_plan().unwrap();

        let summary: Vec<(u32, usize)> = plan.iter().map(|r| (r.node, r.child)).collect();
        assert_eq!(summary, vec![(1, 2), (2, 1), (11, 0)]);
        assert!(plan.iter().all(|r| r.order == 0));
    }

    #[test]
    fn test_last_order_zero_entry_wins() {
        // Two order-zero entries: only the later one survives.
        let graph = numbered_graph();
        let depths: DepthMap<u32> = vec![(1, 0), (5, 1), (2, 0), (4, 1)].into_iter().collect();

        let record = graph.build_plan_record(&depths).unwrap().unwrap();
        assert_eq!(record.node, 2);
        assert_eq!(record.child, 1);
    }

    #[test]
    fn test_no_order_zero_entry_gives_no_record() {
        let graph = numbered_graph();
        let depths: DepthMap<u32> = vec![(5, -1), (8, 1)].into_iter().collect();

        assert_eq!(graph.build_plan_record(&depths).unwrap(), None);
        assert_eq!(graph.build_plan_record(&DepthMap::new()).unwrap(), None);
    }

    #[test]
    fn test_record_for_unknown_node_is_an_error() {
        let graph = numbered_graph();
        let depths: DepthMap<u32> = vec![(77, 0)].into_iter().collect();

        assert!(graph.build_plan_record(&depths).is_err());
    }

    #[test]
    fn test_tree_plans_carry_levels() {
        let graph = report_graph();
        let trees = graph.tree_plans().unwrap();

        assert_eq!(trees.len(), 3);
        assert_eq!(
            trees[0].levels,
            vec![reports(&[1]), reports(&[5, 3]), reports(&[8]), reports(&[10])]
        );
        assert_eq!(
            trees[1].levels,
            vec![reports(&[2]), reports(&[4]), reports(&[6]), reports(&[7]), reports(&[9])]
        );
        assert_eq!(trees[2].levels, vec![reports(&[11])]);
    }

    #[test]
    fn test_execution_levels_from_inner_node() {
        let graph = numbered_graph();
        let levels = graph.execution_levels(&5).unwrap();

        assert_eq!(levels, vec![vec![5], vec![8], vec![10, 3]]);
        assert!(graph.execution_levels(&99).is_err());
    }

    #[test]
    fn test_cyclic_graph_has_no_plan() {
        let graph = DependencyGraph::from_parts(vec![(1, 2), (2, 1)], vec![3]);
        assert!(matches!(
            graph.compute_plan(),
            Err(GraphError::CycleDetected(_))
        ));
    }

    #[test]
    fn test_deep_layered_graph_is_planned() {
        let graph = ladder_graph(40);
        let plan = graph.compute_plan().unwrap();

        assert_eq!(plan.len(), 1);
        assert!(plan[0].node == 0 || plan[0].node == 1);
        assert_eq!(plan[0].order, 0);
        assert_eq!(plan[0].child, 2);
    }

    #[test]
    fn test_record_serializes_as_flat_object() {
        let graph = report_graph();
        let trees = graph.tree_plans().unwrap();
        let value = serde_json::to_value(&trees[2]).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "node": "Report 11",
                "order": 0,
                "child": 0,
                "levels": [["Report 11"]]
            })
        );
    }
}
