//! Shared fixtures for unit tests.

use crate::graph::DependencyGraph;

/// The reference report graph: two dependency trees plus one isolate.
///
/// ```text
/// 1 → 5 → 8 → 10      2 → 4 → 6 → 7 → 9      11
/// 1 → 3 ← 8
/// ```
pub(crate) const REPORT_EDGES: [(u32, u32); 9] = [
    (1, 5),
    (1, 3),
    (2, 4),
    (4, 6),
    (6, 7),
    (7, 9),
    (8, 10),
    (5, 8),
    (8, 3),
];

pub(crate) fn report(n: u32) -> String {
    format!("Report {}", n)
}

pub(crate) fn reports(ns: &[u32]) -> Vec<String> {
    ns.iter().map(|&n| report(n)).collect()
}

/// Report graph with string labels and the full node list `Report 1..=11`.
pub(crate) fn report_graph() -> DependencyGraph<String> {
    let edges = REPORT_EDGES.iter().map(|&(a, b)| (report(a), report(b)));
    let nodes = (1..=11).map(report);
    DependencyGraph::from_parts(edges, nodes)
}

/// Same topology with integer labels and only the isolate listed.
pub(crate) fn numbered_graph() -> DependencyGraph<u32> {
    DependencyGraph::from_parts(REPORT_EDGES, [11])
}

/// `layers` layers of two nodes each; both nodes of a layer feed both nodes
/// of the next. Layer `l` holds `2l` and `2l + 1`, so `0` and `1` are roots.
pub(crate) fn ladder_graph(layers: u32) -> DependencyGraph<u32> {
    let edges = (1..layers).flat_map(|layer| {
        let (above, below) = (2 * (layer - 1), 2 * layer);
        [
            (above, below),
            (above, below + 1),
            (above + 1, below),
            (above + 1, below + 1),
        ]
    });
    DependencyGraph::from_parts(edges, Vec::<u32>::new())
}
