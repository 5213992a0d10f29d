use std::collections::HashSet;

use super::model::{DEFAULT_NODE_SIZE, Edge, Node, NodeId};

/// Keep only nodes with finite coordinates, returning the number discarded.
/// Non-finite or non-positive sizes are reset to the default so downstream
/// ranking and clustering can rely on them.
pub fn validate_nodes(nodes: Vec<Node>) -> (Vec<Node>, usize) {
    let total = nodes.len();
    let valid = nodes
        .into_iter()
        .filter_map(|mut node| {
            if !node.x.is_finite() || !node.y.is_finite() {
                return None;
            }
            if !node.size.is_finite() || node.size <= 0.0 {
                node.size = DEFAULT_NODE_SIZE;
            }
            Some(node)
        })
        .collect::<Vec<_>>();

    let dropped = total - valid.len();
    if dropped > 0 {
        log::debug!("validation dropped {dropped} of {total} nodes");
    }
    (valid, dropped)
}

/// Keep only edges whose endpoints are both present in the given id set.
/// Dangling edges are dropped, not errored.
pub fn validate_edges(edges: Vec<Edge>, known_ids: &HashSet<NodeId>) -> Vec<Edge> {
    edges
        .into_iter()
        .filter(|edge| known_ids.contains(&edge.source) && known_ids.contains(&edge.target))
        .collect()
}
