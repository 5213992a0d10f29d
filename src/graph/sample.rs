use std::collections::HashSet;

use rand::Rng;
use rand::seq::index;

use super::model::{Edge, Node, NodeId, SampleSettings};

/// Reduce an oversized node set to the configured budget.
///
/// Nodes are ranked by display size as the importance proxy (ties keep input
/// order); the top `nodeLimit * importantNodesPercent / 100` survive
/// unconditionally and the remainder of the budget is drawn uniformly
/// without replacement from the rest. Sets at or under the limit pass
/// through unchanged.
pub fn sample_nodes<R: Rng>(
    nodes: Vec<Node>,
    settings: &SampleSettings,
    rng: &mut R,
) -> Vec<Node> {
    let settings = settings.sanitized();
    let limit = settings.node_limit;

    if nodes.len() <= limit {
        return nodes;
    }

    let mut ranked = nodes;
    ranked.sort_by(|a, b| b.size.total_cmp(&a.size));

    let important_count = limit * settings.important_nodes_percent as usize / 100;
    let important_count = important_count.min(limit);
    let mut rest = ranked.split_off(important_count);

    let draw_count = (limit - important_count).min(rest.len());
    let mut picked = index::sample(rng, rest.len(), draw_count).into_vec();
    // Removing in descending index order keeps earlier indices stable under
    // swap_remove.
    picked.sort_unstable_by(|a, b| b.cmp(a));
    for pick in picked {
        ranked.push(rest.swap_remove(pick));
    }

    log::debug!(
        "sampled {} of {} nodes ({} important, {} random)",
        ranked.len(),
        ranked.len() + rest.len(),
        important_count,
        draw_count
    );
    ranked
}

/// Reduce an edge set to the configured budget, restricted to edges whose
/// endpoints both survived node sampling. When truncating, the heaviest
/// edges are kept.
pub fn sample_edges(edges: &[Edge], sampled_nodes: &[Node], edge_limit: usize) -> Vec<Edge> {
    let sampled_ids: HashSet<&NodeId> = sampled_nodes.iter().map(|node| &node.id).collect();

    let mut valid = edges
        .iter()
        .filter(|edge| sampled_ids.contains(&edge.source) && sampled_ids.contains(&edge.target))
        .cloned()
        .collect::<Vec<_>>();

    if valid.len() <= edge_limit {
        return valid;
    }

    valid.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    valid.truncate(edge_limit);
    valid
}
