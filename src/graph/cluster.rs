use std::collections::{BTreeMap, HashMap};

use crate::error::PipelineError;

use super::model::{Node, NodeId};

pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Aggregate nodes into a coarse grid for far-zoom display. Every input node
/// lands in exactly one cell; each occupied cell becomes a single cluster
/// node whose members are recorded by id for later expansion. Single-member
/// cells still become clusters. No edges are emitted for a clustering pass.
pub fn cluster_nodes(nodes: &[Node], grid_size: f64) -> Vec<Node> {
    let mut cells: BTreeMap<(i64, i64), CellAccumulator<'_>> = BTreeMap::new();

    for node in nodes {
        let gx = (node.x / grid_size).floor() as i64;
        let gy = (node.y / grid_size).floor() as i64;
        let cell = cells.entry((gx, gy)).or_default();
        cell.members.push(node.id.clone());
        // Last member wins; the cluster color is not required to be
        // representative.
        cell.color = node.color.as_deref().or(cell.color);
    }

    cells
        .into_iter()
        .map(|((gx, gy), cell)| {
            let count = cell.members.len();
            Node {
                id: NodeId::Text(format!("{gx},{gy}")),
                x: (gx as f64 + 0.5) * grid_size,
                y: (gy as f64 + 0.5) * grid_size,
                size: (count as f64).sqrt() * 5.0,
                color: cell.color.map(str::to_string),
                label: Some(format!("Cluster ({count})")),
                is_cluster: true,
                members: Some(cell.members),
            }
        })
        .collect()
}

/// Resolve a cluster back into its member nodes via the immutable raw
/// snapshot. Every member is resolved before anything is returned, so a
/// missing member leaves the caller's state untouched.
pub fn expand_cluster(
    cluster: &Node,
    lookup: &HashMap<NodeId, Node>,
) -> Result<Vec<Node>, PipelineError> {
    if !cluster.is_cluster {
        return Err(PipelineError::NotACluster(cluster.id.clone()));
    }

    let member_ids = cluster.members.as_deref().unwrap_or_default();
    let mut members = Vec::with_capacity(member_ids.len());
    for id in member_ids {
        let node = lookup
            .get(id)
            .ok_or_else(|| PipelineError::MissingMember(id.clone()))?;
        members.push(node.clone());
    }

    Ok(members)
}

#[derive(Default)]
struct CellAccumulator<'a> {
    members: Vec<NodeId>,
    color: Option<&'a str>,
}
