use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use crate::error::PipelineError;

use super::model::{Edge, GraphSnapshot, Node};

/// Load a `{nodes: [...], edges: [...]}` JSON file into a raw snapshot.
/// Individual records that fail to decode are counted and skipped rather
/// than failing the whole file; an empty or structurally invalid file is an
/// input error.
pub fn load_graph(path: &Path) -> Result<GraphSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;

    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let snapshot = decode_graph_value(&parsed)?;
    if snapshot.is_empty() {
        return Err(PipelineError::Input(format!(
            "no usable nodes were found in {}",
            path.display()
        ))
        .into());
    }

    Ok(snapshot)
}

pub fn decode_graph_value(value: &Value) -> Result<GraphSnapshot> {
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("graph data must be a JSON object"))?;

    let raw_nodes = object
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("graph data has no nodes array"))?;
    let raw_edges = object
        .get("edges")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    let mut dropped_nodes = 0usize;
    for entry in raw_nodes {
        match Node::deserialize(entry) {
            Ok(node) => nodes.push(node),
            Err(_) => dropped_nodes += 1,
        }
    }

    let mut edges = Vec::with_capacity(raw_edges.len());
    let mut dropped_edges = 0usize;
    for entry in raw_edges {
        match Edge::deserialize(entry) {
            Ok(edge) => edges.push(edge),
            Err(_) => dropped_edges += 1,
        }
    }

    if dropped_nodes > 0 || dropped_edges > 0 {
        log::warn!(
            "skipped {dropped_nodes} malformed node records and {dropped_edges} malformed edge records"
        );
    }

    Ok(GraphSnapshot::new(nodes, edges))
}
