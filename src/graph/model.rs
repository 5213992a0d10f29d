use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_SIZE: f64 = 5.0;
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;
pub const DEFAULT_EDGE_SIZE: f64 = 1.0;

pub const DEFAULT_NODE_LIMIT: usize = 10_000;
pub const DEFAULT_EDGE_LIMIT: usize = 10_000;
pub const DEFAULT_IMPORTANT_PERCENT: u32 = 20;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_node_size")]
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "isCluster", skip_serializing_if = "is_false")]
    pub is_cluster: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<NodeId>>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            size: DEFAULT_NODE_SIZE,
            color: None,
            label: None,
            is_cluster: false,
            members: None,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn member_count(&self) -> usize {
        self.members.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default = "default_edge_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_edge_size")]
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: DEFAULT_EDGE_WEIGHT,
            color: None,
            size: DEFAULT_EDGE_SIZE,
            label: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }
}

/// The complete node+edge set handed to the renderer. Snapshots are replaced
/// wholesale on every sampling/clustering pass, never patched incrementally.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_by_id(&self) -> HashMap<NodeId, Node> {
        self.nodes
            .iter()
            .map(|node| (node.id.clone(), node.clone()))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleSettings {
    pub node_limit: usize,
    pub edge_limit: usize,
    pub important_nodes_percent: u32,
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            node_limit: DEFAULT_NODE_LIMIT,
            edge_limit: DEFAULT_EDGE_LIMIT,
            important_nodes_percent: DEFAULT_IMPORTANT_PERCENT,
        }
    }
}

impl SampleSettings {
    /// Clamp user-supplied values to the ranges exposed by the configuration
    /// surface before they reach the sampler.
    pub fn clamped(self) -> Self {
        Self {
            node_limit: self.node_limit.clamp(100, 10_000),
            edge_limit: self.edge_limit.clamp(100, 20_000),
            important_nodes_percent: self.important_nodes_percent.clamp(1, 100),
        }
    }

    /// Recover from out-of-range values the sampler cannot work with. Invalid
    /// settings are replaced by the defaults rather than failing the pipeline.
    pub fn sanitized(self) -> Self {
        if self.node_limit == 0 || self.important_nodes_percent > 100 {
            log::warn!(
                "invalid sampling settings (nodeLimit={}, importantNodesPercent={}), using defaults",
                self.node_limit,
                self.important_nodes_percent
            );
            return Self {
                node_limit: DEFAULT_NODE_LIMIT,
                edge_limit: if self.edge_limit == 0 {
                    DEFAULT_EDGE_LIMIT
                } else {
                    self.edge_limit
                },
                important_nodes_percent: DEFAULT_IMPORTANT_PERCENT,
            };
        }

        if self.edge_limit == 0 {
            return Self {
                edge_limit: DEFAULT_EDGE_LIMIT,
                ..self
            };
        }

        self
    }
}

fn default_node_size() -> f64 {
    DEFAULT_NODE_SIZE
}

fn default_edge_weight() -> f64 {
    DEFAULT_EDGE_WEIGHT
}

fn default_edge_size() -> f64 {
    DEFAULT_EDGE_SIZE
}

fn is_false(value: &bool) -> bool {
    !*value
}
