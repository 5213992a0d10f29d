mod cluster;
mod load;
mod model;
mod sample;
mod validate;

pub use cluster::{DEFAULT_GRID_SIZE, cluster_nodes, expand_cluster};
pub use load::{decode_graph_value, load_graph};
pub use model::{
    DEFAULT_EDGE_LIMIT, DEFAULT_IMPORTANT_PERCENT, DEFAULT_NODE_LIMIT, DEFAULT_NODE_SIZE, Edge,
    GraphSnapshot, Node, NodeId, SampleSettings,
};
pub use sample::{sample_edges, sample_nodes};
pub use validate::{validate_edges, validate_nodes};
