use thiserror::Error;

use crate::graph::NodeId;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid graph input: {0}")]
    Input(String),

    #[error("background worker unavailable: {0}")]
    Transport(String),

    #[error("cluster member {0} is missing from the raw snapshot")]
    MissingMember(NodeId),

    #[error("node {0} is not a cluster")]
    NotACluster(NodeId),
}
