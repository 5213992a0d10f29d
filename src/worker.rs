use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use rand::thread_rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PipelineError;
use crate::graph::{
    DEFAULT_GRID_SIZE, Edge, Node, SampleSettings, cluster_nodes, sample_edges, sample_nodes,
    validate_nodes,
};

pub const MSG_UNKNOWN_TYPE: &str = "Unknown message type";
pub const MSG_INVALID_DATA: &str = "Invalid data format";
pub const MSG_NO_VALID_NODES: &str = "No valid nodes found in data";

/// Requests accepted by the background execution context. Structured on the
/// channel, but JSON-serializable end to end for any transport.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerRequest {
    SampleData {
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<SampleSettings>,
    },
    ClusterData {
        nodes: Vec<Node>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerReply {
    SampledData { nodes: Vec<Node>, edges: Vec<Edge> },
    ClusteredData { nodes: Vec<Node>, edges: Vec<Edge> },
    Error { message: String },
}

/// Run one request to completion. Validation runs before any algorithm;
/// errors come back as `Error` replies, never as panics.
pub fn handle_request(request: WorkerRequest) -> WorkerReply {
    match request {
        WorkerRequest::SampleData {
            nodes,
            edges,
            settings,
        } => {
            if nodes.is_empty() {
                return WorkerReply::Error {
                    message: MSG_INVALID_DATA.to_string(),
                };
            }

            let (valid, dropped) = validate_nodes(nodes);
            if valid.is_empty() {
                return WorkerReply::Error {
                    message: MSG_NO_VALID_NODES.to_string(),
                };
            }
            log::debug!("{} valid nodes after dropping {dropped}", valid.len());

            let settings = settings.unwrap_or_default().sanitized();
            let sampled = sample_nodes(valid, &settings, &mut thread_rng());
            let edges = sample_edges(&edges, &sampled, settings.edge_limit);

            WorkerReply::SampledData {
                nodes: sampled,
                edges,
            }
        }
        WorkerRequest::ClusterData { nodes } => {
            if nodes.is_empty() {
                return WorkerReply::Error {
                    message: MSG_INVALID_DATA.to_string(),
                };
            }

            let (valid, _) = validate_nodes(nodes);
            if valid.is_empty() {
                return WorkerReply::Error {
                    message: MSG_NO_VALID_NODES.to_string(),
                };
            }

            let clusters = cluster_nodes(&valid, DEFAULT_GRID_SIZE);
            log::debug!("clustered {} nodes into {} cells", valid.len(), clusters.len());

            WorkerReply::ClusteredData {
                nodes: clusters,
                edges: Vec::new(),
            }
        }
    }
}

/// Entry point for untyped transports: dispatch a raw JSON message, mapping
/// unrecognized types and malformed payloads to `Error` replies.
pub fn handle_raw_message(raw: &Value) -> WorkerReply {
    match WorkerRequest::deserialize(raw) {
        Ok(request) => handle_request(request),
        Err(_) => {
            let known_type = raw
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|tag| tag == "SAMPLE_DATA" || tag == "CLUSTER_DATA");

            let message = if known_type {
                MSG_INVALID_DATA
            } else {
                MSG_UNKNOWN_TYPE
            };
            WorkerReply::Error {
                message: message.to_string(),
            }
        }
    }
}

/// A background execution context for large graphs: one worker thread, one
/// request in, one reply out. Replies carry the request token so superseded
/// results can be detected and discarded by the caller.
pub struct GraphWorker {
    request_tx: Sender<(u64, WorkerRequest)>,
    reply_rx: Receiver<(u64, WorkerReply)>,
}

impl GraphWorker {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<(u64, WorkerRequest)>();
        let (reply_tx, reply_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok((token, request)) = request_rx.recv() {
                if reply_tx.send((token, handle_request(request))).is_err() {
                    break;
                }
            }
        });

        Self {
            request_tx,
            reply_rx,
        }
    }

    /// Returns the request back on a dead channel so the caller can fall
    /// back to computing it synchronously.
    pub fn submit(&self, token: u64, request: WorkerRequest) -> Result<(), WorkerRequest> {
        self.request_tx
            .send((token, request))
            .map_err(|mpsc::SendError((_, request))| request)
    }

    pub fn try_recv(&self) -> Option<(u64, WorkerReply)> {
        self.reply_rx.try_recv().ok()
    }

    pub fn recv(&self) -> Result<(u64, WorkerReply), PipelineError> {
        self.reply_rx
            .recv()
            .map_err(|_| PipelineError::Transport("worker thread has shut down".to_string()))
    }
}
