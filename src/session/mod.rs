use std::collections::{HashMap, HashSet};

use crate::graph::{
    GraphSnapshot, Node, NodeId, SampleSettings, validate_edges, validate_nodes,
};
use crate::worker::{GraphWorker, WorkerReply, WorkerRequest, handle_request};

mod interact;
mod lod;
mod render;

pub use lod::{
    CameraState, DisplayPolicy, LodBand, VIEWPORT_MARGIN, graph_to_viewport, in_viewport,
    visible_indices,
};
pub use render::{LogRenderSink, RenderSink};

/// Graphs at or above this node count are processed on the worker thread;
/// smaller ones are computed synchronously on the calling thread.
pub const WORKER_NODE_THRESHOLD: usize = 1000;

/// One interactive graph instance: the immutable raw snapshot (ground truth
/// for every re-sample), the active snapshot currently handed to the
/// renderer, and the in-flight request token. All state lives here rather
/// than in module-level globals, and only the owning thread mutates the
/// active snapshot.
pub struct Session<R: RenderSink> {
    raw: GraphSnapshot,
    raw_index: HashMap<NodeId, Node>,
    active: GraphSnapshot,
    settings: SampleSettings,
    renderer: Option<R>,
    worker: Option<GraphWorker>,
    pending_token: u64,
    visible: Vec<NodeId>,
}

impl<R: RenderSink> Session<R> {
    /// Validate the raw graph once and keep it as the immutable base for all
    /// derived snapshots. A worker thread is spawned only for large graphs.
    pub fn new(raw: GraphSnapshot, settings: SampleSettings) -> Self {
        let (nodes, dropped) = validate_nodes(raw.nodes);
        if dropped > 0 {
            log::warn!("dropped {dropped} malformed nodes from raw graph");
        }
        let known_ids = nodes.iter().map(|node| node.id.clone()).collect::<HashSet<_>>();
        let edges = validate_edges(raw.edges, &known_ids);

        let raw = GraphSnapshot::new(nodes, edges);
        let raw_index = raw.index_by_id();
        let worker = (raw.node_count() >= WORKER_NODE_THRESHOLD).then(GraphWorker::spawn);

        Self {
            raw,
            raw_index,
            active: GraphSnapshot::default(),
            settings: settings.clamped(),
            renderer: None,
            worker,
            pending_token: 0,
            visible: Vec::new(),
        }
    }

    pub fn attach_renderer(&mut self, renderer: R) {
        self.renderer = Some(renderer);
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn raw(&self) -> &GraphSnapshot {
        &self.raw
    }

    pub fn active(&self) -> &GraphSnapshot {
        &self.active
    }

    pub fn settings(&self) -> SampleSettings {
        self.settings
    }

    /// Ids of the nodes currently on screen, as of the last camera move.
    pub fn visible_ids(&self) -> &[NodeId] {
        &self.visible
    }

    /// Re-sample from the immutable raw snapshot under new settings. The
    /// current rendering state is fully torn down before the request goes
    /// out, so a late reply can never race the rebuild; settings changes are
    /// idempotent with respect to prior derived snapshots.
    pub fn apply_settings(&mut self, settings: SampleSettings) {
        self.settings = settings.clamped();

        self.active = GraphSnapshot::default();
        self.visible.clear();
        if let Some(renderer) = &mut self.renderer {
            renderer.clear();
        }

        self.dispatch(WorkerRequest::SampleData {
            nodes: self.raw.nodes.clone(),
            edges: self.raw.edges.clone(),
            settings: Some(self.settings),
        });
    }

    /// Recompute the visible set and LOD band for a camera move. At far zoom
    /// a fresh clustering pass over the visible nodes is requested
    /// (fire-and-forget; only the latest request is honored). A no-op until
    /// a renderer is attached and a snapshot is active.
    pub fn on_camera_move(&mut self, camera: &CameraState) {
        if self.renderer.is_none() || self.active.is_empty() {
            return;
        }

        let indices = lod::visible_indices(camera, &self.active.nodes);
        self.visible = indices
            .iter()
            .map(|&index| self.active.nodes[index].id.clone())
            .collect();

        let band = camera.band();
        if band == LodBand::Far && !indices.is_empty() {
            let visible_nodes = indices
                .iter()
                .map(|&index| self.active.nodes[index].clone())
                .collect();
            self.dispatch(WorkerRequest::ClusterData {
                nodes: visible_nodes,
            });
        }

        let policy = DisplayPolicy::for_band(band);
        if let Some(renderer) = &mut self.renderer {
            renderer.apply_policy(&policy);
        }
    }

    /// Drain worker replies, installing the one that matches the current
    /// request token and discarding stale ones.
    pub fn poll(&mut self) {
        let mut replies = Vec::new();
        if let Some(worker) = &self.worker {
            while let Some(pair) = worker.try_recv() {
                replies.push(pair);
            }
        }
        for (token, reply) in replies {
            self.install(token, reply);
        }
    }

    pub fn has_active_snapshot(&self) -> bool {
        !self.active.is_empty()
    }

    fn dispatch(&mut self, request: WorkerRequest) {
        self.pending_token += 1;
        let token = self.pending_token;

        if let Some(worker) = &self.worker {
            match worker.submit(token, request) {
                Ok(()) => return,
                Err(request) => {
                    // Transport failure: drop the dead worker and recover by
                    // computing in-thread.
                    log::warn!("worker channel closed, falling back to synchronous computation");
                    self.worker = None;
                    let reply = handle_request(request);
                    self.install(token, reply);
                }
            }
        } else {
            let reply = handle_request(request);
            self.install(token, reply);
        }
    }

    fn install(&mut self, token: u64, reply: WorkerReply) {
        if token != self.pending_token {
            log::debug!(
                "discarding stale reply for request {token} (current is {})",
                self.pending_token
            );
            return;
        }

        match reply {
            WorkerReply::SampledData { nodes, edges }
            | WorkerReply::ClusteredData { nodes, edges } => {
                self.active = GraphSnapshot::new(nodes, edges);
                if let Some(renderer) = &mut self.renderer {
                    renderer.install(&self.active);
                }
            }
            WorkerReply::Error { message } => {
                // Informational only; never retried automatically.
                log::error!("graph request failed: {message}");
            }
        }
    }
}
