use crate::graph::GraphSnapshot;

use super::lod::DisplayPolicy;

/// Seam to the external rendering engine. The core only ever hands over
/// complete snapshots and display policies; drawing, camera projection and
/// hit-testing live on the other side.
pub trait RenderSink {
    fn install(&mut self, snapshot: &GraphSnapshot);
    fn apply_policy(&mut self, policy: &DisplayPolicy);
    fn clear(&mut self);
}

/// Renderer stand-in for headless runs: logs what a real engine would draw.
#[derive(Default)]
pub struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn install(&mut self, snapshot: &GraphSnapshot) {
        log::info!(
            "render: {} nodes, {} edges",
            snapshot.node_count(),
            snapshot.edge_count()
        );
    }

    fn apply_policy(&mut self, policy: &DisplayPolicy) {
        log::info!(
            "render policy: labels={} threshold={} size_factor={}",
            policy.render_labels,
            policy.label_size_threshold,
            policy.size_factor
        );
    }

    fn clear(&mut self) {
        log::info!("render: cleared");
    }
}
