use crate::graph::{NodeId, expand_cluster};

use super::{RenderSink, Session};

const EDGE_BASE_COLOR: &str = "#ccc";
const EDGE_HIGHLIGHT_COLOR: &str = "#4287f5";

impl<R: RenderSink> Session<R> {
    /// Handle a click on a node: highlight its edges and, for cluster nodes,
    /// expand the clicked cluster in place. Only the clicked cluster is
    /// expanded; siblings stay collapsed. Unlike sampling passes this edits
    /// the active snapshot locally instead of starting over from raw.
    pub fn on_node_click(&mut self, id: &NodeId) {
        let Some(position) = self.active.nodes.iter().position(|node| &node.id == id) else {
            return;
        };

        self.highlight_edges(id);

        if self.active.nodes[position].is_cluster {
            let cluster = &self.active.nodes[position];
            match expand_cluster(cluster, &self.raw_index) {
                Ok(members) => {
                    self.active.nodes.swap_remove(position);
                    // Re-inserted members get a visibility bump; a display
                    // choice, the raw snapshot keeps the true sizes.
                    self.active.nodes.extend(members.into_iter().map(|mut node| {
                        node.size *= 2.0;
                        node
                    }));
                }
                Err(error) => {
                    log::error!("cluster expansion failed, keeping current snapshot: {error}");
                }
            }
        }

        if let Some(renderer) = &mut self.renderer {
            renderer.install(&self.active);
        }
    }

    fn highlight_edges(&mut self, id: &NodeId) {
        for edge in &mut self.active.edges {
            if edge.touches(id) {
                edge.color = Some(EDGE_HIGHLIGHT_COLOR.to_string());
                edge.size = 2.0;
            } else {
                edge.color = Some(EDGE_BASE_COLOR.to_string());
                edge.size = 1.0;
            }
        }
    }
}
