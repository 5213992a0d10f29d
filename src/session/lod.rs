use crate::graph::Node;

/// Camera parameters as reported by the rendering collaborator. Read-only
/// here; the core never moves the camera. A larger ratio means the camera is
/// zoomed further out.
#[derive(Clone, Copy, Debug)]
pub struct CameraState {
    pub ratio: f64,
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CameraState {
    pub fn band(&self) -> LodBand {
        LodBand::for_ratio(self.ratio)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LodBand {
    Near,
    Medium,
    Far,
}

impl LodBand {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio > 5.0 {
            Self::Far
        } else if ratio > 2.0 {
            Self::Medium
        } else {
            Self::Near
        }
    }
}

/// Cosmetic display adjustments for the current zoom band. Applied per node
/// at render time; the underlying snapshot is never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayPolicy {
    pub render_labels: bool,
    pub label_size_threshold: f64,
    pub size_factor: f64,
    pub cluster_labels_only: bool,
}

impl DisplayPolicy {
    pub fn for_band(band: LodBand) -> Self {
        match band {
            LodBand::Far => Self {
                render_labels: false,
                label_size_threshold: f64::INFINITY,
                size_factor: 1.0,
                cluster_labels_only: false,
            },
            LodBand::Medium => Self {
                render_labels: true,
                label_size_threshold: 15.0,
                size_factor: 0.8,
                cluster_labels_only: true,
            },
            LodBand::Near => Self {
                render_labels: true,
                label_size_threshold: 8.0,
                size_factor: 1.0,
                cluster_labels_only: false,
            },
        }
    }

    /// Per-node reducer: the displayed size and label for one node under
    /// this policy.
    pub fn node_display(&self, node: &Node) -> (f64, Option<String>) {
        let size = node.size * self.size_factor;
        let labelled = self.render_labels
            && size >= self.label_size_threshold
            && (!self.cluster_labels_only || node.is_cluster);
        let label = labelled.then(|| node.display_label());
        (size, label)
    }
}

/// Extra viewport padding so nodes do not visibly pop at the edge.
pub const VIEWPORT_MARGIN: f64 = 100.0;

/// Project a graph-space position into viewport pixels.
pub fn graph_to_viewport(camera: &CameraState, x: f64, y: f64) -> (f64, f64) {
    let dx = x - camera.x;
    let dy = y - camera.y;
    let (sin, cos) = camera.angle.sin_cos();
    let rx = dx * cos - dy * sin;
    let ry = dx * sin + dy * cos;
    (
        rx / camera.ratio + camera.width / 2.0,
        ry / camera.ratio + camera.height / 2.0,
    )
}

pub fn in_viewport(camera: &CameraState, position: (f64, f64)) -> bool {
    let (x, y) = position;
    x >= -VIEWPORT_MARGIN
        && x <= camera.width + VIEWPORT_MARGIN
        && y >= -VIEWPORT_MARGIN
        && y <= camera.height + VIEWPORT_MARGIN
}

/// Indices of the nodes currently on screen (plus margin) for this camera.
pub fn visible_indices(camera: &CameraState, nodes: &[Node]) -> Vec<usize> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            in_viewport(camera, graph_to_viewport(camera, node.x, node.y)).then_some(index)
        })
        .collect()
}
