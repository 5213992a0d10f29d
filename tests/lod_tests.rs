// Tests for LOD band selection, display policy, and viewport culling.

use lodgraph::graph::Node;
use lodgraph::session::{
    CameraState, DisplayPolicy, LodBand, VIEWPORT_MARGIN, graph_to_viewport, in_viewport,
    visible_indices,
};

fn camera(ratio: f64) -> CameraState {
    CameraState {
        ratio,
        angle: 0.0,
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    }
}

#[test]
fn test_band_boundaries() {
    assert_eq!(LodBand::for_ratio(0.5), LodBand::Near);
    assert_eq!(LodBand::for_ratio(2.0), LodBand::Near);
    assert_eq!(LodBand::for_ratio(2.01), LodBand::Medium);
    assert_eq!(LodBand::for_ratio(5.0), LodBand::Medium);
    assert_eq!(LodBand::for_ratio(5.01), LodBand::Far);
    assert_eq!(LodBand::for_ratio(100.0), LodBand::Far);
}

#[test]
fn test_far_policy_suppresses_all_labels() {
    let policy = DisplayPolicy::for_band(LodBand::Far);
    assert!(!policy.render_labels);

    let node = Node::new(1, 0.0, 0.0).with_size(100.0);
    let (_, label) = policy.node_display(&node);
    assert!(label.is_none());
}

#[test]
fn test_medium_policy_labels_clusters_only_and_shrinks_sizes() {
    let policy = DisplayPolicy::for_band(LodBand::Medium);

    let plain = Node::new(1, 0.0, 0.0).with_size(20.0);
    let (size, label) = policy.node_display(&plain);
    assert!((size - 16.0).abs() < 1e-9, "sizes shrink by 0.8 cosmetically");
    assert!(label.is_none(), "plain nodes are unlabeled at medium zoom");

    let mut cluster = Node::new("0,0", 0.0, 0.0).with_size(20.0);
    cluster.is_cluster = true;
    cluster.label = Some("Cluster (4)".to_string());
    let (_, label) = policy.node_display(&cluster);
    assert_eq!(label.as_deref(), Some("Cluster (4)"));
}

#[test]
fn test_near_policy_uses_true_sizes_and_lower_threshold() {
    let policy = DisplayPolicy::for_band(LodBand::Near);

    let node = Node::new(1, 0.0, 0.0).with_size(10.0);
    let (size, label) = policy.node_display(&node);
    assert_eq!(size, 10.0);
    assert_eq!(label.as_deref(), Some("1"));

    let small = Node::new(2, 0.0, 0.0).with_size(5.0);
    let (_, label) = policy.node_display(&small);
    assert!(label.is_none(), "below the rendered-size threshold");
}

#[test]
fn test_projection_centers_the_camera_target() {
    let camera = camera(1.0);
    let (x, y) = graph_to_viewport(&camera, 0.0, 0.0);
    assert_eq!((x, y), (400.0, 300.0));

    let (x, y) = graph_to_viewport(&camera, 10.0, -20.0);
    assert_eq!((x, y), (410.0, 280.0));
}

#[test]
fn test_projection_scales_with_zoom_ratio() {
    // Zoomed out 2x: world distances shrink on screen.
    let camera = camera(2.0);
    let (x, y) = graph_to_viewport(&camera, 100.0, 0.0);
    assert_eq!((x, y), (450.0, 300.0));
}

#[test]
fn test_projection_applies_camera_angle() {
    let mut camera = camera(1.0);
    camera.angle = std::f64::consts::FRAC_PI_2;

    let (x, y) = graph_to_viewport(&camera, 10.0, 0.0);
    assert!((x - 400.0).abs() < 1e-9);
    assert!((y - 310.0).abs() < 1e-9);
}

#[test]
fn test_viewport_margin() {
    let camera = camera(1.0);
    assert!(in_viewport(&camera, (-VIEWPORT_MARGIN + 1.0, 300.0)));
    assert!(!in_viewport(&camera, (-VIEWPORT_MARGIN - 1.0, 300.0)));
    assert!(in_viewport(&camera, (800.0 + VIEWPORT_MARGIN - 1.0, 300.0)));
    assert!(!in_viewport(&camera, (400.0, 600.0 + VIEWPORT_MARGIN + 1.0)));
}

#[test]
fn test_visible_indices_cull_offscreen_nodes() {
    let nodes = vec![
        Node::new(1, 0.0, 0.0),
        Node::new(2, 100.0, 100.0),
        Node::new(3, 10_000.0, 0.0),
        Node::new(4, -460.0, 0.0), // inside only thanks to the margin
    ];

    let visible = visible_indices(&camera(1.0), &nodes);
    assert_eq!(visible, vec![0, 1, 3]);
}
