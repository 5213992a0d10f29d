// Tests for grid clustering and cluster expansion.

use std::collections::{HashMap, HashSet};

use lodgraph::graph::{Node, NodeId, cluster_nodes, expand_cluster};

fn lookup(nodes: &[Node]) -> HashMap<NodeId, Node> {
    nodes
        .iter()
        .map(|node| (node.id.clone(), node.clone()))
        .collect()
}

#[test]
fn test_cluster_two_cells() {
    let nodes = vec![
        Node::new(1, 0.0, 0.0).with_size(10.0),
        Node::new(2, 5.0, 5.0).with_size(1.0),
        Node::new(3, 200.0, 200.0).with_size(1.0),
    ];

    let clusters = cluster_nodes(&nodes, 50.0);
    assert_eq!(clusters.len(), 2);

    let near = clusters
        .iter()
        .find(|cluster| cluster.id == NodeId::from("0,0"))
        .expect("cell 0,0 exists");
    assert_eq!(near.x, 25.0);
    assert_eq!(near.y, 25.0);
    assert_eq!(
        near.members.as_deref().unwrap(),
        &[NodeId::Int(1), NodeId::Int(2)]
    );
    assert!((near.size - 2.0_f64.sqrt() * 5.0).abs() < 1e-9);
    assert!(near.is_cluster);

    let far = clusters
        .iter()
        .find(|cluster| cluster.id == NodeId::from("4,4"))
        .expect("cell 4,4 exists");
    assert_eq!(far.x, 225.0);
    assert_eq!(far.y, 225.0);
    assert_eq!(far.members.as_deref().unwrap(), &[NodeId::Int(3)]);
    assert_eq!(far.size, 5.0);
    assert!(far.is_cluster, "single-member cells are still clusters");
}

#[test]
fn test_clustering_is_a_partition() {
    let nodes: Vec<Node> = (0..100)
        .map(|i| Node::new(i as i64, (i % 13) as f64 * 40.0, (i / 13) as f64 * 40.0))
        .collect();

    let clusters = cluster_nodes(&nodes, 50.0);

    let mut seen = HashSet::new();
    let mut total = 0usize;
    for cluster in &clusters {
        for member in cluster.members.as_deref().unwrap() {
            assert!(seen.insert(member.clone()), "member {member} appears twice");
            total += 1;
        }
    }

    assert_eq!(total, nodes.len());
    let input_ids: HashSet<NodeId> = nodes.iter().map(|node| node.id.clone()).collect();
    assert_eq!(seen, input_ids);
}

#[test]
fn test_clustering_is_deterministic() {
    let nodes: Vec<Node> = (0..60)
        .map(|i| Node::new(i as i64, (i * 17 % 300) as f64, (i * 31 % 300) as f64))
        .collect();

    let first = cluster_nodes(&nodes, 50.0);
    let second = cluster_nodes(&nodes, 50.0);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.members, b.members);
    }
}

#[test]
fn test_negative_coordinates_get_distinct_cells() {
    let nodes = vec![
        Node::new(1, -10.0, -10.0),
        Node::new(2, 10.0, 10.0),
    ];

    let clusters = cluster_nodes(&nodes, 50.0);
    assert_eq!(clusters.len(), 2);

    let negative = clusters
        .iter()
        .find(|cluster| cluster.id == NodeId::from("-1,-1"))
        .expect("negative cell exists");
    assert_eq!(negative.x, -25.0);
    assert_eq!(negative.y, -25.0);
}

#[test]
fn test_cluster_label_and_color() {
    let mut a = Node::new(1, 0.0, 0.0);
    a.color = Some("#111".to_string());
    let mut b = Node::new(2, 1.0, 1.0);
    b.color = Some("#222".to_string());

    let clusters = cluster_nodes(&[a, b], 50.0);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].label.as_deref(), Some("Cluster (2)"));
    // Last member wins.
    assert_eq!(clusters[0].color.as_deref(), Some("#222"));
}

#[test]
fn test_expansion_round_trip() {
    let nodes: Vec<Node> = (0..40)
        .map(|i| {
            Node::new(i as i64, (i * 37 % 400) as f64, (i * 53 % 400) as f64)
                .with_size(i as f64 + 1.0)
        })
        .collect();
    let index = lookup(&nodes);

    let clusters = cluster_nodes(&nodes, 50.0);

    let mut reconstructed = Vec::new();
    for cluster in &clusters {
        reconstructed.extend(expand_cluster(cluster, &index).expect("all members resolve"));
    }

    assert_eq!(reconstructed.len(), nodes.len());
    let by_id = lookup(&reconstructed);
    for node in &nodes {
        let restored = by_id.get(&node.id).expect("node reconstructed");
        assert_eq!(restored.x, node.x);
        assert_eq!(restored.y, node.y);
        assert_eq!(restored.size, node.size);
        assert!(!restored.is_cluster);
    }
}

#[test]
fn test_expansion_fails_atomically_on_missing_member() {
    let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(2, 1.0, 1.0)];
    let clusters = cluster_nodes(&nodes, 50.0);

    // A lookup missing one member must fail outright rather than return a
    // partial expansion.
    let partial = lookup(&nodes[..1]);
    assert!(expand_cluster(&clusters[0], &partial).is_err());
}

#[test]
fn test_expanding_a_plain_node_is_an_error() {
    let node = Node::new(1, 0.0, 0.0);
    assert!(expand_cluster(&node, &HashMap::new()).is_err());
}
