use canvas_graph::{CanvasConfig, Graph, NodeType};

use super::harness::CanvasHarness;

#[test]
fn reloaded_graph_resolves_the_same_context() {
    let mut harness = CanvasHarness::new();
    harness.add("q", NodeType::Human, &[]);
    harness.add("a", NodeType::Ai, &["q"]);
    harness.add("n", NodeType::Note, &["a"]);

    let json = harness.graph.to_json().unwrap();
    let reloaded = Graph::from_json(&json).unwrap();

    assert_eq!(
        reloaded.resolve_context(&["n"]),
        harness.graph.resolve_context(&["n"])
    );
    for (_, node) in harness.graph.nodes() {
        assert_eq!(reloaded.get_node(&node.id).unwrap().position, node.position);
    }
}

#[test]
fn configured_sizes_apply_to_unsized_snapshot_nodes() {
    let config = CanvasConfig::from_toml_str(
        r#"
        [sizes.default]
        width = 300.0
        height = 150.0
        "#,
    )
    .unwrap();
    let raw = r#"{"nodes":[{"id":"x","type":"ai","content":"","position":{"x":0,"y":0}}],"edges":[]}"#;

    let graph = Graph::from_json_with_config(raw, &config).unwrap();
    let node = graph.get_node("x").unwrap();
    assert_eq!((node.width, node.height), (300.0, 150.0));
}

#[test]
fn new_nodes_stamp_after_loaded_ones() {
    let raw = r#"{"nodes":[{"id":"old","type":"human","created_at":18446744073709551000}],"edges":[]}"#;
    let mut graph = Graph::from_json(raw).unwrap();
    assert!(graph.next_created_at() > 18_446_744_073_709_551_000);
}

#[test]
fn stamps_saturate_at_the_largest_loaded_value() {
    let raw = r#"{"nodes":[{"id":"last","type":"note","created_at":18446744073709551615}],"edges":[]}"#;
    let mut graph = Graph::from_json(raw).unwrap();
    assert_eq!(graph.next_created_at(), u64::MAX);
    assert_eq!(graph.next_created_at(), u64::MAX);

    let key = graph.create_node(NodeType::Note, "after", Default::default());
    assert_eq!(graph.get_node_by_key(key).unwrap().created_at, u64::MAX);
}
