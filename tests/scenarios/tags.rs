use canvas_graph::graph::TAG_PALETTE;
use canvas_graph::{GraphError, NodeType};

use super::harness::CanvasHarness;

#[test]
fn palette_boundary() {
    let mut harness = CanvasHarness::new();
    assert_eq!(
        harness.graph.create_tag("#000000", "invalid"),
        Err(GraphError::InvalidTagColor("#000000".to_string()))
    );
    harness.graph.create_tag(TAG_PALETTE[0], "urgent").unwrap();
    assert_eq!(harness.graph.get_tag(TAG_PALETTE[0]).unwrap().name, "urgent");
}

#[test]
fn tagging_is_idempotent_and_survives_reload() {
    let mut harness = CanvasHarness::new();
    harness.add("q", NodeType::Human, &[]);
    harness.graph.create_tag(TAG_PALETTE[4], "follow up").unwrap();

    harness.graph.add_tag_to_node("q", TAG_PALETTE[4]);
    harness.graph.add_tag_to_node("q", TAG_PALETTE[4]);
    assert_eq!(harness.graph.get_node("q").unwrap().tags, vec![TAG_PALETTE[4]]);

    let before = harness.graph.get_node("q").unwrap().clone();
    harness.graph.remove_tag_from_node("q", TAG_PALETTE[2]);
    assert_eq!(harness.graph.get_node("q").unwrap(), &before);

    let reloaded = canvas_graph::Graph::from_json(&harness.graph.to_json().unwrap()).unwrap();
    assert!(reloaded.node_has_tag("q", TAG_PALETTE[4]));
    assert_eq!(reloaded.get_tag(TAG_PALETTE[4]).unwrap().name, "follow up");
}
