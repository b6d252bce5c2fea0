use canvas_graph::config::{ForceDirectedConfig, OverlapConfig, TopologicalConfig};
use canvas_graph::layout::profile::FORCE_ID_COMPACT;
use canvas_graph::layout::{
    ForceProfileRegistry, compute_layers, force_directed_layout, node_box, padded_overlap,
    topological_layout,
};
use canvas_graph::{Edge, EdgeType, Graph, NodeType, SizeOverrides};
use euclid::default::Size2D;

use super::harness::CanvasHarness;

fn assert_separated(graph: &Graph, overrides: &SizeOverrides, padding: f32) {
    let boxes: Vec<_> = graph
        .nodes()
        .map(|(_, node)| {
            let size = overrides.get(&node.id).copied().unwrap_or_else(|| node.size());
            (node.id.clone(), node_box(node.position, size))
        })
        .collect();
    for (i, (id_a, a)) in boxes.iter().enumerate() {
        for (id_b, b) in &boxes[i + 1..] {
            assert!(!padded_overlap(a, b, padding), "{id_a} overlaps {id_b}");
        }
    }
}

#[test]
fn forked_conversation_topological_layout() {
    let mut harness = CanvasHarness::forked();
    let report = topological_layout(
        &mut harness.graph,
        &SizeOverrides::new(),
        &TopologicalConfig::default(),
    );
    assert_eq!(report.placed, 3);
    assert!(report.cycle.is_none());

    let layers = compute_layers(&harness.graph);
    assert_eq!(layers["root"], 0);
    assert_eq!(layers["childA"], 1);
    assert_eq!(layers["childB"], 1);

    let root = harness.graph.get_node("root").unwrap();
    let a = harness.graph.get_node("childA").unwrap();
    let b = harness.graph.get_node("childB").unwrap();
    assert_eq!(a.position.x, b.position.x);
    assert!(a.position.x > root.position.x + root.width);
    assert_separated(&harness.graph, &SizeOverrides::new(), 20.0);
}

#[test]
fn measured_sizes_drive_both_engines() {
    let mut harness = CanvasHarness::new();
    harness.add("q", NodeType::Human, &[]);
    harness.add("a", NodeType::Ai, &["q"]);
    harness.add("b", NodeType::Ai, &["q"]);
    harness.add("m", NodeType::Synthesis, &["a", "b"]);

    let mut overrides = SizeOverrides::new();
    overrides.insert("a".to_string(), Size2D::new(700.0, 500.0));

    topological_layout(&mut harness.graph, &overrides, &TopologicalConfig::default());
    assert_separated(&harness.graph, &overrides, 20.0);
    let a = harness.graph.get_node("a").unwrap().position;
    let m = harness.graph.get_node("m").unwrap().position;
    assert!(m.x >= a.x + 700.0);

    let overlap = OverlapConfig::default();
    let report = force_directed_layout(
        &mut harness.graph,
        &overrides,
        &ForceDirectedConfig::default(),
        &overlap,
    );
    assert!(report.overlap.is_some_and(|o| o.converged));
    assert_separated(&harness.graph, &overrides, overlap.padding);
}

#[test]
fn cycle_is_reported_not_fatal() {
    let mut harness = CanvasHarness::forked();
    harness
        .graph
        .add_edge(Edge::new("childB", "root", EdgeType::Reference))
        .unwrap();

    let report = topological_layout(
        &mut harness.graph,
        &SizeOverrides::new(),
        &TopologicalConfig::default(),
    );
    assert_eq!(report.placed, 3);
    assert_eq!(
        report.cycle,
        Some(vec![
            "root".to_string(),
            "childA".to_string(),
            "childB".to_string()
        ])
    );
    assert_separated(&harness.graph, &SizeOverrides::new(), 20.0);
    assert!(harness.graph.validate_acyclic().is_err());
}

#[test]
fn named_profile_runs_force_layout() {
    let registry = ForceProfileRegistry::default();
    let resolution = registry.resolve(FORCE_ID_COMPACT);
    assert!(resolution.matched);

    let mut harness = CanvasHarness::new();
    harness.add("q", NodeType::Human, &[]);
    for i in 0..4 {
        harness.add(&format!("a{i}"), NodeType::Ai, &["q"]);
    }

    let overlap = OverlapConfig {
        padding: resolution.profile.padding,
        ..OverlapConfig::default()
    };
    let report = force_directed_layout(
        &mut harness.graph,
        &SizeOverrides::new(),
        &resolution.profile,
        &overlap,
    );
    assert_eq!(report.placed, 5);
    assert_separated(&harness.graph, &SizeOverrides::new(), overlap.padding);
}
