use canvas_graph::{NodeType, Role};

use super::harness::CanvasHarness;

#[test]
fn forked_conversation_resolves_root_once() {
    let harness = CanvasHarness::forked();

    let ancestors: Vec<&str> = harness
        .graph
        .get_ancestors("childA")
        .into_iter()
        .map(|node| node.id.as_str())
        .collect();
    assert_eq!(ancestors, vec!["root"]);

    let order = harness.context_ids(&["childA", "childB"]);
    insta::assert_debug_snapshot!(order, @r###"
    [
        "root",
        "childA",
        "childB",
    ]
    "###);
}

#[test]
fn branch_and_merge_conversation() {
    let mut harness = CanvasHarness::new();
    harness.add("question", NodeType::Human, &[]);
    harness.add("answer", NodeType::Ai, &["question"]);
    harness.add("branch", NodeType::Human, &["answer"]);
    harness.add("alt", NodeType::Ai, &["branch"]);
    harness.add("followup", NodeType::Human, &["answer"]);
    harness.add("merge", NodeType::Synthesis, &["alt", "followup"]);
    harness.add("unrelated", NodeType::Note, &[]);

    assert_eq!(
        harness.context_ids(&["merge"]),
        vec!["question", "answer", "branch", "alt", "followup", "merge"]
    );

    // A seed and its own descendant: the older seed appears once, first.
    let ids = harness.context_ids(&["answer", "alt"]);
    assert_eq!(ids, vec!["question", "answer", "branch", "alt"]);

    let messages = harness.graph.resolve_context(&["merge"]);
    let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );

    let highlighted = harness.graph.get_ancestor_ids(&["merge"]);
    assert!(!highlighted.contains("merge"));
    assert!(!highlighted.contains("unrelated"));
    assert_eq!(highlighted.len(), 5);
}

#[test]
fn removing_a_node_cuts_it_out_of_context() {
    let mut harness = CanvasHarness::new();
    harness.add("q", NodeType::Human, &[]);
    harness.add("a", NodeType::Ai, &["q"]);
    harness.add("b", NodeType::Human, &["a"]);

    harness.graph.remove_node("a");

    assert_eq!(harness.context_ids(&["b"]), vec!["b"]);
    assert!(harness.graph.get_parents("b").is_empty());
    assert_eq!(harness.graph.edge_count(), 0);
}
