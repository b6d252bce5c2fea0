use canvas_graph::{Edge, EdgeType, Graph, Node, NodeType};

/// Drives a graph the way the canvas does: every new node is auto-positioned
/// next to its parents and stamped with the next creation time.
pub(crate) struct CanvasHarness {
    pub(crate) graph: Graph,
}

impl CanvasHarness {
    pub(crate) fn new() -> Self {
        Self {
            graph: Graph::new(),
        }
    }

    pub(crate) fn add(&mut self, id: &str, node_type: NodeType, parents: &[&str]) {
        let position = self.graph.auto_position(parents);
        let created_at = self.graph.next_created_at();
        self.graph
            .add_node(
                Node::new(id, node_type, format!("{id} content"))
                    .with_position(position)
                    .with_created_at(created_at),
            )
            .expect("harness ids are unique");
        for parent in parents {
            let edge_type = if parents.len() > 1 {
                EdgeType::Merge
            } else {
                EdgeType::Reply
            };
            self.graph
                .add_edge(Edge::new(*parent, id, edge_type))
                .expect("harness parents exist");
        }
    }

    /// root(1) -> childA(2), root(1) -> childB(3)
    pub(crate) fn forked() -> Self {
        let mut harness = Self::new();
        for (id, created_at) in [("root", 1), ("childA", 2), ("childB", 3)] {
            harness
                .graph
                .add_node(Node::new(id, NodeType::Human, id).with_created_at(created_at))
                .expect("fresh graph");
        }
        for child in ["childA", "childB"] {
            harness
                .graph
                .add_edge(Edge::new("root", child, EdgeType::Reply))
                .expect("nodes exist");
        }
        harness
    }

    pub(crate) fn context_ids(&self, seeds: &[&str]) -> Vec<String> {
        self.graph
            .resolve_context(seeds)
            .into_iter()
            .map(|message| message.node_id)
            .collect()
    }
}
