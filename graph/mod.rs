/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Conversation graph store for the chat canvas.
//!
//! Core structures:
//! - `Graph`: node/edge/tag container backed by petgraph::StableGraph
//! - `Node`: content unit with type, content, position, size and creation stamp
//! - `Edge`: typed directed relation between two node ids
//!
//! Parent/child queries go straight to the StableGraph incoming/outgoing
//! adjacency lists, so they stay O(degree) after arbitrary removals.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use euclid::default::{Point2D, Size2D, Vector2D};
use log::{debug, warn};
use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::{CanvasConfig, NodeSizeTable, PlacementConfig};
use crate::persistence::types::{
    GraphSnapshot, PersistedEdge, PersistedNode, PersistedPosition, PersistedTag,
};

mod error;
pub mod placement;
pub mod tags;

pub use error::GraphError;
pub use tags::{TAG_PALETTE, TagDefinition, is_palette_color};

/// Stable node handle (petgraph NodeIndex, survives other deletions)
pub type NodeKey = NodeIndex;

/// Stable edge handle (petgraph EdgeIndex)
pub type EdgeKey = EdgeIndex;

/// Node content kind.
///
/// The graph algorithms only use the string form (size table key, context
/// role); unknown kinds round-trip through [`NodeType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Human,
    Ai,
    Note,
    Summary,
    Reference,
    Search,
    Research,
    Highlight,
    Matrix,
    Cell,
    Row,
    Column,
    FetchResult,
    Pdf,
    Opinion,
    Synthesis,
    Review,
    Image,
    Flashcard,
    Factcheck,
    Code,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Human => "human",
            NodeType::Ai => "ai",
            NodeType::Note => "note",
            NodeType::Summary => "summary",
            NodeType::Reference => "reference",
            NodeType::Search => "search",
            NodeType::Research => "research",
            NodeType::Highlight => "highlight",
            NodeType::Matrix => "matrix",
            NodeType::Cell => "cell",
            NodeType::Row => "row",
            NodeType::Column => "column",
            NodeType::FetchResult => "fetch_result",
            NodeType::Pdf => "pdf",
            NodeType::Opinion => "opinion",
            NodeType::Synthesis => "synthesis",
            NodeType::Review => "review",
            NodeType::Image => "image",
            NodeType::Flashcard => "flashcard",
            NodeType::Factcheck => "factcheck",
            NodeType::Code => "code",
            NodeType::Other(raw) => raw,
        }
    }
}

impl From<&str> for NodeType {
    fn from(raw: &str) -> Self {
        match raw {
            "human" => NodeType::Human,
            "ai" => NodeType::Ai,
            "note" => NodeType::Note,
            "summary" => NodeType::Summary,
            "reference" => NodeType::Reference,
            "search" => NodeType::Search,
            "research" => NodeType::Research,
            "highlight" => NodeType::Highlight,
            "matrix" => NodeType::Matrix,
            "cell" => NodeType::Cell,
            "row" => NodeType::Row,
            "column" => NodeType::Column,
            "fetch_result" => NodeType::FetchResult,
            "pdf" => NodeType::Pdf,
            "opinion" => NodeType::Opinion,
            "synthesis" => NodeType::Synthesis,
            "review" => NodeType::Review,
            "image" => NodeType::Image,
            "flashcard" => NodeType::Flashcard,
            "factcheck" => NodeType::Factcheck,
            "code" => NodeType::Code,
            other => NodeType::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeType {
    fn from(raw: String) -> Self {
        NodeType::from(raw.as_str())
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Relation kind carried by an edge. Opaque to the layout and context algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeType {
    Reply,
    Branch,
    Merge,
    Reference,
    SearchResult,
    Highlight,
    Generates,
    MatrixCell,
    Other(String),
}

impl EdgeType {
    pub fn as_str(&self) -> &str {
        match self {
            EdgeType::Reply => "reply",
            EdgeType::Branch => "branch",
            EdgeType::Merge => "merge",
            EdgeType::Reference => "reference",
            EdgeType::SearchResult => "search-result",
            EdgeType::Highlight => "highlight",
            EdgeType::Generates => "generates",
            EdgeType::MatrixCell => "matrix-cell",
            EdgeType::Other(raw) => raw,
        }
    }
}

impl From<&str> for EdgeType {
    fn from(raw: &str) -> Self {
        match raw {
            "reply" => EdgeType::Reply,
            "branch" => EdgeType::Branch,
            "merge" => EdgeType::Merge,
            "reference" => EdgeType::Reference,
            "search-result" => EdgeType::SearchResult,
            "highlight" => EdgeType::Highlight,
            "generates" => EdgeType::Generates,
            "matrix-cell" => EdgeType::MatrixCell,
            other => EdgeType::Other(other.to_string()),
        }
    }
}

impl From<String> for EdgeType {
    fn from(raw: String) -> Self {
        EdgeType::from(raw.as_str())
    }
}

impl From<EdgeType> for String {
    fn from(edge_type: EdgeType) -> Self {
        match edge_type {
            EdgeType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// A content node on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable node identity. Immutable once the node is in a graph.
    pub id: String,

    pub node_type: NodeType,

    /// Text/markdown body; empty for structured types.
    pub content: String,

    /// Top-left corner in canvas space
    pub position: Point2D<f32>,

    /// Velocity for the force-directed simulation
    pub velocity: Vector2D<f32>,

    pub width: f32,
    pub height: f32,

    /// Creation stamp in milliseconds; the sole ordering key for context and layout ties.
    pub created_at: u64,

    pub title: Option<String>,
    pub summary: Option<String>,

    /// Palette colors applied to this node, without duplicates.
    pub tags: Vec<String>,

    /// Base64 image payload surfaced verbatim in resolved context.
    pub image_data: Option<String>,
    pub mime_type: Option<String>,

    /// Type-specific fields (matrix cells, flashcard state, ...) the core carries but never reads.
    pub payload: Map<String, Value>,
}

impl Node {
    /// Build a node with the default size for its type, placed at the canvas origin.
    pub fn new(id: impl Into<String>, node_type: NodeType, content: impl Into<String>) -> Self {
        let size = NodeSizeTable::default().size_for(&node_type);
        Self {
            id: id.into(),
            node_type,
            content: content.into(),
            position: Point2D::zero(),
            velocity: Vector2D::zero(),
            width: size.width,
            height: size.height,
            created_at: 0,
            title: None,
            summary: None,
            tags: Vec::new(),
            image_data: None,
            mime_type: None,
            payload: Map::new(),
        }
    }

    pub fn with_position(mut self, position: Point2D<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size2D<f32>) -> Self {
        self.width = size.width;
        self.height = size.height;
        self
    }

    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_image(mut self, image_data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        self.image_data = Some(image_data.into());
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn size(&self) -> Size2D<f32> {
        Size2D::new(self.width, self.height)
    }

    fn to_persisted(&self) -> PersistedNode {
        PersistedNode {
            id: self.id.clone(),
            node_type: self.node_type.as_str().to_string(),
            content: self.content.clone(),
            position: PersistedPosition {
                x: self.position.x,
                y: self.position.y,
            },
            width: Some(self.width),
            height: Some(self.height),
            created_at: self.created_at,
            title: self.title.clone(),
            summary: self.summary.clone(),
            tags: self.tags.clone(),
            image_data: self.image_data.clone(),
            mime_type: self.mime_type.clone(),
            payload: self.payload.clone(),
        }
    }

    fn from_persisted(pnode: &PersistedNode, sizes: &NodeSizeTable) -> Self {
        let node_type = NodeType::from(pnode.node_type.as_str());
        let default_size = sizes.size_for(&node_type);
        Self {
            id: pnode.id.clone(),
            node_type,
            content: pnode.content.clone(),
            position: Point2D::new(pnode.position.x, pnode.position.y),
            velocity: Vector2D::zero(),
            width: pnode.width.unwrap_or(default_size.width),
            height: pnode.height.unwrap_or(default_size.height),
            created_at: pnode.created_at,
            title: pnode.title.clone(),
            summary: pnode.summary.clone(),
            tags: pnode.tags.clone(),
            image_data: pnode.image_data.clone(),
            mime_type: pnode.mime_type.clone(),
            payload: pnode.payload.clone(),
        }
    }
}

/// A directed, typed relation. Parallel edges between the same pair are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub edge_type: EdgeType,
}

impl Edge {
    /// New edge with a fresh UUID.
    pub fn new(source: impl Into<String>, target: impl Into<String>, edge_type: EdgeType) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), source, target, edge_type)
    }

    pub fn with_id(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: EdgeType,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            edge_type,
        }
    }
}

/// Shallow merge applied by [`Graph::update_node`]. `None` fields are left untouched;
/// payload keys are merged one by one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub content: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub position: Option<Point2D<f32>>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub tags: Option<Vec<String>>,
    pub image_data: Option<String>,
    pub mime_type: Option<String>,
    pub payload: Map<String, Value>,
}

/// Main graph structure backed by petgraph::StableGraph
#[derive(Debug, Clone)]
pub struct Graph {
    /// The underlying petgraph stable graph
    pub(crate) inner: StableGraph<Node, Edge, Directed>,

    /// Node id to arena handle.
    id_to_node: HashMap<String, NodeKey>,

    /// Edge id to arena handle.
    id_to_edge: HashMap<String, EdgeKey>,

    /// Tag definitions keyed by palette color.
    pub(crate) tags: BTreeMap<String, TagDefinition>,

    sizes: NodeSizeTable,
    placement: PlacementConfig,

    /// Highest creation stamp handed out or observed; keeps `created_at` strictly increasing.
    last_created_at: u64,
}

impl Graph {
    /// Create a new empty graph with default sizing and placement
    pub fn new() -> Self {
        Self::with_config(&CanvasConfig::default())
    }

    pub fn with_config(config: &CanvasConfig) -> Self {
        Self {
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            id_to_edge: HashMap::new(),
            tags: BTreeMap::new(),
            sizes: config.sizes.clone(),
            placement: config.placement.clone(),
            last_created_at: 0,
        }
    }

    pub fn sizes(&self) -> &NodeSizeTable {
        &self.sizes
    }

    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Next creation stamp: wall-clock milliseconds, bumped past the last stamp if needed.
    pub fn next_created_at(&mut self) -> u64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let stamp = now_ms.max(self.last_created_at.saturating_add(1));
        self.last_created_at = stamp;
        stamp
    }

    /// Create a node with a fresh id, the type's default size and a new creation stamp.
    pub fn create_node(
        &mut self,
        node_type: NodeType,
        content: impl Into<String>,
        position: Point2D<f32>,
    ) -> NodeKey {
        let size = self.sizes.size_for(&node_type);
        let created_at = self.next_created_at();
        let node = Node::new(Uuid::new_v4().to_string(), node_type, content)
            .with_position(position)
            .with_size(size)
            .with_created_at(created_at);
        let id = node.id.clone();
        let key = self.inner.add_node(node);
        self.id_to_node.insert(id, key);
        key
    }

    /// Add a fully-formed node. Ids are unique and immutable.
    pub fn add_node(&mut self, node: Node) -> Result<NodeKey, GraphError> {
        if self.id_to_node.contains_key(&node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        self.last_created_at = self.last_created_at.max(node.created_at);
        let id = node.id.clone();
        let key = self.inner.add_node(node);
        self.id_to_node.insert(id, key);
        Ok(key)
    }

    /// Remove a node and all its connected edges
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let key = self.id_to_node.remove(id)?;
        let incident: HashSet<String> = self
            .inner
            .edges_directed(key, Direction::Outgoing)
            .chain(self.inner.edges_directed(key, Direction::Incoming))
            .map(|edge| edge.weight().id.clone())
            .collect();
        for edge_id in &incident {
            self.id_to_edge.remove(edge_id);
        }
        let node = self.inner.remove_node(key);
        debug!(
            "removed node {id} with {} incident edge(s)",
            incident.len()
        );
        node
    }

    /// Shallow-merge `update` into the node. Returns false when the node does not exist.
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> bool {
        if !self.id_to_node.contains_key(id) {
            return false;
        }
        let NodeUpdate {
            content,
            title,
            summary,
            position,
            width,
            height,
            tags,
            image_data,
            mime_type,
            payload,
        } = update;
        let tags = tags.map(|tags| self.defined_tags(id, tags));
        let Some(node) = self.get_node_mut(id) else {
            return false;
        };
        if let Some(content) = content {
            node.content = content;
        }
        if title.is_some() {
            node.title = title;
        }
        if summary.is_some() {
            node.summary = summary;
        }
        if let Some(position) = position {
            node.position = position;
        }
        if let Some(width) = width {
            node.width = width;
        }
        if let Some(height) = height {
            node.height = height;
        }
        if let Some(tags) = tags {
            node.tags = tags;
        }
        if image_data.is_some() {
            node.image_data = image_data;
        }
        if mime_type.is_some() {
            node.mime_type = mime_type;
        }
        node.payload.extend(payload);
        true
    }

    /// Add an edge between two existing nodes.
    ///
    /// Cycles are tolerated here; use [`Graph::add_edge_acyclic`] to reject them.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeKey, GraphError> {
        if self.id_to_edge.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdgeId(edge.id));
        }
        let from = self.require_key(&edge.source)?;
        let to = self.require_key(&edge.target)?;
        let id = edge.id.clone();
        let key = self.inner.add_edge(from, to, edge);
        self.id_to_edge.insert(id, key);
        Ok(key)
    }

    /// Like [`Graph::add_edge`], but refuses an edge that would close a cycle.
    pub fn add_edge_acyclic(&mut self, edge: Edge) -> Result<EdgeKey, GraphError> {
        let from = self.require_key(&edge.source)?;
        let to = self.require_key(&edge.target)?;
        if from == to || has_path_connecting(&self.inner, to, from, None) {
            return Err(GraphError::CycleDetected(vec![
                edge.source.clone(),
                edge.target.clone(),
            ]));
        }
        self.add_edge(edge)
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let key = self.id_to_edge.remove(id)?;
        self.inner.remove_edge(key)
    }

    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        let key = *self.id_to_edge.get(id)?;
        self.inner.edge_weight(key)
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        let key = *self.id_to_node.get(id)?;
        self.inner.node_weight(key)
    }

    /// Get a mutable node by id. The id itself must not be changed through this handle.
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let key = *self.id_to_node.get(id)?;
        self.inner.node_weight_mut(key)
    }

    pub fn get_node_by_key(&self, key: NodeKey) -> Option<&Node> {
        self.inner.node_weight(key)
    }

    pub fn node_key(&self, id: &str) -> Option<NodeKey> {
        self.id_to_node.get(id).copied()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    /// Direct parents (sources of incoming edges), oldest first, each listed once.
    pub fn get_parents(&self, id: &str) -> Vec<&Node> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Direct children (targets of outgoing edges), oldest first, each listed once.
    pub fn get_children(&self, id: &str) -> Vec<&Node> {
        self.neighbors(id, Direction::Outgoing)
    }

    pub fn get_root_nodes(&self) -> Vec<&Node> {
        self.nodes_without(Direction::Incoming)
    }

    pub fn get_leaf_nodes(&self) -> Vec<&Node> {
        self.nodes_without(Direction::Outgoing)
    }

    /// Iterate outgoing neighbor keys for a node (one entry per edge)
    pub fn out_neighbors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.inner.neighbors_directed(key, Direction::Outgoing)
    }

    /// Iterate incoming neighbor keys for a node (one entry per edge)
    pub fn in_neighbors(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.inner.neighbors_directed(key, Direction::Incoming)
    }

    /// Iterate over all nodes as (key, node) pairs
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.inner
            .node_indices()
            .map(move |idx| (idx, &self.inner[idx]))
    }

    /// All node keys, oldest node first.
    pub fn keys_by_creation(&self) -> Vec<NodeKey> {
        let mut nodes: Vec<&Node> = self.inner.node_weights().collect();
        sort_by_creation(&mut nodes);
        nodes
            .into_iter()
            .filter_map(|node| self.node_key(&node.id))
            .collect()
    }

    /// Iterate over all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.inner.edge_references().map(|e| e.weight())
    }

    /// Check if a directed edge exists from `from` to `to`
    pub fn has_edge_between(&self, from: &str, to: &str) -> bool {
        match (self.node_key(from), self.node_key(to)) {
            (Some(from), Some(to)) => self.inner.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Count of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Count of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Keys of every ancestor of `seeds` (transitive incoming edges).
    ///
    /// Seeds are only included when they are themselves an ancestor of another seed.
    /// The `visited` set bounds the walk on cyclic or heavily shared graphs.
    pub fn ancestor_keys(&self, seeds: &[NodeKey]) -> HashSet<NodeKey> {
        let mut visited: HashSet<NodeKey> = HashSet::new();
        let mut stack: Vec<NodeKey> = Vec::new();
        for &seed in seeds {
            stack.extend(self.in_neighbors(seed));
        }
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            stack.extend(self.in_neighbors(key).filter(|parent| !visited.contains(parent)));
        }
        visited
    }

    /// Every ancestor of `id`, oldest first. Excludes `id` unless it sits on a cycle.
    pub fn get_ancestors(&self, id: &str) -> Vec<&Node> {
        let Some(key) = self.node_key(id) else {
            return Vec::new();
        };
        let mut ancestors: Vec<&Node> = self
            .ancestor_keys(&[key])
            .into_iter()
            .filter_map(|k| self.inner.node_weight(k))
            .collect();
        sort_by_creation(&mut ancestors);
        ancestors
    }

    /// `Ok` when the edge set is a DAG; otherwise the ids of every node on a cycle.
    pub fn validate_acyclic(&self) -> Result<(), GraphError> {
        let mut cyclic: Vec<&Node> = tarjan_scc(&self.inner)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&key| self.inner.find_edge(key, key).is_some())
            })
            .flatten()
            .filter_map(|key| self.inner.node_weight(key))
            .collect();
        if cyclic.is_empty() {
            return Ok(());
        }
        sort_by_creation(&mut cyclic);
        Err(GraphError::CycleDetected(
            cyclic.into_iter().map(|node| node.id.clone()).collect(),
        ))
    }

    /// Serialize the graph to its plain-data snapshot
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<&Node> = self.nodes().map(|(_, node)| node).collect();
        sort_by_creation(&mut nodes);
        let nodes = nodes.into_iter().map(Node::to_persisted).collect();

        let edges = self
            .edges()
            .map(|edge| PersistedEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                edge_type: edge.edge_type.as_str().to_string(),
            })
            .collect();

        let tags = self
            .tags
            .iter()
            .map(|(color, tag)| {
                (
                    color.clone(),
                    PersistedTag {
                        name: tag.name.clone(),
                        color: tag.color.clone(),
                    },
                )
            })
            .collect();

        GraphSnapshot { nodes, edges, tags }
    }

    /// Rebuild a graph from a snapshot with default configuration
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        Self::from_snapshot_with_config(snapshot, &CanvasConfig::default())
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Loading is lenient: duplicate ids, dangling edges and off-palette tags are
    /// dropped with a warning instead of failing the whole restore.
    pub fn from_snapshot_with_config(snapshot: &GraphSnapshot, config: &CanvasConfig) -> Self {
        let mut graph = Graph::with_config(config);

        for (color, ptag) in &snapshot.tags {
            if let Err(e) = graph.create_tag(color, &ptag.name) {
                warn!("Dropping snapshot tag: {e}");
            }
        }

        for pnode in &snapshot.nodes {
            let mut node = Node::from_persisted(pnode, &graph.sizes);
            node.tags = graph.defined_tags(&node.id, std::mem::take(&mut node.tags));
            if let Err(e) = graph.add_node(node) {
                warn!("Dropping snapshot node: {e}");
            }
        }

        for pedge in &snapshot.edges {
            let edge = Edge::with_id(
                pedge.id.clone(),
                pedge.source.clone(),
                pedge.target.clone(),
                EdgeType::from(pedge.edge_type.as_str()),
            );
            if let Err(e) = graph.add_edge(edge) {
                warn!("Dropping snapshot edge {}: {e}", pedge.id);
            }
        }

        debug!(
            "restored graph with {} node(s), {} edge(s), {} tag(s)",
            graph.node_count(),
            graph.edge_count(),
            graph.tags.len()
        );
        graph
    }

    fn require_key(&self, id: &str) -> Result<NodeKey, GraphError> {
        self.node_key(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&Node> {
        let Some(key) = self.node_key(id) else {
            return Vec::new();
        };
        let mut seen: HashSet<NodeKey> = HashSet::new();
        let mut found: Vec<&Node> = self
            .inner
            .neighbors_directed(key, direction)
            .filter(|neighbor| seen.insert(*neighbor))
            .filter_map(|neighbor| self.inner.node_weight(neighbor))
            .collect();
        sort_by_creation(&mut found);
        found
    }

    fn nodes_without(&self, direction: Direction) -> Vec<&Node> {
        let mut found: Vec<&Node> = self
            .inner
            .node_indices()
            .filter(|&key| {
                self.inner
                    .neighbors_directed(key, direction)
                    .next()
                    .is_none()
            })
            .map(|key| &self.inner[key])
            .collect();
        sort_by_creation(&mut found);
        found
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Order nodes by `created_at`, falling back to id so equal stamps stay deterministic.
pub(crate) fn sort_by_creation(nodes: &mut [&Node]) {
    nodes.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
