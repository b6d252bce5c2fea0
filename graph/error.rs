/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Errors from graph mutation, snapshot decoding and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Tag color is not one of the palette entries.
    InvalidTagColor(String),
    /// Edge endpoint (or explicit lookup) names a node that is not in the store.
    UnknownNode(String),
    DuplicateNodeId(String),
    DuplicateEdgeId(String),
    /// Ids of the nodes that take part in (or are blocked behind) a cycle.
    CycleDetected(Vec<String>),
    Snapshot(String),
    Config(String),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidTagColor(color) => write!(f, "Invalid tag color: {color}"),
            GraphError::UnknownNode(id) => write!(f, "Unknown node: {id}"),
            GraphError::DuplicateNodeId(id) => write!(f, "Duplicate node id: {id}"),
            GraphError::DuplicateEdgeId(id) => write!(f, "Duplicate edge id: {id}"),
            GraphError::CycleDetected(ids) => {
                write!(f, "Cycle detected among nodes: {}", ids.join(", "))
            },
            GraphError::Snapshot(e) => write!(f, "Snapshot error: {e}"),
            GraphError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for GraphError {}
