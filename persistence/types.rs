/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable types for the graph snapshot.
//!
//! Field names follow the canvas document format: `type` for the node and edge
//! kind, `imageData`/`mimeType` for image payloads. Anything else a node
//! carries lands in [`PersistedNode::payload`] untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Canvas position. Non-finite coordinates are written as `null` by
/// `serde_json` and read back as NaN, so unplaced nodes stay unplaced.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct PersistedPosition {
    #[serde(deserialize_with = "coordinate_or_nan")]
    pub x: f32,
    #[serde(deserialize_with = "coordinate_or_nan")]
    pub y: f32,
}

fn coordinate_or_nan<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}

/// Persisted node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub position: PersistedPosition,
    /// Missing sizes fall back to the size table for `node_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, alias = "createdAt")]
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "imageData", default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Type-specific fields (matrix cells, flashcard state, ...).
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Persisted edge.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PersistedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PersistedTag {
    pub name: String,
    pub color: String,
}

/// Full graph snapshot, keyed tags by palette color.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<PersistedNode>,
    #[serde(default)]
    pub edges: Vec<PersistedEdge>,
    #[serde(default)]
    pub tags: BTreeMap<String, PersistedTag>,
}
