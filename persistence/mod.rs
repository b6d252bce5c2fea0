/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! JSON encoding of [`GraphSnapshot`].
//!
//! Storage is the host's job; this module only converts between the in-memory
//! graph and the plain document the host stores.

pub mod types;

use log::debug;

use crate::config::CanvasConfig;
use crate::graph::{Graph, GraphError};
use types::GraphSnapshot;

pub fn snapshot_to_json(snapshot: &GraphSnapshot) -> Result<String, GraphError> {
    serde_json::to_string(snapshot).map_err(|e| GraphError::Snapshot(e.to_string()))
}

pub fn snapshot_from_json(raw: &str) -> Result<GraphSnapshot, GraphError> {
    serde_json::from_str(raw).map_err(|e| GraphError::Snapshot(e.to_string()))
}

impl Graph {
    /// Serialize the whole graph to the snapshot JSON document.
    pub fn to_json(&self) -> Result<String, GraphError> {
        let json = snapshot_to_json(&self.to_snapshot())?;
        debug!("encoded graph snapshot ({} bytes)", json.len());
        Ok(json)
    }

    /// Parse a snapshot document. Malformed JSON is an error; bad entries inside
    /// a well-formed document are dropped as in [`Graph::from_snapshot`].
    pub fn from_json(raw: &str) -> Result<Self, GraphError> {
        Self::from_json_with_config(raw, &CanvasConfig::default())
    }

    pub fn from_json_with_config(raw: &str, config: &CanvasConfig) -> Result<Self, GraphError> {
        let snapshot = snapshot_from_json(raw)?;
        Ok(Self::from_snapshot_with_config(&snapshot, config))
    }
}
