/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph core for a branching chat canvas.
//!
//! - [`graph`]: node/edge/tag storage with O(1) parent and child lookup
//! - [`context`]: ancestor-closure context resolution for LLM requests
//! - [`layout`]: layered, force-directed and overlap-resolving placement
//! - [`persistence`]: plain-data snapshot shape used by the storage layer
//! - [`config`]: tunable sizes, gaps and physics constants

pub mod config;
pub mod context;
pub mod graph;
pub mod layout;
pub mod persistence;

pub use config::CanvasConfig;
pub use context::{ContextMessage, Role};
pub use graph::{Edge, EdgeType, Graph, GraphError, Node, NodeType, NodeUpdate};
pub use layout::{LayoutReport, SizeOverrides};
pub use persistence::types::GraphSnapshot;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
