/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Tunable constants for node sizing, placement and the layout engines.
//!
//! Every struct deserializes with `#[serde(default)]`, so a TOML document only
//! needs the keys it wants to change:
//!
//! ```toml
//! [force]
//! iterations = 80
//! damping = 0.7
//!
//! [sizes.types.matrix]
//! width = 640.0
//! height = 420.0
//! ```

use std::collections::HashMap;

use euclid::default::{Point2D, Size2D};
use serde::{Deserialize, Serialize};

use crate::graph::{GraphError, NodeType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f32,
    pub height: f32,
}

impl NodeSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_size(self) -> Size2D<f32> {
        Size2D::new(self.width, self.height)
    }
}

/// Default node dimensions, keyed by the node type's string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizeTable {
    pub default: NodeSize,
    pub types: HashMap<String, NodeSize>,
}

impl NodeSizeTable {
    pub const DEFAULT_WIDTH: f32 = 420.0;
    pub const DEFAULT_HEIGHT: f32 = 200.0;

    pub fn size_for(&self, node_type: &NodeType) -> Size2D<f32> {
        self.types
            .get(node_type.as_str())
            .copied()
            .unwrap_or(self.default)
            .to_size()
    }
}

impl Default for NodeSizeTable {
    fn default() -> Self {
        let types = [
            ("matrix", NodeSize::new(600.0, 400.0)),
            ("image", NodeSize::new(320.0, 280.0)),
            ("flashcard", NodeSize::new(380.0, 220.0)),
            ("cell", NodeSize::new(420.0, 300.0)),
        ]
        .into_iter()
        .map(|(key, size)| (key.to_string(), size))
        .collect();
        Self {
            default: NodeSize::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            types,
        }
    }
}

/// Incremental placement next to parents (`Graph::auto_position`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub origin_x: f32,
    pub origin_y: f32,
    pub horizontal_gap: f32,
    /// Downward step applied to a colliding candidate.
    pub vertical_step: f32,
    pub padding: f32,
    pub max_attempts: usize,
    pub max_columns: usize,
}

impl PlacementConfig {
    pub fn origin(&self) -> Point2D<f32> {
        Point2D::new(self.origin_x, self.origin_y)
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 100.0,
            horizontal_gap: 80.0,
            vertical_step: 40.0,
            padding: 20.0,
            max_attempts: 20,
            max_columns: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologicalConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub horizontal_gap: f32,
    pub search_step: f32,
    /// Offsets tried on each side of the ideal row before falling back below everything.
    pub max_search_steps: usize,
    pub padding: f32,
}

impl Default for TopologicalConfig {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            start_y: 100.0,
            horizontal_gap: 100.0,
            search_step: 20.0,
            max_search_steps: 60,
            padding: 20.0,
        }
    }
}

/// Physics constants for the force-directed simulation.
///
/// The defaults settle two connected default-sized nodes to within about one
/// percent of the spring rest length well inside the iteration budget.
/// Lower `iterations` for cheaper (and less settled) test runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceDirectedConfig {
    pub iterations: usize,
    /// Inverse-square repulsion numerator.
    pub repulsion: f32,
    /// Hooke spring constant.
    pub attraction: f32,
    /// Multiplicative velocity decay per iteration, in `(0, 1)`.
    pub damping: f32,
    pub max_velocity: f32,
    /// Added to the summed half-diagonals to get the spring rest length.
    pub extra_spacing: f32,
    /// Corrective force per unit of padded-box overlap.
    pub overlap_strength: f32,
    pub padding: f32,
    /// Distance floor for the inverse-square term. Values below `1e-3` act as `1e-3`.
    pub min_distance: f32,
    /// Gap between cells when seeding unplaced nodes onto a grid.
    pub grid_spacing: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl ForceDirectedConfig {
    pub fn origin(&self) -> Point2D<f32> {
        Point2D::new(self.origin_x, self.origin_y)
    }
}

impl Default for ForceDirectedConfig {
    fn default() -> Self {
        Self {
            iterations: 300,
            repulsion: 20_000.0,
            attraction: 0.02,
            damping: 0.8,
            max_velocity: 50.0,
            extra_spacing: 40.0,
            overlap_strength: 0.5,
            padding: 20.0,
            min_distance: 10.0,
            grid_spacing: 60.0,
            origin_x: 100.0,
            origin_y: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    pub padding: f32,
    pub max_iterations: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            max_iterations: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub sizes: NodeSizeTable,
    pub placement: PlacementConfig,
    pub topological: TopologicalConfig,
    pub force: ForceDirectedConfig,
    pub overlap: OverlapConfig,
}

impl CanvasConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, GraphError> {
        toml::from_str(raw).map_err(|e| GraphError::Config(e.to_string()))
    }
}
