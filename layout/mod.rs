/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Full-graph layout engines and the padded bounding-box geometry they share.
//!
//! - [`topological`]: deterministic layered placement, parents left of children
//! - [`force_directed`]: repulsion/spring simulation, finished by the overlap pass
//! - [`overlap`]: last-mile separation of padded bounding boxes
//! - [`profile`]: named force-directed presets
//!
//! Engines mutate node positions in place. Measured sizes supplied by the
//! rendering layer in a [`SizeOverrides`] map take precedence over node defaults.

use std::collections::HashMap;

use euclid::default::{Box2D, Point2D, Size2D, Vector2D};

use crate::graph::Node;

pub mod force_directed;
pub mod overlap;
pub mod profile;
pub mod topological;

pub use force_directed::force_directed_layout;
pub use overlap::{OverlapReport, resolve_overlaps};
pub use profile::{ForceProfileRegistry, ForceProfileResolution};
pub use topological::{TopologicalOrder, compute_layers, topological_layout, topological_order};

/// Node id to measured size.
pub type SizeOverrides = HashMap<String, Size2D<f32>>;

/// What a full-graph layout pass did. Positions are already written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    pub placed: usize,
    /// Nodes that could not be ordered because they sit on (or behind) a cycle.
    pub cycle: Option<Vec<String>>,
    pub overlap: Option<OverlapReport>,
}

pub fn effective_size(node: &Node, overrides: &SizeOverrides) -> Size2D<f32> {
    overrides.get(&node.id).copied().unwrap_or_else(|| node.size())
}

pub fn node_box(position: Point2D<f32>, size: Size2D<f32>) -> Box2D<f32> {
    Box2D::from_origin_and_size(position, size)
}

/// True when the boxes are closer than `padding` on both axes.
///
/// Boxes exactly `padding` apart do not overlap.
pub fn padded_overlap(a: &Box2D<f32>, b: &Box2D<f32>, padding: f32) -> bool {
    a.min.x < b.max.x + padding
        && b.min.x < a.max.x + padding
        && a.min.y < b.max.y + padding
        && b.min.y < a.max.y + padding
}

/// Per-axis distance the two centers must still move apart to clear the padding.
/// `None` when the boxes do not overlap.
pub(crate) fn separation_needed(a: &Box2D<f32>, b: &Box2D<f32>, padding: f32) -> Option<Vector2D<f32>> {
    if !padded_overlap(a, b, padding) {
        return None;
    }
    let delta = a.center() - b.center();
    let need_x = (a.width() + b.width()) / 2.0 + padding - delta.x.abs();
    let need_y = (a.height() + b.height()) / 2.0 + padding - delta.y.abs();
    Some(Vector2D::new(need_x.max(0.0), need_y.max(0.0)))
}

/// Unit vector from `b` towards `a`, or a fixed per-pair direction when the
/// centers coincide so repeated runs separate the pair the same way.
pub(crate) fn separation_direction(
    from: Point2D<f32>,
    to: Point2D<f32>,
    i: usize,
    j: usize,
) -> (Vector2D<f32>, f32) {
    const GOLDEN_FRACTION: f32 = 0.618_034;
    let delta = from - to;
    let distance = delta.length();
    if distance > 1e-3 {
        return (delta / distance, distance);
    }
    let turns = ((i * 7 + j * 13) as f32 * GOLDEN_FRACTION).fract();
    let angle = turns * std::f32::consts::TAU;
    (Vector2D::new(angle.cos(), angle.sin()), distance)
}
