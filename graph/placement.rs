/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Incremental placement of a new node next to its parents.
//!
//! Candidates are tested against every node's padded bounding box: first
//! pushed down in fixed steps, then moved one column right, a bounded number
//! of times. If every column is full the node goes below everything, which
//! cannot overlap.

use euclid::default::{Box2D, Point2D, Size2D};
use log::debug;

use super::{Graph, Node};
use crate::layout::{node_box, padded_overlap};

impl Graph {
    /// Position for a new default-sized node whose parents are `parent_ids`.
    pub fn auto_position(&self, parent_ids: &[&str]) -> Point2D<f32> {
        self.auto_position_sized(parent_ids, self.sizes().default.to_size())
    }

    /// Position for a new node of `size`. Unknown parent ids are ignored.
    pub fn auto_position_sized(&self, parent_ids: &[&str], size: Size2D<f32>) -> Point2D<f32> {
        let config = self.placement();
        let parents: Vec<&Node> = parent_ids
            .iter()
            .filter_map(|id| self.get_node(id))
            .collect();

        let base = match parents.as_slice() {
            [] => config.origin(),
            [parent] => Point2D::new(
                parent.position.x + parent.width + config.horizontal_gap,
                parent.position.y,
            ),
            many => {
                let right_edge = many
                    .iter()
                    .map(|p| p.position.x + p.width)
                    .fold(f32::MIN, f32::max);
                let mean_y =
                    many.iter().map(|p| p.position.y).sum::<f32>() / many.len() as f32;
                Point2D::new(right_edge + config.horizontal_gap, mean_y)
            },
        };

        let occupied: Vec<Box2D<f32>> = self
            .nodes()
            .map(|(_, node)| node_box(node.position, node.size()))
            .collect();
        let is_free = |candidate: Point2D<f32>| {
            let candidate = node_box(candidate, size);
            !occupied
                .iter()
                .any(|other| padded_overlap(&candidate, other, config.padding))
        };

        let mut column_x = base.x;
        for _ in 0..config.max_columns.max(1) {
            let mut candidate = Point2D::new(column_x, base.y);
            for _ in 0..config.max_attempts.max(1) {
                if is_free(candidate) {
                    return candidate;
                }
                candidate.y += config.vertical_step;
            }
            column_x += size.width + config.horizontal_gap;
        }

        let lowest = occupied
            .iter()
            .map(|b| b.max.y)
            .fold(base.y - config.padding, f32::max);
        debug!("auto_position exhausted its columns, placing below all nodes");
        Point2D::new(base.x, lowest + config.padding)
    }
}
