/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pairwise separation of padded bounding boxes.
//!
//! Each pass visits every overlapping pair once and pushes both boxes apart
//! along the line between their centers, far enough to clear the padding on at
//! least one axis. Later pairs in the same pass see the moved boxes, so a pass
//! can create new overlaps; passes repeat until one moves nothing.

use euclid::default::Box2D;
use log::{debug, warn};

use super::{
    SizeOverrides, effective_size, node_box, padded_overlap, separation_direction,
    separation_needed,
};
use crate::config::OverlapConfig;
use crate::graph::{Graph, NodeKey};

/// Extra push past the exact clearance so float rounding cannot leave a pair touching.
const NUDGE: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapReport {
    /// Passes that moved at least one box.
    pub iterations: usize,
    pub converged: bool,
}

/// Separate `boxes` in place until no two are closer than `padding`.
pub fn resolve_boxes(boxes: &mut [Box2D<f32>], padding: f32, max_iterations: usize) -> OverlapReport {
    for iteration in 0..max_iterations {
        let mut moved = false;
        for i in 0..boxes.len() {
            for j in i + 1..boxes.len() {
                let Some(need) = separation_needed(&boxes[i], &boxes[j], padding) else {
                    continue;
                };
                let (direction, _) =
                    separation_direction(boxes[i].center(), boxes[j].center(), i, j);
                let along_x = if direction.x.abs() > 1e-6 {
                    need.x / (2.0 * direction.x.abs())
                } else {
                    f32::INFINITY
                };
                let along_y = if direction.y.abs() > 1e-6 {
                    need.y / (2.0 * direction.y.abs())
                } else {
                    f32::INFINITY
                };
                let push = direction * (along_x.min(along_y) + NUDGE);
                boxes[i] = boxes[i].translate(push);
                boxes[j] = boxes[j].translate(-push);
                moved = true;
            }
        }
        if !moved {
            return OverlapReport {
                iterations: iteration,
                converged: true,
            };
        }
    }

    OverlapReport {
        iterations: max_iterations,
        converged: !any_overlap(boxes, padding),
    }
}

fn any_overlap(boxes: &[Box2D<f32>], padding: f32) -> bool {
    boxes.iter().enumerate().any(|(i, a)| {
        boxes[i + 1..]
            .iter()
            .any(|b| padded_overlap(a, b, padding))
    })
}

/// Push overlapping nodes apart. Pairs are visited in creation order, so the
/// result is deterministic for a given graph.
pub fn resolve_overlaps(
    graph: &mut Graph,
    overrides: &SizeOverrides,
    config: &OverlapConfig,
) -> OverlapReport {
    let keys: Vec<NodeKey> = graph.keys_by_creation();
    let mut boxes: Vec<Box2D<f32>> = keys
        .iter()
        .filter_map(|key| graph.get_node_by_key(*key))
        .map(|node| node_box(node.position, effective_size(node, overrides)))
        .collect();

    let report = resolve_boxes(&mut boxes, config.padding, config.max_iterations);

    for (key, resolved) in keys.iter().zip(&boxes) {
        if let Some(node) = graph.inner.node_weight_mut(*key) {
            node.position = resolved.min;
        }
    }

    if report.converged {
        debug!(
            "overlap resolution settled {} node(s) after {} pass(es)",
            boxes.len(),
            report.iterations
        );
    } else {
        warn!(
            "Overlap resolution gave up after {} pass(es); some nodes still overlap",
            report.iterations
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, NodeType};
    use euclid::default::{Point2D, Size2D};
    use proptest::prelude::*;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Box2D<f32> {
        node_box(Point2D::new(x, y), Size2D::new(w, h))
    }

    #[test]
    fn separated_boxes_are_untouched() {
        let original = [boxed(0.0, 0.0, 100.0, 100.0), boxed(200.0, 0.0, 100.0, 100.0)];
        let mut boxes = original;
        let report = resolve_boxes(&mut boxes, 20.0, 10);
        assert_eq!(
            report,
            OverlapReport {
                iterations: 0,
                converged: true
            }
        );
        assert_eq!(boxes, original);
    }

    #[test]
    fn horizontal_overlap_splits_along_x() {
        let mut boxes = [boxed(0.0, 0.0, 100.0, 100.0), boxed(50.0, 0.0, 100.0, 100.0)];
        let report = resolve_boxes(&mut boxes, 20.0, 10);
        assert!(report.converged);
        assert_eq!(report.iterations, 1);
        assert_eq!(boxes[0].min.y, 0.0);
        assert_eq!(boxes[1].min.y, 0.0);
        assert!(boxes[1].min.x - boxes[0].max.x >= 20.0);
        // Both boxes move, by the same amount.
        assert!(((0.0 - boxes[0].min.x) - (boxes[1].min.x - 50.0)).abs() < 1e-3);
    }

    #[test]
    fn coincident_boxes_are_separated() {
        let mut boxes = [boxed(10.0, 10.0, 80.0, 40.0); 3];
        let report = resolve_boxes(&mut boxes, 20.0, 50);
        assert!(report.converged);
        assert!(!any_overlap(&boxes, 20.0));
    }

    #[test]
    fn zero_budget_reports_unresolved() {
        let mut boxes = [boxed(0.0, 0.0, 100.0, 100.0), boxed(10.0, 10.0, 100.0, 100.0)];
        let report = resolve_boxes(&mut boxes, 20.0, 0);
        assert!(!report.converged);
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn graph_positions_are_written_back() {
        let mut graph = Graph::new();
        for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
            graph
                .add_node(
                    Node::new(id, NodeType::Note, "")
                        .with_position(Point2D::new(100.0, 100.0))
                        .with_created_at(i as u64),
                )
                .unwrap();
        }
        let mut overrides = SizeOverrides::new();
        overrides.insert("c".to_string(), Size2D::new(50.0, 50.0));
        let config = OverlapConfig::default();

        let report = resolve_overlaps(&mut graph, &overrides, &config);
        assert!(report.converged);

        let boxes: Vec<_> = graph
            .nodes()
            .map(|(_, node)| node_box(node.position, effective_size(node, &overrides)))
            .collect();
        assert!(!any_overlap(&boxes, config.padding));
    }

    fn arb_boxes() -> impl Strategy<Value = Vec<Box2D<f32>>> {
        prop::collection::vec((0f32..400.0, 0f32..400.0, 20f32..300.0, 20f32..300.0), 2..12)
            .prop_map(|specs| {
                specs
                    .into_iter()
                    .map(|(x, y, w, h)| boxed(x, y, w, h))
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn resolution_leaves_no_padded_overlap(mut boxes in arb_boxes()) {
            let sizes: Vec<_> = boxes.iter().map(|b| b.size()).collect();
            let report = resolve_boxes(&mut boxes, 20.0, 200);
            prop_assert!(report.converged);
            prop_assert!(!any_overlap(&boxes, 20.0));
            for (resolved, size) in boxes.iter().zip(sizes) {
                prop_assert!((resolved.width() - size.width).abs() < 1e-2);
                prop_assert!((resolved.height() - size.height).abs() < 1e-2);
            }
        }
    }
}
