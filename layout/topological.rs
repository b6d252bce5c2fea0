/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Deterministic layered layout.
//!
//! 1. Kahn's algorithm orders nodes parent-before-child, ties broken by `created_at`.
//! 2. A node's layer is one more than its deepest parent's layer.
//! 3. Each layer is a column as wide as its widest node.
//! 4. Rows start at the parents' mean y and search outward for a free slot.

use std::collections::{HashMap, HashSet, VecDeque};

use euclid::default::{Box2D, Point2D};
use log::{debug, warn};
use petgraph::Direction;

use super::{LayoutReport, SizeOverrides, effective_size, node_box, padded_overlap};
use crate::config::TopologicalConfig;
use crate::graph::{Graph, NodeKey};

/// Parent-before-child order plus whatever Kahn's algorithm could not reach.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologicalOrder {
    pub order: Vec<NodeKey>,
    /// Nodes on or downstream of a cycle, in creation order.
    pub unreached: Vec<NodeKey>,
}

impl TopologicalOrder {
    /// Full order with unreached nodes appended at the end.
    pub fn all(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.order.iter().chain(self.unreached.iter()).copied()
    }
}

fn sort_keys_by_creation(graph: &Graph, keys: &mut [NodeKey]) {
    keys.sort_by(|a, b| {
        let (Some(a), Some(b)) = (graph.get_node_by_key(*a), graph.get_node_by_key(*b)) else {
            return std::cmp::Ordering::Equal;
        };
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub fn topological_order(graph: &Graph) -> TopologicalOrder {
    let mut in_degree: HashMap<NodeKey, usize> = graph
        .inner
        .node_indices()
        .map(|key| {
            (
                key,
                graph
                    .inner
                    .neighbors_directed(key, Direction::Incoming)
                    .count(),
            )
        })
        .collect();

    let mut roots: Vec<NodeKey> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(key, _)| *key)
        .collect();
    sort_keys_by_creation(graph, &mut roots);

    let mut queue: VecDeque<NodeKey> = roots.into();
    let mut order = Vec::with_capacity(in_degree.len());
    while let Some(key) = queue.pop_front() {
        order.push(key);
        let mut ready: Vec<NodeKey> = Vec::new();
        for child in graph.out_neighbors(key) {
            if let Some(degree) = in_degree.get_mut(&child) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(child);
                }
            }
        }
        sort_keys_by_creation(graph, &mut ready);
        queue.extend(ready);
    }

    let reached: HashSet<NodeKey> = order.iter().copied().collect();
    let mut unreached: Vec<NodeKey> = graph
        .inner
        .node_indices()
        .filter(|key| !reached.contains(key))
        .collect();
    sort_keys_by_creation(graph, &mut unreached);

    TopologicalOrder { order, unreached }
}

fn layers_for(graph: &Graph, order: &TopologicalOrder) -> HashMap<NodeKey, usize> {
    let mut layers: HashMap<NodeKey, usize> = HashMap::new();
    for key in order.all() {
        let layer = graph
            .in_neighbors(key)
            .filter(|parent| *parent != key)
            .filter_map(|parent| layers.get(&parent))
            .max()
            .map_or(0, |deepest| deepest + 1);
        layers.insert(key, layer);
    }
    layers
}

/// Layer index per node id.
pub fn compute_layers(graph: &Graph) -> HashMap<String, usize> {
    let order = topological_order(graph);
    layers_for(graph, &order)
        .into_iter()
        .filter_map(|(key, layer)| Some((graph.get_node_by_key(key)?.id.clone(), layer)))
        .collect()
}

/// Lay out every node in columns by layer. Positions are written in place.
///
/// Cycles do not stop the pass: nodes Kahn's algorithm cannot reach are placed
/// after the rest and named in [`LayoutReport::cycle`].
pub fn topological_layout(
    graph: &mut Graph,
    overrides: &SizeOverrides,
    config: &TopologicalConfig,
) -> LayoutReport {
    let order = topological_order(graph);
    let layers = layers_for(graph, &order);

    let mut layer_widths: Vec<f32> = Vec::new();
    for key in order.all() {
        let (Some(node), Some(&layer)) = (graph.get_node_by_key(key), layers.get(&key)) else {
            continue;
        };
        if layer_widths.len() <= layer {
            layer_widths.resize(layer + 1, 0.0);
        }
        layer_widths[layer] = layer_widths[layer].max(effective_size(node, overrides).width);
    }

    let mut column_x = Vec::with_capacity(layer_widths.len());
    let mut x = config.start_x;
    for width in &layer_widths {
        column_x.push(x);
        x += width + config.horizontal_gap;
    }

    let mut placed_boxes: Vec<Box2D<f32>> = Vec::new();
    let mut placed: HashMap<NodeKey, Point2D<f32>> = HashMap::new();
    for key in order.all() {
        let Some(node) = graph.get_node_by_key(key) else {
            continue;
        };
        let size = effective_size(node, overrides);
        let x = layers
            .get(&key)
            .and_then(|layer| column_x.get(*layer))
            .copied()
            .unwrap_or(config.start_x);

        let parent_ys: Vec<f32> = graph
            .in_neighbors(key)
            .filter_map(|parent| placed.get(&parent).map(|p| p.y))
            .collect();
        let ideal_y = if parent_ys.is_empty() {
            config.start_y
        } else {
            parent_ys.iter().sum::<f32>() / parent_ys.len() as f32
        };

        let is_free = |y: f32| {
            let candidate = node_box(Point2D::new(x, y), size);
            !placed_boxes
                .iter()
                .any(|other| padded_overlap(&candidate, other, config.padding))
        };
        let offsets = std::iter::once(0.0).chain((1..=config.max_search_steps).flat_map(|step| {
            let offset = step as f32 * config.search_step;
            [offset, -offset]
        }));
        let y = offsets
            .map(|offset| ideal_y + offset)
            .find(|y| is_free(*y))
            .unwrap_or_else(|| {
                let lowest = placed_boxes
                    .iter()
                    .map(|b| b.max.y)
                    .fold(f32::MIN, f32::max);
                lowest + config.padding
            });

        let position = Point2D::new(x, y);
        placed_boxes.push(node_box(position, size));
        placed.insert(key, position);
    }

    for (key, position) in &placed {
        if let Some(node) = graph.inner.node_weight_mut(*key) {
            node.position = *position;
        }
    }

    let cycle = if order.unreached.is_empty() {
        None
    } else {
        let ids: Vec<String> = order
            .unreached
            .iter()
            .filter_map(|key| graph.get_node_by_key(*key))
            .map(|node| node.id.clone())
            .collect();
        warn!(
            "Topological layout found {} node(s) on or behind a cycle: {}",
            ids.len(),
            ids.join(", ")
        );
        Some(ids)
    };

    debug!(
        "topological layout placed {} node(s) in {} layer(s)",
        placed.len(),
        layer_widths.len()
    );
    LayoutReport {
        placed: placed.len(),
        cycle,
        overlap: None,
    }
}
