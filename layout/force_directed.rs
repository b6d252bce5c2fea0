/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Force-directed layout.
//!
//! A damped spring/charge simulation over node centers: inverse-square
//! repulsion between every pair, Hooke springs along edges. The result is
//! shifted so its top-left corner sits at the configured origin and then handed
//! to the overlap resolver, since the simulation alone does not guarantee
//! separation.

use std::collections::HashMap;

use euclid::default::{Box2D, Point2D, Size2D, Vector2D};
use log::debug;

use super::overlap::resolve_overlaps;
use super::{
    LayoutReport, SizeOverrides, effective_size, node_box, separation_direction,
    separation_needed,
};
use crate::config::{ForceDirectedConfig, OverlapConfig};
use crate::graph::{Graph, NodeKey};

/// Lower bound on the repulsion distance floor, whatever the config says.
const MIN_DISTANCE_FLOOR: f32 = 1e-3;

struct Body {
    key: NodeKey,
    position: Point2D<f32>,
    velocity: Vector2D<f32>,
    size: Size2D<f32>,
}

impl Body {
    fn center(&self) -> Point2D<f32> {
        self.position + self.size.to_vector() / 2.0
    }

    fn bounds(&self) -> Box2D<f32> {
        node_box(self.position, self.size)
    }

    fn half_diagonal(&self) -> f32 {
        self.size.to_vector().length() / 2.0
    }
}

/// Nodes with a non-finite position go onto a square grid at the origin.
fn seed_unplaced(bodies: &mut [Body], config: &ForceDirectedConfig) {
    let unplaced: Vec<usize> = bodies
        .iter()
        .enumerate()
        .filter(|(_, body)| !(body.position.x.is_finite() && body.position.y.is_finite()))
        .map(|(index, _)| index)
        .collect();
    if unplaced.is_empty() {
        return;
    }

    let columns = (unplaced.len() as f32).sqrt().ceil().max(1.0) as usize;
    let cell = bodies
        .iter()
        .map(|body| body.size)
        .fold(Size2D::zero(), |acc: Size2D<f32>, size| {
            Size2D::new(acc.width.max(size.width), acc.height.max(size.height))
        });
    let origin = config.origin();
    let seeded = unplaced.len();
    for (slot, index) in unplaced.into_iter().enumerate() {
        let (row, column) = (slot / columns, slot % columns);
        bodies[index].position = Point2D::new(
            origin.x + column as f32 * (cell.width + config.grid_spacing),
            origin.y + row as f32 * (cell.height + config.grid_spacing),
        );
    }
    debug!("seeded {seeded} unplaced node(s) onto a {columns}-column grid");
}

fn step(bodies: &mut [Body], springs: &[(usize, usize)], config: &ForceDirectedConfig) {
    let mut forces = vec![Vector2D::<f32>::zero(); bodies.len()];

    for i in 0..bodies.len() {
        for j in i + 1..bodies.len() {
            let (direction, distance) =
                separation_direction(bodies[i].center(), bodies[j].center(), i, j);
            let clamped = distance.max(config.min_distance.max(MIN_DISTANCE_FLOOR));
            let mut magnitude = config.repulsion / (clamped * clamped);
            let overlap =
                separation_needed(&bodies[i].bounds(), &bodies[j].bounds(), config.padding);
            if let Some(need) = overlap {
                magnitude += config.overlap_strength * need.x.min(need.y);
            }
            forces[i] += direction * magnitude;
            forces[j] -= direction * magnitude;
        }
    }

    for &(source, target) in springs {
        let delta = bodies[target].center() - bodies[source].center();
        let distance = delta.length();
        if distance < 1e-3 {
            continue;
        }
        let rest = bodies[source].half_diagonal()
            + bodies[target].half_diagonal()
            + config.extra_spacing;
        let pull = delta / distance * (config.attraction * (distance - rest));
        forces[source] += pull;
        forces[target] -= pull;
    }

    for (body, force) in bodies.iter_mut().zip(forces) {
        let mut velocity = (body.velocity + force) * config.damping;
        let speed = velocity.length();
        if speed > config.max_velocity {
            velocity = velocity * (config.max_velocity / speed);
        }
        body.velocity = velocity;
        body.position += velocity;
    }
}

/// Run the simulation over every node, then resolve leftover overlaps.
///
/// Positions and velocities are written back to the graph. Cycles are
/// irrelevant here: springs only care about adjacency.
pub fn force_directed_layout(
    graph: &mut Graph,
    overrides: &SizeOverrides,
    config: &ForceDirectedConfig,
    overlap: &OverlapConfig,
) -> LayoutReport {
    let mut bodies: Vec<Body> = graph
        .keys_by_creation()
        .into_iter()
        .filter_map(|key| {
            let node = graph.get_node_by_key(key)?;
            Some(Body {
                key,
                position: node.position,
                velocity: Vector2D::zero(),
                size: effective_size(node, overrides),
            })
        })
        .collect();
    if bodies.is_empty() {
        return LayoutReport::default();
    }
    seed_unplaced(&mut bodies, config);

    let slots: HashMap<NodeKey, usize> = bodies
        .iter()
        .enumerate()
        .map(|(index, body)| (body.key, index))
        .collect();
    let springs: Vec<(usize, usize)> = graph
        .edges()
        .filter_map(|edge| {
            let source = *slots.get(&graph.node_key(&edge.source)?)?;
            let target = *slots.get(&graph.node_key(&edge.target)?)?;
            (source != target).then_some((source, target))
        })
        .collect();

    for _ in 0..config.iterations {
        step(&mut bodies, &springs, config);
    }

    let min_corner = bodies.iter().fold(
        Point2D::new(f32::INFINITY, f32::INFINITY),
        |acc: Point2D<f32>, body| acc.min(body.position),
    );
    let shift = config.origin() - min_corner;
    for body in &mut bodies {
        body.position += shift;
        if let Some(node) = graph.inner.node_weight_mut(body.key) {
            node.position = body.position;
            node.velocity = body.velocity;
        }
    }
    debug!(
        "force-directed layout ran {} iteration(s) over {} node(s) and {} spring(s)",
        config.iterations,
        bodies.len(),
        springs.len()
    );

    let overlap = resolve_overlaps(graph, overrides, overlap);
    LayoutReport {
        placed: bodies.len(),
        cycle: None,
        overlap: Some(overlap),
    }
}
