/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Color tags: a fixed eight-entry palette, each color optionally named by the user.

use log::{debug, warn};

use super::{Graph, GraphError};

/// The only colors a tag may use.
pub const TAG_PALETTE: [&str; 8] = [
    "#ffc9c9", "#ffd8a8", "#fff3bf", "#c0eb75", "#a5d8ff", "#d0bfff", "#fcc2d7", "#e9ecef",
];

/// Case-insensitive palette lookup; returns the canonical (lowercase) entry.
fn palette_entry(color: &str) -> Option<&'static str> {
    let color = color.trim();
    TAG_PALETTE
        .iter()
        .copied()
        .find(|entry| entry.eq_ignore_ascii_case(color))
}

pub fn is_palette_color(color: &str) -> bool {
    palette_entry(color).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub name: String,
    pub color: String,
}

impl Graph {
    /// Define (or rename) the tag for a palette color.
    pub fn create_tag(&mut self, color: &str, name: &str) -> Result<(), GraphError> {
        let color = palette_entry(color)
            .ok_or_else(|| GraphError::InvalidTagColor(color.to_string()))?;
        self.tags.insert(
            color.to_string(),
            TagDefinition {
                name: name.to_string(),
                color: color.to_string(),
            },
        );
        Ok(())
    }

    /// Rename an existing tag. `Ok(false)` when the color has no tag yet.
    pub fn update_tag(&mut self, color: &str, name: &str) -> Result<bool, GraphError> {
        let color = palette_entry(color)
            .ok_or_else(|| GraphError::InvalidTagColor(color.to_string()))?;
        let Some(tag) = self.tags.get_mut(color) else {
            return Ok(false);
        };
        tag.name = name.to_string();
        Ok(true)
    }

    /// Remove a tag definition and strip the color from every node.
    pub fn delete_tag(&mut self, color: &str) -> bool {
        let Some(color) = palette_entry(color) else {
            return false;
        };
        if self.tags.remove(color).is_none() {
            return false;
        }
        let mut stripped = 0usize;
        for node in self.inner.node_weights_mut() {
            let before = node.tags.len();
            node.tags.retain(|tag| tag != color);
            stripped += before - node.tags.len();
        }
        debug!("deleted tag {color}, stripped from {stripped} node(s)");
        true
    }

    pub fn get_tag(&self, color: &str) -> Option<&TagDefinition> {
        self.tags.get(palette_entry(color)?)
    }

    /// Tag definitions in palette-color order.
    pub fn tags(&self) -> impl Iterator<Item = &TagDefinition> {
        self.tags.values()
    }

    /// Apply a defined tag to a node. Returns whether the node changed;
    /// re-adding a present tag, an undefined tag or a missing node is a no-op.
    pub fn add_tag_to_node(&mut self, node_id: &str, color: &str) -> bool {
        let Some(color) = palette_entry(color) else {
            return false;
        };
        if !self.tags.contains_key(color) {
            return false;
        }
        let Some(node) = self.get_node_mut(node_id) else {
            return false;
        };
        if node.tags.iter().any(|tag| tag == color) {
            return false;
        }
        node.tags.push(color.to_string());
        true
    }

    /// Returns whether the node changed; removing an absent tag is a no-op.
    pub fn remove_tag_from_node(&mut self, node_id: &str, color: &str) -> bool {
        let Some(color) = palette_entry(color) else {
            return false;
        };
        let Some(node) = self.get_node_mut(node_id) else {
            return false;
        };
        let before = node.tags.len();
        node.tags.retain(|tag| tag != color);
        node.tags.len() != before
    }

    /// Canonicalize a node's tag list against the defined tags, keeping the
    /// first occurrence of each color. Off-palette and undefined colors are dropped.
    pub(crate) fn defined_tags(&self, node_id: &str, tags: Vec<String>) -> Vec<String> {
        let mut kept: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let Some(color) = palette_entry(&tag).filter(|color| self.tags.contains_key(*color))
            else {
                warn!("Dropping undefined tag {tag:?} from node {node_id}");
                continue;
            };
            if !kept.iter().any(|existing| existing == color) {
                kept.push(color.to_string());
            }
        }
        kept
    }

    pub fn node_has_tag(&self, node_id: &str, color: &str) -> bool {
        let Some(color) = palette_entry(color) else {
            return false;
        };
        self.get_node(node_id)
            .is_some_and(|node| node.tags.iter().any(|tag| tag == color))
    }
}
