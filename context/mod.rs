/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Context resolution: turn the "current" nodes into the message list an LLM call sees.
//!
//! Topology decides inclusion (seeds plus their ancestor closure); creation
//! time decides order. Shared ancestors appear once no matter how many seeds
//! reach them.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Node, NodeKey, NodeType, sort_by_creation};

/// Characters per token for [`Graph::estimate_tokens`].
pub const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Human-authored and user-curated kinds speak as the user; everything else as the assistant.
    pub fn for_node_type(node_type: &NodeType) -> Self {
        match node_type {
            NodeType::Human | NodeType::Highlight | NodeType::Note | NodeType::Image => Role::User,
            _ => Role::Assistant,
        }
    }
}

/// One message of resolved context, in the shape the LLM transport consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMessage {
    pub role: Role,
    pub content: String,
    pub node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl From<&Node> for ContextMessage {
    fn from(node: &Node) -> Self {
        Self {
            role: Role::for_node_type(&node.node_type),
            content: node.content.clone(),
            node_id: node.id.clone(),
            image_data: node.image_data.clone(),
            mime_type: node.mime_type.clone(),
        }
    }
}

impl Graph {
    fn seed_keys(&self, node_ids: &[&str]) -> Vec<NodeKey> {
        node_ids.iter().filter_map(|id| self.node_key(id)).collect()
    }

    /// Seeds plus every ancestor, oldest first, each node once. Unknown ids are skipped.
    pub fn context_nodes(&self, node_ids: &[&str]) -> Vec<&Node> {
        let seeds = self.seed_keys(node_ids);
        let mut included: HashSet<NodeKey> = self.ancestor_keys(&seeds);
        included.extend(seeds);
        let mut nodes: Vec<&Node> = included
            .into_iter()
            .filter_map(|key| self.get_node_by_key(key))
            .collect();
        sort_by_creation(&mut nodes);
        nodes
    }

    /// Ordered, de-duplicated message list for an LLM request.
    pub fn resolve_context(&self, node_ids: &[&str]) -> Vec<ContextMessage> {
        self.context_nodes(node_ids)
            .into_iter()
            .map(ContextMessage::from)
            .collect()
    }

    /// Ids of every ancestor of `node_ids`, for highlighting. Seeds appear only
    /// when one seed is an ancestor of another.
    pub fn get_ancestor_ids(&self, node_ids: &[&str]) -> BTreeSet<String> {
        let seeds = self.seed_keys(node_ids);
        self.ancestor_keys(&seeds)
            .into_iter()
            .filter_map(|key| self.get_node_by_key(key))
            .map(|node| node.id.clone())
            .collect()
    }

    /// Rough token count of the resolved context (characters / 4, rounded up).
    pub fn estimate_tokens(&self, node_ids: &[&str]) -> usize {
        let chars: usize = self
            .context_nodes(node_ids)
            .iter()
            .map(|node| node.content.chars().count())
            .sum();
        chars.div_ceil(CHARS_PER_TOKEN)
    }
}
