/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashMap;

use crate::config::ForceDirectedConfig;

pub const FORCE_ID_DEFAULT: &str = "force:default";
pub const FORCE_ID_COMPACT: &str = "force:compact";
pub const FORCE_ID_SPACIOUS: &str = "force:spacious";

#[derive(Debug, Clone)]
pub struct ForceProfileResolution {
    pub requested_id: String,
    pub resolved_id: String,
    pub matched: bool,
    pub fallback_used: bool,
    pub profile: ForceDirectedConfig,
}

/// Named force-directed presets, looked up case- and whitespace-insensitively.
pub struct ForceProfileRegistry {
    profiles: HashMap<String, ForceDirectedConfig>,
    fallback_id: String,
}

impl ForceProfileRegistry {
    pub fn register(&mut self, force_id: &str, profile: ForceDirectedConfig) {
        self.profiles
            .insert(force_id.trim().to_ascii_lowercase(), profile);
    }

    pub fn register_builtin_profiles(&mut self) {
        self.register(FORCE_ID_DEFAULT, ForceDirectedConfig::default());
        self.register(FORCE_ID_COMPACT, compact());
        self.register(FORCE_ID_SPACIOUS, spacious());
    }

    pub fn resolve(&self, force_id: &str) -> ForceProfileResolution {
        let requested = force_id.trim().to_ascii_lowercase();
        if let Some(profile) = self.profiles.get(&requested).cloned() {
            return ForceProfileResolution {
                resolved_id: requested.clone(),
                requested_id: requested,
                matched: true,
                fallback_used: false,
                profile,
            };
        }

        ForceProfileResolution {
            requested_id: requested,
            resolved_id: self.fallback_id.clone(),
            matched: false,
            fallback_used: true,
            profile: self
                .profiles
                .get(&self.fallback_id)
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

impl Default for ForceProfileRegistry {
    fn default() -> Self {
        let mut registry = Self {
            profiles: HashMap::new(),
            fallback_id: FORCE_ID_DEFAULT.to_string(),
        };
        registry.register_builtin_profiles();
        registry
    }
}

/// Short springs and weak charge: dense clusters, more resolver work.
fn compact() -> ForceDirectedConfig {
    ForceDirectedConfig {
        repulsion: 8_000.0,
        extra_spacing: 10.0,
        padding: 10.0,
        grid_spacing: 30.0,
        ..ForceDirectedConfig::default()
    }
}

fn spacious() -> ForceDirectedConfig {
    ForceDirectedConfig {
        repulsion: 40_000.0,
        extra_spacing: 120.0,
        padding: 40.0,
        grid_spacing: 120.0,
        ..ForceDirectedConfig::default()
    }
}
