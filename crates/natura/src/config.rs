//! Toolkit configuration

use std::path::Path;

use anyhow::Context;
use natura_dom::HostConfig;
use natura_track::TrackConfig;
use serde::{Deserialize, Serialize};

/// Host and widget configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub host: HostConfig,
    pub track: TrackConfig,
}

impl ToolkitConfig {
    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid toolkit configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize toolkit configuration")
    }
}
