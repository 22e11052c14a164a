use crate::catalog::SearchResponse;
use crate::scene::Scene;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Decoded scenes from one search, tagged with the selection that produced
/// them.
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct SearchResults {
    selection_id: String,
    status: Option<String>,
    scenes: Vec<Scene>,
}

impl SearchResults {
    pub fn new(selection_id: &str, response: SearchResponse) -> Self {
        Self {
            selection_id: selection_id.to_string(),
            status: response.status,
            scenes: response.scenes,
        }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let results: Self = serde_json::from_str(&content)?;
        Ok(results)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes whose full-scene cloud cover is at most `percent`.
    pub fn below_cloud_cover(&self, percent: f32) -> Vec<&Scene> {
        self.scenes
            .iter()
            .filter(|s| s.cloud_cover <= percent)
            .collect()
    }
}
