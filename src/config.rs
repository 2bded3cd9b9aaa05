//! Engine configuration for bga
//!
//! Settings live in a TOML file with `[shortest_path]`, `[mst]` and
//! `[output]` tables. Every field has a default, so an empty file is valid.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::Result;

pub use types::{EngineConfig, MstConfig, OutputConfig, ShortestPathConfig};

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
