//! Panel configuration
//!
//! Loaded from `mockup.ron` in the working directory when present.
//! Every field has a default so partial files are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "mockup.ron";

/// How completed inbound decodes are applied when several are in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecodeOrder {
    /// Only the result of the most recent inbound message is applied
    #[default]
    Sequenced,
    /// Every completed decode is applied in completion order (last to finish wins)
    CompletionOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub window_width: i32,
    pub window_height: i32,
    /// Software framebuffer resolution of the model viewport
    pub viewport_width: usize,
    pub viewport_height: usize,
    /// Edge length of preset gallery thumbnails
    pub thumbnail_size: usize,
    /// Custom host images are downscaled to fit this edge length
    pub max_texture_size: u32,
    pub default_color: String,
    pub decode_order: DecodeOrder,
    /// How long status line messages stay visible
    pub status_seconds: f64,
    /// Fallback log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 600,
            viewport_width: 480,
            viewport_height: 480,
            thumbnail_size: 64,
            max_texture_size: 512,
            default_color: "#FFFFFF".to_string(),
            decode_order: DecodeOrder::default(),
            status_seconds: 3.0,
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    /// Parse a config from a RON string
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Load `path` if it exists, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
