//! Editor settings persisted between sessions

use crate::layout::PanelVisibility;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name used in the working directory
pub const SETTINGS_FILE: &str = "editor_settings.json";

/// Main editor settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Panels shown at start-up
    #[serde(default)]
    pub panels: PanelVisibility,

    /// Content browser tile edge in pixels
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: f32,

    /// Settings version for future migration support
    #[serde(default)]
    pub version: u32,
}

fn default_thumbnail_size() -> f32 {
    64.0
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            panels: PanelVisibility::default(),
            thumbnail_size: default_thumbnail_size(),
            version: 1,
        }
    }
}

impl EditorSettings {
    /// Get the default path for the settings file
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(SETTINGS_FILE)
    }

    /// Load from `path`, falling back to defaults when the file is missing or unreadable
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No editor settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load editor settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save settings to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        info!("Saved editor settings to {:?}", path.as_ref());
        Ok(())
    }

    /// Load settings from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(&path)?;
        let settings = serde_json::from_str(&content)?;
        info!("Loaded editor settings from {:?}", path.as_ref());
        Ok(settings)
    }
}
