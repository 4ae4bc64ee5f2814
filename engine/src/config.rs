//! Configuration types for the engine
//!
//! Everything is read from an optional JSON file. Every section and field has a
//! default, so a partial file only overrides what it names.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "forge.json";

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub log: LogConfig,
    pub scripting: ScriptingConfig,
}

/// Host window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Present with vsync (Fifo) instead of the lowest-latency mode available
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Forge Engine".to_string(),
            width: 1600,
            height: 900,
            vsync: true,
        }
    }
}

/// Editor camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub target: Vec3,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 2.7, -4.0),
            distance: 1.04,
            min_distance: 0.1,
            max_distance: 100.0,
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directives used when `RUST_LOG` is not set
    pub filter: String,
    /// Log file, truncated at start-up. `None` disables file output.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,wgpu_core=warn,wgpu_hal=warn".to_string(),
            file: Some(PathBuf::from("log.txt")),
        }
    }
}

/// Scripting settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptingConfig {
    /// Script assembly loaded at start-up
    pub assembly: Option<PathBuf>,
}

impl EngineConfig {
    /// Resolve the config path: the first command-line argument if any,
    /// otherwise [`DEFAULT_CONFIG_FILE`]
    pub fn path_from_args(mut args: impl Iterator<Item = String>) -> PathBuf {
        args.nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Write configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Saved engine config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.window.height, 900);
        assert_eq!(config.camera.distance, 1.04);
        assert_eq!(config.camera.target, Vec3::new(0.0, 2.7, -4.0));
        assert_eq!(config.log.file, Some(PathBuf::from("log.txt")));
        assert!(config.scripting.assembly.is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forge.json");

        let mut config = EngineConfig::default();
        config.window.title = "Custom".to_string();
        config.camera.fov_degrees = 75.0;
        config.log.file = None;
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forge.json");
        std::fs::write(&path, r#"{ "window": { "width": 800 } }"#).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded.window.width, 800);
        assert_eq!(loaded.window.height, 900);
        assert_eq!(loaded.window.title, "Forge Engine");
        assert_eq!(loaded.camera, CameraConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forge.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_path_from_args() {
        let args = vec!["forge".to_string(), "custom.json".to_string()];
        assert_eq!(
            EngineConfig::path_from_args(args.into_iter()),
            PathBuf::from("custom.json")
        );

        let args = vec!["forge".to_string()];
        assert_eq!(
            EngineConfig::path_from_args(args.into_iter()),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
    }
}
