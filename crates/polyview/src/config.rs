//! Viewer configuration.
//!
//! An optional TOML document that seeds background, camera, light and
//! input sensitivity. Every field has a default, so a partial file (or no
//! file at all) is valid; a loaded configuration is mirrored onto a scene
//! with [`Scene::apply_config`](crate::scene::Scene::apply_config).

use crate::scene::camera::{DEFAULT_ORBIT_STEP, DEFAULT_PAN_STEP, DEFAULT_ZOOM_STEP};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text was not valid TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Camera pose and lens settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position in world space
    pub position: [f32; 3],
    /// Look-at point
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
            fov_y_deg: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Scene light settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Position in world space
    pub position: [f32; 3],
    /// Diffuse and specular color
    pub color: [f32; 3],
    /// Ambient color
    pub ambient_color: [f32; 3],
    /// Ambient contribution scale
    pub ambient_strength: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [2.0, 4.0, 3.0],
            color: [1.0, 1.0, 1.0],
            ambient_color: [1.0, 1.0, 1.0],
            ambient_strength: 0.1,
        }
    }
}

/// Top-level viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Background clear color, RGBA in 0..=1
    pub background: [f32; 4],
    /// Camera section
    pub camera: CameraConfig,
    /// Light section
    pub light: LightConfig,
    /// Radians per orbit event
    pub orbit_step: f32,
    /// World units per pan event
    pub pan_step: f32,
    /// World units per zoom tick
    pub zoom_step: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            background: [0.1, 0.1, 0.1, 1.0],
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            orbit_step: DEFAULT_ORBIT_STEP,
            pan_step: DEFAULT_PAN_STEP,
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl ViewerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let contents = std::fs::read_to_string(path_ref)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded viewer config from {}", path_ref.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = ViewerConfig::from_toml_str(
            "background = [0.0, 0.0, 0.0, 1.0]\n\n[camera]\nfov_y_deg = 60.0\n",
        )
        .unwrap();

        assert_eq!(config.background, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.camera.fov_y_deg, 60.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.light.ambient_strength, 0.1);
        assert_eq!(config.orbit_step, DEFAULT_ORBIT_STEP);
    }

    #[test]
    fn test_empty_document_is_the_default_config() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config.background, [0.1, 0.1, 0.1, 1.0]);
        assert_eq!(config.camera.position, [0.0, 3.0, 3.0]);
    }

    #[test]
    fn test_default_survives_a_toml_round_trip() {
        let serialized = toml::to_string(&ViewerConfig::default()).unwrap();
        let parsed = ViewerConfig::from_toml_str(&serialized).unwrap();

        assert_eq!(parsed.camera.fov_y_deg, 45.0);
        assert_eq!(parsed.light.position, [2.0, 4.0, 3.0]);
        assert_eq!(parsed.zoom_step, DEFAULT_ZOOM_STEP);
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = ViewerConfig::from_toml_str("background = \"dark\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = ViewerConfig::from_file("/nonexistent/turntable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
