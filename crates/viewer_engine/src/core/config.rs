//! # Viewer Configuration
//!
//! All tunables of the viewer in one serializable tree. Every section has
//! defaults, so a config file only needs to name the values it changes.
//!
//! ## Configuration Categories
//!
//! - **Logging**: default log filter
//! - **Camera**: projection and placement of the main camera
//! - **Surface**: initial size of headless draw surfaces
//! - **Settings**: initial values of the broadcast settings
//! - **Assets**: where textures and models are resolved from
//! - **Frame**: pacing of the fixed-tick frame scheduler

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Distance to the near clipping plane
    pub near: f32,
    /// Distance to the far clipping plane
    pub far: f32,
    /// Camera position in world space
    pub position: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
}

impl CameraConfig {
    /// Create a camera configuration with the given projection
    pub fn new(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            near,
            far,
            ..Default::default()
        }
    }

    /// Set the camera position
    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    /// Validate projection parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.near <= 0.0 {
            return Err(ConfigError::Invalid(format!("camera near plane must be positive, got {}", self.near)));
        }
        if self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "camera far plane ({}) must be beyond near plane ({})",
                self.far, self.near
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 1100.0,
            position: [0.0, 0.0, 600.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Headless surface configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Initial width in pixels
    pub width: u32,
    /// Initial height in pixels
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Initial values of the broadcast settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Initial roughness
    pub roughness: f32,
    /// Initial metalness
    pub metalness: f32,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            roughness: 0.1,
            metalness: 0.1,
        }
    }
}

/// Asset loading configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory relative asset paths are resolved against
    pub assets_dir: String,
}

impl AssetConfig {
    /// Create an asset configuration rooted at `dir`
    pub fn with_assets_dir(dir: impl Into<String>) -> Self {
        Self {
            assets_dir: dir.into(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
        }
    }
}

/// Frame pacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frames per second produced by the fixed-tick scheduler
    pub target_fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

/// # Complete Viewer Configuration
///
/// Top-level configuration that encompasses all viewer subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Main camera configuration
    pub camera: CameraConfig,
    /// Headless surface configuration
    pub surface: SurfaceConfig,
    /// Initial broadcast settings
    pub settings: SettingsConfig,
    /// Asset loading configuration
    pub assets: AssetConfig,
    /// Frame pacing configuration
    pub frame: FrameConfig,
}

impl ViewerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;

        if self.frame.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".to_string()));
        }

        for (name, value) in [("roughness", self.settings.roughness), ("metalness", self.settings.metalness)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {value}")));
            }
        }

        Ok(())
    }
}

impl Config for ViewerConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("viewer_engine_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near, 1.0);
        assert_eq!(config.camera.far, 1100.0);
        assert_eq!(config.settings.roughness, 0.1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ViewerConfig::from_str_as(
            r#"
            [camera]
            fov_degrees = 70.0
            far = 100000.0

            [settings]
            metalness = 0.5
            "#,
            ConfigFormat::Toml,
        )
        .expect("partial config should parse");

        assert_eq!(config.camera.fov_degrees, 70.0);
        assert_eq!(config.camera.near, 1.0);
        assert_eq!(config.camera.far, 100000.0);
        assert_eq!(config.settings.metalness, 0.5);
        assert_eq!(config.settings.roughness, 0.1);
        assert_eq!(config.surface, SurfaceConfig::default());
    }

    #[test]
    fn test_toml_and_ron_round_trip_through_files() {
        let mut config = ViewerConfig::default();
        config.surface.width = 800;
        config.surface.height = 600;
        config.logging.level = "debug".to_string();

        for extension in ["toml", "ron"] {
            let path = temp_path(&format!("round_trip.{extension}"));
            config.save_to_file(&path).expect("save config");
            let loaded = ViewerConfig::load_from_file(&path).expect("load config");
            assert_eq!(loaded, config);
            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_path("absent.toml");
        let _ = std::fs::remove_file(&path);
        let config = ViewerConfig::load_or_default(&path).expect("defaults");
        assert_eq!(config, ViewerConfig::default());
        assert!(matches!(ViewerConfig::load_from_file(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = temp_path("config.json");
        assert!(matches!(
            ViewerConfig::default().save_to_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ViewerConfig::default();
        config.camera.far = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.frame.target_fps = 0;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.settings.roughness = 1.5;
        assert!(config.validate().is_err());
    }
}
