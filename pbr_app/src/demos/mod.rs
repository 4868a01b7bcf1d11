//! Demo scenarios
//!
//! Each demo populates the shared scene through the registry and may hand
//! back a control panel, a background root, a camera override and settings
//! subscriptions. The [`Showcase`](crate::showcase::Showcase) owns whatever
//! a demo returns and tears it down on the next switch.

mod colour;
mod metalness;
mod normal_map;
mod skybox;

use crate::error::AppError;
use std::fmt;
use std::str::FromStr;
use viewer_engine::core::{CameraConfig, ViewerContext};
use viewer_engine::events::Subscription;
use viewer_engine::scene::NodeRef;
use viewer_engine::ui::ControlPanel;

/// Texture shared by the normal-map and metalness demos
pub const ROCK_COLOR: &str = "texture/Rock025_2K-JPG/Rock025_2K_Color.jpg";

/// Normal map of [`ROCK_COLOR`]
pub const ROCK_NORMAL: &str = "texture/Rock025_2K-JPG/Rock025_2K_Normal.jpg";

/// Everything a demo leaves behind besides scene objects
#[derive(Debug, Default)]
pub struct DemoStage {
    /// Controls for the demo's objects
    pub panel: Option<ControlPanel>,
    /// Root drawn behind the main scene
    pub background: Option<NodeRef>,
    /// Camera to use instead of the configured one
    pub camera: Option<CameraConfig>,
    /// Subscriptions that make demo materials follow the settings bus
    pub follow: Vec<Subscription>,
}

/// Available demos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// Basic vs standard material with color pickers
    Colour,
    /// Textured spheres with and without a normal map
    NormalMapTexture,
    /// Loaded model with baked normals
    NormalMapVolume,
    /// Grid of spheres sweeping hue, metalness and roughness
    Metalness,
    /// Environment-mapped sphere inside a cube map
    Skybox,
}

impl Demo {
    /// Every demo in menu order
    pub const ALL: [Demo; 5] = [
        Demo::Colour,
        Demo::NormalMapTexture,
        Demo::NormalMapVolume,
        Demo::Metalness,
        Demo::Skybox,
    ];

    /// Command line name
    pub fn name(self) -> &'static str {
        match self {
            Self::Colour => "colour",
            Self::NormalMapTexture => "normal-map-texture",
            Self::NormalMapVolume => "normal-map-volume",
            Self::Metalness => "metalness",
            Self::Skybox => "skybox",
        }
    }

    /// Populate the scene for this demo
    pub fn build(self, context: &mut ViewerContext) -> Result<DemoStage, AppError> {
        match self {
            Self::Colour => colour::build(context),
            Self::NormalMapTexture => normal_map::build_texture(context),
            Self::NormalMapVolume => normal_map::build_volume(context),
            Self::Metalness => metalness::build(context),
            Self::Skybox => skybox::build(context),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name() == name)
            .ok_or_else(|| AppError::Usage(format!("unknown demo '{}'", name)))
    }
}
