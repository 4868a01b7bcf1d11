//! Application error type

use thiserror::Error;
use viewer_engine::assets::AssetError;
use viewer_engine::config::ConfigError;
use viewer_engine::properties::PropertyError;
use viewer_engine::render::RenderError;
use viewer_engine::settings::SettingsError;

/// Everything that can stop the viewer
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Render loop failure
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// A demo bound a control to a property that does not exist
    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    /// Unknown setting name
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Asset failure that a demo could not recover from
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Bad command line
    #[error("usage: {0}")]
    Usage(String),
}
