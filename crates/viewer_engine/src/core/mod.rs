//! # Core Viewer Module
//!
//! Shared configuration and the application-wide context object.
//!
//! ## Organization
//!
//! - **Config**: configuration tree for all viewer subsystems
//! - **Context**: the scene registry, settings bus and asset queue that
//!   are created once per session and handed to every demo

pub mod config;
mod context;

pub use config::{
    ViewerConfig,
    LoggingConfig,
    CameraConfig,
    SurfaceConfig,
    SettingsConfig,
    AssetConfig,
    FrameConfig,
    Config,
    ConfigError,
};
pub use context::ViewerContext;
