//! Rendering
//!
//! The render loop, the camera it reconciles against the draw surface, and
//! the backend-neutral data a frame is made of.
//!
//! ## Layers
//!
//! - **Data**: [`Geometry`], [`Material`], [`Texture`]
//! - **Frame**: [`RenderFrame`] flattens the scene tree for one pass
//! - **Seams**: [`RenderBackend`], [`FrameScheduler`], [`DrawSurface`]
//! - **Loop**: [`RenderLoopController`]

pub mod backend;
pub mod camera;
pub mod controller;
pub mod frame;
pub mod geometry;
pub mod material;
pub mod scheduler;
pub mod surface;
pub mod texture;

pub use backend::{BackendResult, FrameLog, FrameRecord, HeadlessBackend, RenderBackend};
pub use camera::{Camera, Viewport};
pub use controller::{FrameReport, RenderLoopController};
pub use frame::{DrawItem, LightItem, RenderFrame, RenderPass};
pub use geometry::{Geometry, MeshData};
pub use material::{Material, MaterialRef, ShadingModel, Side};
pub use scheduler::{FixedTickScheduler, FrameRequest, FrameScheduler, FrameTick, ManualScheduler};
pub use surface::{DrawSurface, HeadlessSurface, ResizeNotifier, ResizeSubscription, SurfaceSize};
pub use texture::{Texture, TextureImage, TextureKind, TextureRef, TextureState};

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Operation requires a mounted surface
    #[error("render loop is not mounted")]
    NotMounted,

    /// `mount` was called on a mounted render loop
    #[error("render loop is already mounted")]
    AlreadyMounted,

    /// Backend failure
    #[error("backend error: {0}")]
    Backend(String),
}
