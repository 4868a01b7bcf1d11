//! # Viewer Engine
//!
//! Core of an interactive PBR viewer: a scene registry demos add objects to,
//! a render loop that keeps camera, viewport and draw surface consistent
//! across resizes, and a property layer that lets generic controls edit any
//! object while rendering continues.
//!
//! ## Features
//!
//! - **Scene registry**: shared root node plus atomic removal of everything
//!   the active demo added
//! - **Render loop**: mount/resize/unmount lifecycle over pluggable backend,
//!   scheduler and surface
//! - **Settings bus**: replaying broadcast channels for roughness and
//!   metalness
//! - **Property proxies**: uniform get/set over named attributes with
//!   packed-color conversion
//! - **Asset queue**: single-attempt texture, glTF and OBJ loads completed
//!   between frames
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use viewer_engine::prelude::*;
//!
//! let mut context = ViewerContext::default();
//! let mut controller = RenderLoopController::new(
//!     CameraConfig::default(),
//!     context.scene.root().clone(),
//!     HeadlessBackend::new(),
//!     ManualScheduler::new(),
//! );
//! controller.mount(Rc::new(HeadlessSurface::new(800, 600)))?;
//!
//! let material = Material::standard().with_color(0x3a3030).into_ref();
//! let geometry = Rc::new(Geometry::sphere(100.0, 32, 16));
//! context.scene.add(NodeRef::mesh("ball", geometry, material.clone()));
//!
//! let roughness = PropertyProxy::new(&material, "roughness")?;
//! roughness.set(PropertyValue::Scalar(0.42))?;
//!
//! let frame = controller.step()?.expect("first frame is scheduled");
//! assert_eq!(frame.draw_count, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Configuration and session context
pub mod core;
pub mod config;

pub mod foundation;
pub mod events;
pub mod properties;
pub mod scene;
pub mod render;
pub mod settings;
pub mod assets;
pub mod ui;

/// Common imports for viewer users
pub mod prelude {
    pub use crate::{
        core::{CameraConfig, Config, ViewerConfig, ViewerContext},
        foundation::{
            color::Color,
            math::{Transform, Vec3},
            time::Timer,
        },
        events::{Channel, Subscription},
        properties::{PropertyError, PropertyKind, PropertyProxy, PropertyTarget, PropertyValue},
        scene::{Light, NodeRef, SceneRegistry},
        render::{
            Camera, DrawSurface, FrameReport, FrameScheduler, Geometry, HeadlessBackend,
            HeadlessSurface, ManualScheduler, Material, MaterialRef, RenderBackend, RenderError,
            RenderLoopController, ResizeNotifier, SurfaceSize,
        },
        settings::{Setting, SettingsBus},
        assets::{AssetError, AssetQueue},
        ui::ControlPanel,
    };
}
