//! Perspective camera
//!
//! The camera stores its projection parameters and derives matrices on
//! demand. Its aspect ratio is whatever the render loop last reconciled from
//! the draw surface.

use crate::core::CameraConfig;
use crate::foundation::math::{self, Mat4, Vec3};
use super::surface::SurfaceSize;

/// Projection parameters of a camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Distance to the near clipping plane
    pub near: f32,
    /// Distance to the far clipping plane
    pub far: f32,
    /// Width over height, exactly `0` for a zero-height surface
    pub aspect: f32,
}

/// Right-handed, Y-up perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
}

impl Camera {
    /// Camera at `position` looking at the origin, `fov_degrees` vertical
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov: math::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Build the camera described by `config` for a surface of `size`
    pub fn from_config(config: &CameraConfig, size: SurfaceSize) -> Self {
        Self {
            target: Vec3::from(config.target),
            ..Self::perspective(
                Vec3::from(config.position),
                config.fov_degrees,
                size.aspect_ratio(),
                config.near,
                config.far,
            )
        }
    }

    /// Replace the aspect ratio after a surface change
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Projection parameters in configuration units
    pub fn viewport(&self) -> Viewport {
        Viewport {
            fov_degrees: math::rad_to_deg(self.fov),
            near: self.near,
            far: self.far,
            aspect: self.aspect,
        }
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(self.position, self.target, self.up)
    }

    /// Projection for the current aspect ratio
    ///
    /// A zero aspect gives a non-finite horizontal scale; the camera does not
    /// reject it.
    pub fn projection_matrix(&self) -> Mat4 {
        math::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// `projection * view`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Same orientation and projection, eye moved to the origin
    ///
    /// Background passes use this so the sky turns with the view but never
    /// moves.
    pub fn orientation_only(&self) -> Self {
        Self {
            position: Vec3::zeros(),
            target: self.forward(),
            ..self.clone()
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), SurfaceSize::new(16, 9))
    }
}
