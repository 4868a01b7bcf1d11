//! Math types for scene transforms and camera projection
//!
//! Thin aliases over `nalgebra` plus the two camera matrices the viewer
//! needs. Projection is right-handed with depth mapped to `[0, 1]`.

pub use nalgebra::{Matrix4, Point3, Quaternion, Unit, UnitQuaternion, Vector3, Vector4};

/// 3D vector
pub type Vec3 = Vector3<f32>;

/// Homogeneous 4D vector
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix
pub type Mat4 = Matrix4<f32>;

/// Unit quaternion rotation
pub type Quat = UnitQuaternion<f32>;

/// Local placement of a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent
    pub position: Vec3,
    /// Rotation relative to the parent
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// No translation, rotation or scaling
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::repeat(1.0),
        }
    }

    /// Scale, then rotate, then translate
    pub fn to_matrix(&self) -> Mat4 {
        let mut matrix = self.rotation.to_homogeneous().prepend_nonuniform_scaling(&self.scale);
        matrix.append_translation_mut(&self.position);
        matrix
    }
}

/// Degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Radians to degrees
pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Perspective projection
///
/// `fov_y` is in radians. A zero aspect is accepted and gives an infinite
/// horizontal scale rather than an error.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let focal = 1.0 / (fov_y * 0.5).tan();
    let depth = far / (near - far);
    #[rustfmt::skip]
    let matrix = Mat4::new(
        focal / aspect, 0.0,   0.0,   0.0,
        0.0,            focal, 0.0,   0.0,
        0.0,            0.0,   depth, near * depth,
        0.0,            0.0,   -1.0,  0.0,
    );
    matrix
}

/// World-to-camera matrix for an eye looking at `target`
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
}
