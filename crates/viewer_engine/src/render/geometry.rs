//! Geometry descriptions
//!
//! Geometry is immutable once built and shared between meshes through
//! `Rc<Geometry>`; the metalness grid draws 216 spheres from one instance.

/// Indexed triangle mesh data, as produced by model loaders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Mesh name from the source file
    pub name: String,
    /// Flat `xyz` positions
    pub positions: Vec<f32>,
    /// Flat `xyz` normals, empty when the source had none
    pub normals: Vec<f32>,
    /// Flat `uv` texture coordinates, empty when the source had none
    pub tex_coords: Vec<f32>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Shape of a mesh node
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Horizontal segments
        width_segments: u32,
        /// Vertical segments
        height_segments: u32,
    },
    /// Axis-aligned box centred on the origin
    Cuboid {
        /// Extent along x
        width: f32,
        /// Extent along y
        height: f32,
        /// Extent along z
        depth: f32,
    },
    /// Loaded triangle mesh
    Mesh(MeshData),
}

impl Geometry {
    /// UV sphere; segment counts are raised to the minimum of 3 and 2
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    /// Box with the given extents
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid { width, height, depth }
    }

    /// Number of triangles a renderer draws for this geometry
    pub fn triangle_count(&self) -> usize {
        match self {
            // Pole rows contribute one triangle per segment instead of two
            Self::Sphere { width_segments, height_segments, .. } => {
                (*width_segments as usize) * (*height_segments as usize - 1) * 2
            }
            Self::Cuboid { .. } => 12,
            Self::Mesh(data) => data.indices.len() / 3,
        }
    }

    /// Number of vertices a renderer uploads for this geometry
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Sphere { width_segments, height_segments, .. } => {
                (*width_segments as usize + 1) * (*height_segments as usize + 1)
            }
            Self::Cuboid { .. } => 24,
            Self::Mesh(data) => data.vertex_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let sphere = Geometry::sphere(100.0, 32, 16);
        assert_eq!(sphere.triangle_count(), 32 * 15 * 2);
        assert_eq!(sphere.vertex_count(), 33 * 17);
    }

    #[test]
    fn test_sphere_segments_are_clamped() {
        assert_eq!(
            Geometry::sphere(1.0, 0, 0),
            Geometry::Sphere { radius: 1.0, width_segments: 3, height_segments: 2 }
        );
    }

    #[test]
    fn test_mesh_counts_follow_data() {
        let data = MeshData {
            name: "tri".to_string(),
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        let mesh = Geometry::Mesh(data);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(Geometry::cuboid(100.0, 100.0, 100.0).triangle_count(), 12);
    }
}
