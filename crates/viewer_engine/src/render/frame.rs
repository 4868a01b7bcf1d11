//! Frame rendering data
//!
//! A [`RenderFrame`] is the flattened, backend-neutral description of one
//! pass: camera matrices plus every visible mesh and light with its world
//! transform composed from the root down.

use crate::foundation::color::Color;
use crate::foundation::math::Mat4;
use crate::scene::{LightKind, NodeKind, NodeRef};
use super::camera::Camera;
use super::geometry::Geometry;
use super::material::Material;
use super::surface::SurfaceSize;
use std::rc::Rc;

/// Which pass of a frame this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Background drawn through an orientation-only camera
    Background,
    /// The main scene
    Main,
}

/// One mesh to draw
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Node name
    pub name: String,
    /// Model-to-world transform
    pub world: Mat4,
    /// Shared geometry
    pub geometry: Rc<Geometry>,
    /// Material as it was when the frame was collected
    pub material: Material,
}

/// One light affecting the pass
#[derive(Debug, Clone, PartialEq)]
pub struct LightItem {
    /// Light type
    pub kind: LightKind,
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Light-to-world transform
    pub world: Mat4,
}

/// Complete description of one render pass
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Pass kind
    pub pass: RenderPass,
    /// Frame number this pass belongs to
    pub index: u64,
    /// World-to-camera transform
    pub view: Mat4,
    /// Camera projection
    pub projection: Mat4,
    /// Aspect ratio the projection was built with
    pub aspect: f32,
    /// Size of the surface being drawn into
    pub size: SurfaceSize,
    /// Visible meshes in traversal order
    pub draws: Vec<DrawItem>,
    /// Visible lights in traversal order
    pub lights: Vec<LightItem>,
}

impl RenderFrame {
    /// Traverse `root` and collect everything visible through `camera`
    pub fn collect(pass: RenderPass, index: u64, camera: &Camera, size: SurfaceSize, root: &NodeRef) -> Self {
        let mut frame = Self {
            pass,
            index,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            aspect: camera.aspect,
            size,
            draws: Vec::new(),
            lights: Vec::new(),
        };
        frame.visit(root, &Mat4::identity());
        frame
    }

    fn visit(&mut self, node: &NodeRef, parent: &Mat4) {
        let node = node.borrow();
        if !node.visible {
            return;
        }

        let world = parent * node.transform.to_matrix();
        match &node.kind {
            NodeKind::Group => {}
            NodeKind::Mesh(mesh) => self.draws.push(DrawItem {
                name: node.name.clone(),
                world,
                geometry: Rc::clone(&mesh.geometry),
                material: mesh.material.borrow().clone(),
            }),
            NodeKind::Light(light) => {
                let light = light.borrow();
                self.lights.push(LightItem {
                    kind: light.kind,
                    color: light.color,
                    intensity: light.intensity,
                    world,
                });
            }
        }

        for child in node.children() {
            self.visit(child, &world);
        }
    }

    /// Number of meshes drawn
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// Total triangles across every draw
    pub fn triangle_count(&self) -> usize {
        self.draws.iter().map(|draw| draw.geometry.triangle_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec3, Vec4};
    use crate::scene::Light;
    use approx::assert_relative_eq;

    fn ball(name: &str) -> NodeRef {
        NodeRef::mesh(name, Rc::new(Geometry::sphere(1.0, 8, 4)), Material::basic().into_ref())
    }

    #[test]
    fn test_collect_composes_parent_transforms() {
        let root = NodeRef::group("root");
        let model = NodeRef::group("model");
        model.set_position(Vec3::new(10.0, 0.0, 0.0));
        model.set_uniform_scale(2.0);
        let child = ball("child");
        child.set_position(Vec3::new(1.0, 0.0, 0.0));
        model.add_child(child);
        root.add_child(model);

        let frame = RenderFrame::collect(
            RenderPass::Main,
            0,
            &Camera::default(),
            SurfaceSize::new(16, 9),
            &root,
        );

        assert_eq!(frame.draw_count(), 1);
        let origin = frame.draws[0].world * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin, Vec4::new(12.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_invisible_subtrees_are_skipped() {
        let root = NodeRef::group("root");
        let hidden = NodeRef::group("hidden");
        hidden.add_child(ball("inside"));
        hidden.set_visible(false);
        root.add_child(hidden);
        root.add_child(ball("shown"));
        root.add_child(NodeRef::light("sun", Light::ambient(0xffffff, 0.5).into_ref()));

        let frame = RenderFrame::collect(
            RenderPass::Main,
            3,
            &Camera::default(),
            SurfaceSize::new(16, 9),
            &root,
        );

        assert_eq!(frame.draw_count(), 1);
        assert_eq!(frame.draws[0].name, "shown");
        assert_eq!(frame.lights.len(), 1);
        assert_eq!(frame.lights[0].intensity, 0.5);
        assert_eq!(frame.triangle_count(), 8 * 3 * 2);
    }

    #[test]
    fn test_material_is_snapshotted() {
        let root = NodeRef::group("root");
        let node = ball("ball");
        root.add_child(node.clone());
        let material = node.material().expect("mesh has a material");

        let frame = RenderFrame::collect(
            RenderPass::Main,
            0,
            &Camera::default(),
            SurfaceSize::new(16, 9),
            &root,
        );
        material.borrow_mut().opacity = 0.5;

        assert_eq!(frame.draws[0].material.opacity, 1.0);
    }
}
