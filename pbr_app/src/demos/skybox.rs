//! Environment-mapped sphere inside a cube-map skybox

use super::DemoStage;
use crate::error::AppError;
use std::rc::Rc;
use viewer_engine::core::{CameraConfig, ViewerContext};
use viewer_engine::properties::PropertyProxy;
use viewer_engine::render::{Geometry, Material, Side};
use viewer_engine::scene::{Light, NodeRef};
use viewer_engine::ui::ControlPanel;

const CUBE_FACES: [&str; 6] = [
    "texture/cube/Bridge2/posx.jpg",
    "texture/cube/Bridge2/negx.jpg",
    "texture/cube/Bridge2/posy.jpg",
    "texture/cube/Bridge2/negy.jpg",
    "texture/cube/Bridge2/posz.jpg",
    "texture/cube/Bridge2/negz.jpg",
];

pub fn build(context: &mut ViewerContext) -> Result<DemoStage, AppError> {
    let ambient = Light::ambient(0xffffff, 1.0).into_ref();
    context.scene.add(NodeRef::light("ambient", Rc::clone(&ambient)));

    let mut panel = ControlPanel::new("skybox");
    panel.add_color(PropertyProxy::new(&ambient, "color")?)?;
    panel.add(PropertyProxy::new(&ambient, "intensity")?, 0.0, 1.0)?;

    let cube_map = context.assets.load_cube_texture(CUBE_FACES);

    let sky_material = Material::basic()
        .with_env_map(Rc::clone(&cube_map))
        .with_side(Side::Back)
        .with_depth_write(false)
        .into_ref();
    let background = NodeRef::group("sky");
    background.add_child(NodeRef::mesh(
        "sky cube",
        Rc::new(Geometry::cuboid(100.0, 100.0, 100.0)),
        sky_material,
    ));

    let sphere_material = Material::lambert().with_env_map(cube_map).into_ref();
    context.scene.add(NodeRef::mesh(
        "reflective sphere",
        Rc::new(Geometry::sphere(400.0, 48, 24)),
        sphere_material,
    ));

    Ok(DemoStage {
        panel: Some(panel),
        background: Some(background),
        camera: Some(CameraConfig::new(70.0, 1.0, 100_000.0).with_position([0.0, 0.0, 1000.0])),
        follow: Vec::new(),
    })
}
