//! Basic and standard material side by side

use super::DemoStage;
use crate::error::AppError;
use std::rc::Rc;
use viewer_engine::core::ViewerContext;
use viewer_engine::foundation::math::Vec3;
use viewer_engine::properties::PropertyProxy;
use viewer_engine::render::{Geometry, Material};
use viewer_engine::scene::NodeRef;
use viewer_engine::ui::ControlPanel;

const BASE_COLOR: u32 = 0x3a3030;

pub fn build(context: &mut ViewerContext) -> Result<DemoStage, AppError> {
    let geometry = Rc::new(Geometry::sphere(100.0, 32, 16));
    let basic = Material::basic().with_color(BASE_COLOR).into_ref();
    let standard = Material::standard()
        .with_color(BASE_COLOR)
        .with_metalness(0.1)
        .with_roughness(1.0)
        .into_ref();

    let left = NodeRef::mesh("basic sphere", Rc::clone(&geometry), Rc::clone(&basic));
    left.set_position(Vec3::new(-100.0, 0.0, 0.0));
    context.scene.add(left);

    let right = NodeRef::mesh("standard sphere", geometry, Rc::clone(&standard));
    right.set_position(Vec3::new(100.0, 0.0, 0.0));
    context.scene.add(right);

    let mut panel = ControlPanel::new("colour");
    panel.add_color(PropertyProxy::new(&basic, "color")?)?.name("basic color");
    panel.add_color(PropertyProxy::new(&standard, "color")?)?.name("standard color");
    panel.add(PropertyProxy::new(&standard, "metalness")?, 0.0, 1.0)?;
    panel.add(PropertyProxy::new(&standard, "roughness")?, 0.0, 1.0)?;

    Ok(DemoStage {
        panel: Some(panel),
        ..Default::default()
    })
}
