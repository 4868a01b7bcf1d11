//! Sphere grid sweeping hue/roughness, metalness and lightness

use super::{DemoStage, ROCK_COLOR};
use crate::error::AppError;
use std::rc::Rc;
use viewer_engine::core::ViewerContext;
use viewer_engine::foundation::color::Color;
use viewer_engine::foundation::math::Vec3;
use viewer_engine::render::{Geometry, Material};
use viewer_engine::scene::NodeRef;

const CUBE_WIDTH: f32 = 400.0;
const SPHERES_PER_SIDE: u32 = 5;
const BUMP_SCALE: f32 = 1.0;

pub fn build(context: &mut ViewerContext) -> Result<DemoStage, AppError> {
    let sphere_radius = (CUBE_WIDTH / SPHERES_PER_SIDE as f32) * 0.8 * 0.5;
    let map = context.assets.load_texture(ROCK_COLOR);
    let geometry = Rc::new(Geometry::sphere(sphere_radius, 32, 16));

    // Steps are counted in integers so 1.0 is reached exactly
    let steps = || (0..=SPHERES_PER_SIDE).map(|i| i as f32 / SPHERES_PER_SIDE as f32);

    for alpha in steps() {
        for beta in steps() {
            for gamma in steps() {
                let diffuse = Color::from_hsl(alpha, 0.5, gamma * 0.5 + 0.1);
                let material = Material::standard()
                    .with_map(Rc::clone(&map))
                    .with_bump_map(Rc::clone(&map), BUMP_SCALE)
                    .with_color(diffuse)
                    .with_metalness(beta)
                    .with_roughness(1.0 - alpha)
                    .into_ref();

                let mesh = NodeRef::mesh("grid sphere", Rc::clone(&geometry), material);
                mesh.set_position(Vec3::new(
                    alpha * CUBE_WIDTH - CUBE_WIDTH / 2.0,
                    beta * CUBE_WIDTH - CUBE_WIDTH / 2.0,
                    gamma * CUBE_WIDTH - CUBE_WIDTH / 2.0,
                ));
                context.scene.add(mesh);
            }
        }
    }

    log::debug!("Metalness grid holds {} spheres", context.scene.managed_count());
    Ok(DemoStage::default())
}
