//! Normal mapping from a texture and from a loaded model

use super::{DemoStage, ROCK_COLOR, ROCK_NORMAL};
use crate::error::AppError;
use std::rc::Rc;
use viewer_engine::core::ViewerContext;
use viewer_engine::foundation::math::Vec3;
use viewer_engine::render::{Geometry, Material};
use viewer_engine::scene::NodeRef;
use viewer_engine::settings::bind_material;

const VOLUME_MODEL: &str = "gltf/normal-tangent-test/NormalTangentTest.gltf";
const VOLUME_SCALE: f32 = 150.0;

pub fn build_texture(context: &mut ViewerContext) -> Result<DemoStage, AppError> {
    let map = context.assets.load_texture(ROCK_COLOR);
    let normal_map = context.assets.load_texture(ROCK_NORMAL);

    let geometry = Rc::new(Geometry::sphere(100.0, 32, 16));
    let plain = Material::standard().with_map(Rc::clone(&map)).into_ref();
    let mapped = Material::standard().with_map(map).with_normal_map(normal_map).into_ref();

    let left = NodeRef::mesh("rock", Rc::clone(&geometry), Rc::clone(&plain));
    left.set_position(Vec3::new(-100.0, 0.0, 0.0));
    context.scene.add(left);

    let right = NodeRef::mesh("rock normal mapped", geometry, Rc::clone(&mapped));
    right.set_position(Vec3::new(100.0, 0.0, 0.0));
    context.scene.add(right);

    let mut follow = bind_material(&context.settings, &plain);
    follow.extend(bind_material(&context.settings, &mapped));

    Ok(DemoStage {
        follow,
        ..Default::default()
    })
}

pub fn build_volume(context: &mut ViewerContext) -> Result<DemoStage, AppError> {
    context.assets.load_model(VOLUME_MODEL, |result, scene| match result {
        Ok(model) => match model.children().into_iter().next() {
            Some(volume) => {
                model.remove_child(&volume);
                volume.set_uniform_scale(VOLUME_SCALE);
                scene.add(volume);
            }
            None => log::warn!("Scene of '{}' has no nodes", VOLUME_MODEL),
        },
        Err(e) => log::warn!("Normal map volume unavailable: {}", e),
    });
    Ok(DemoStage::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewer_engine::settings::Setting;

    #[test]
    fn test_texture_spheres_follow_settings() {
        let mut context = ViewerContext::default();
        let stage = build_texture(&mut context).expect("texture demo builds");
        assert_eq!(context.scene.managed_count(), 2);
        assert_eq!(stage.follow.len(), 4);

        context.settings.change(Setting::Roughness, 0.65);
        for node in context.scene.managed() {
            let material = node.material().expect("mesh");
            assert_eq!(material.borrow().roughness, 0.65);
        }
    }

    const VOLUME_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0, 1] }],
        "nodes": [{ "name": "volume", "mesh": 0 }, { "name": "spare", "mesh": 0 }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "accessors": [{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                        "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        }]
    }"#;

    #[test]
    fn test_volume_inserts_first_scene_node_scaled() {
        let assets_dir = std::env::temp_dir().join(format!("pbr_app_volume_{}", std::process::id()));
        let model_path = assets_dir.join(VOLUME_MODEL);
        std::fs::create_dir_all(model_path.parent().expect("model directory")).expect("create assets");
        std::fs::write(&model_path, VOLUME_GLTF).expect("write gltf");

        let mut context = ViewerContext::new(&viewer_engine::core::ViewerConfig {
            assets: viewer_engine::core::AssetConfig::with_assets_dir(assets_dir.to_string_lossy()),
            ..Default::default()
        });
        build_volume(&mut context).expect("queueing never fails");
        assert_eq!(context.pump_assets(), 1);

        let managed = context.scene.managed();
        assert_eq!(managed.len(), 1);
        assert_eq!(managed[0].name(), "volume");
        assert_eq!(managed[0].borrow().transform.scale, Vec3::repeat(VOLUME_SCALE));
        assert!(managed[0].material().is_some());

        std::fs::remove_dir_all(assets_dir).ok();
    }

    #[test]
    fn test_missing_volume_model_adds_nothing() {
        let mut context = ViewerContext::new(&viewer_engine::core::ViewerConfig {
            assets: viewer_engine::core::AssetConfig::with_assets_dir("/nonexistent/assets"),
            ..Default::default()
        });
        build_volume(&mut context).expect("queueing never fails");
        assert_eq!(context.pump_assets(), 1);
        assert_eq!(context.scene.managed_count(), 0);
    }
}
