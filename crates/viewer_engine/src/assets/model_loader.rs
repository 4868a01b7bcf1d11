//! Model loading
//!
//! OBJ files go through `tobj`; `.gltf` and `.glb` files go through the
//! glTF loader. [`AssetQueue::load_model`] picks the format by extension.

use super::{read_gltf, AssetError, AssetQueue};
use crate::render::{Geometry, Material, MeshData};
use crate::scene::{NodeRef, SceneRegistry};
use std::path::Path;
use std::rc::Rc;

/// Load an OBJ file as a group node with one mesh child per object
///
/// Faces are triangulated and re-indexed so positions, normals and texture
/// coordinates share one index buffer. Objects without faces are skipped.
pub fn read_obj(path: &Path) -> Result<NodeRef, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, materials) = tobj::load_obj(path, &options)?;
    if let Err(e) = materials {
        log::debug!("Ignoring materials of {:?}: {}", path, e);
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    let group = NodeRef::group(name);

    for model in models {
        if model.mesh.indices.is_empty() {
            log::debug!("Skipping object '{}' without faces", model.name);
            continue;
        }
        let data = MeshData {
            name: model.name.clone(),
            positions: model.mesh.positions,
            normals: model.mesh.normals,
            tex_coords: model.mesh.texcoords,
            indices: model.mesh.indices,
        };
        log::trace!("Loaded object '{}' with {} vertices", data.name, data.vertex_count());
        group.add_child(NodeRef::mesh(
            model.name,
            Rc::new(Geometry::Mesh(data)),
            Material::standard().into_ref(),
        ));
    }

    if group.child_count() == 0 {
        return Err(AssetError::Empty(path.to_path_buf()));
    }

    log::info!("Loaded model {:?} with {} mesh(es)", path, group.child_count());
    Ok(group)
}

/// Load a model, choosing the format from the file extension
///
/// Unknown extensions are read as OBJ.
pub fn read_model(path: &Path) -> Result<NodeRef, AssetError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "gltf" | "glb" => read_gltf(path),
        _ => read_obj(path),
    }
}

impl AssetQueue {
    /// Queue a model load; `on_load` decides what, if anything, to insert
    pub fn load_model(
        &mut self,
        path: &str,
        on_load: impl FnOnce(Result<NodeRef, AssetError>, &mut SceneRegistry) + 'static,
    ) {
        let resolved = self.resolve(path);
        self.enqueue(format!("model {}", path), move |registry: &mut SceneRegistry| {
            let result = read_model(&resolved);
            if let Err(e) = &result {
                log::warn!("Model load failed: {}", e);
            }
            on_load(result, registry);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;
    use std::path::PathBuf;

    const QUAD: &str = "o quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("viewer_engine_{}_{}.obj", name, std::process::id()));
        std::fs::write(&path, contents).expect("write obj");
        path
    }

    #[test]
    fn test_read_obj_builds_mesh_children() {
        let path = write_temp("quad", QUAD);
        let model = read_obj(&path).expect("quad loads");

        let children = model.children();
        assert_eq!(children.len(), 1);
        match &children[0].borrow().kind {
            NodeKind::Mesh(mesh) => assert_eq!(mesh.geometry.triangle_count(), 2),
            other => panic!("expected a mesh, got {:?}", other),
        }

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_model_without_faces_is_rejected() {
        let path = write_temp("points", "# nothing to draw\nv 0 0 0\n");
        assert!(read_obj(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_model_inserts_scaled_first_child() {
        let path = write_temp("volume", QUAD);
        let mut queue = AssetQueue::with_dir("unused");
        let mut registry = SceneRegistry::new();

        queue.load_model(path.to_str().expect("utf-8 temp path"), |result, registry| {
            if let Ok(model) = result {
                if let Some(first) = model.children().into_iter().next() {
                    first.set_uniform_scale(150.0);
                    registry.add(first);
                }
            }
        });
        assert_eq!(registry.managed_count(), 0);

        queue.poll(&mut registry);
        assert_eq!(registry.managed_count(), 1);
        let scale = registry.managed()[0].borrow().transform.scale;
        assert_eq!(scale.x, 150.0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_failed_model_leaves_scene_untouched() {
        let mut queue = AssetQueue::with_dir(std::env::temp_dir());
        let mut registry = SceneRegistry::new();
        let failed = Rc::new(std::cell::Cell::new(false));
        let flag = Rc::clone(&failed);

        queue.load_model("viewer_engine_missing_model.obj", move |result, _| {
            flag.set(matches!(result, Err(AssetError::NotFound(_))));
        });
        queue.poll(&mut registry);

        assert!(failed.get());
        assert_eq!(registry.root().child_count(), 0);
    }
}
