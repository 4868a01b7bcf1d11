//! glTF 2.0 scene loading through `gltf`
//!
//! Only geometry, node transforms and the metallic-roughness factors are
//! read. Textures referenced by the file are left to the texture loader.

use super::AssetError;
use crate::foundation::color::Color;
use crate::foundation::math::{Quat, Quaternion, Transform, Vec3};
use crate::render::{Geometry, Material, MaterialRef, MeshData};
use crate::scene::NodeRef;
use std::path::Path;
use std::rc::Rc;

/// Load the default scene of a `.gltf` or `.glb` file
///
/// The returned group stands for the scene; its children are the scene's
/// top-level nodes with their local transforms. A node whose mesh has a
/// single primitive becomes a mesh node itself, otherwise it becomes a group
/// with one mesh child per primitive. Files without the default scene fall
/// back to the first scene.
pub fn read_gltf(path: &Path) -> Result<NodeRef, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob)?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| AssetError::Empty(path.to_path_buf()))?;

    let name = scene
        .name()
        .map(str::to_string)
        .or_else(|| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "scene".to_string());
    let root = NodeRef::group(name);

    let mut meshes = 0;
    for node in scene.nodes() {
        root.add_child(build_node(&node, &buffers, &mut meshes));
    }

    if meshes == 0 {
        return Err(AssetError::Empty(path.to_path_buf()));
    }

    log::info!(
        "Loaded glTF {:?} with {} node(s) and {} mesh(es)",
        path,
        root.descendant_count(),
        meshes
    );
    Ok(root)
}

fn build_node(node: &gltf::Node<'_>, buffers: &[gltf::buffer::Data], meshes: &mut usize) -> NodeRef {
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node {}", node.index()));

    let mut primitives: Vec<NodeRef> = node
        .mesh()
        .map(|mesh| read_primitives(&mesh, buffers))
        .unwrap_or_default();
    *meshes += primitives.len();

    let result = if primitives.len() == 1 {
        let mesh = primitives.remove(0);
        mesh.borrow_mut().name = name;
        mesh
    } else {
        let group = NodeRef::group(name);
        for primitive in primitives {
            group.add_child(primitive);
        }
        group
    };

    let (translation, [x, y, z, w], scale) = node.transform().decomposed();
    result.borrow_mut().transform = Transform {
        position: Vec3::from(translation),
        rotation: Quat::from_quaternion(Quaternion::new(w, x, y, z)),
        scale: Vec3::from(scale),
    };

    for child in node.children() {
        result.add_child(build_node(&child, buffers, meshes));
    }
    result
}

fn read_primitives(mesh: &gltf::Mesh<'_>, buffers: &[gltf::buffer::Data]) -> Vec<NodeRef> {
    let mesh_name = mesh
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("mesh {}", mesh.index()));

    let mut nodes = Vec::new();
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::debug!("Skipping {:?} primitive of '{}'", primitive.mode(), mesh_name);
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            log::debug!("Skipping primitive of '{}' without positions", mesh_name);
            continue;
        };

        let positions: Vec<f32> = positions.flatten().collect();
        let normals: Vec<f32> = reader.read_normals().map(|n| n.flatten().collect()).unwrap_or_default();
        let tex_coords: Vec<f32> = reader
            .read_tex_coords(0)
            .map(|uv| uv.into_f32().flatten().collect())
            .unwrap_or_default();
        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..(positions.len() / 3) as u32).collect(),
        };

        let data = MeshData {
            name: mesh_name.clone(),
            positions,
            normals,
            tex_coords,
            indices,
        };
        if data.is_empty() {
            log::debug!("Skipping empty primitive of '{}'", mesh_name);
            continue;
        }

        log::trace!("Loaded primitive of '{}' with {} vertices", mesh_name, data.vertex_count());
        nodes.push(NodeRef::mesh(
            mesh_name.clone(),
            Rc::new(Geometry::Mesh(data)),
            read_material(&primitive.material()),
        ));
    }
    nodes
}

fn read_material(material: &gltf::Material<'_>) -> MaterialRef {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, _alpha] = pbr.base_color_factor();
    let standard = Material::standard()
        .with_color(Color::new(r, g, b))
        .with_metalness(pbr.metallic_factor())
        .with_roughness(pbr.roughness_factor());
    match material.name() {
        Some(name) => standard.with_name(name).into_ref(),
        None => standard.into_ref(),
    }
}
