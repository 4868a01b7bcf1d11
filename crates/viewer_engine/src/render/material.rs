//! Material system for rendering

use crate::foundation::color::Color;
use crate::properties::{AttributeValue, PropertyError, PropertyTarget};
use super::texture::TextureRef;
use std::cell::RefCell;
use std::rc::Rc;

/// Shading model of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    /// Unlit flat color
    Basic,
    /// Diffuse-only shading
    Lambert,
    /// Metalness/roughness PBR shading
    Standard,
}

/// Which faces of a mesh are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Front faces only
    #[default]
    Front,
    /// Back faces only, used for skyboxes seen from inside
    Back,
    /// Both faces
    Double,
}

/// Surface description of a mesh
#[derive(Debug, Clone)]
pub struct Material {
    /// Optional name for debugging
    pub name: Option<String>,

    /// Shading model
    pub model: ShadingModel,

    /// Base color
    pub color: Color,

    /// Metallic factor (0.0 = dielectric, 1.0 = metallic), standard model only
    pub metalness: f32,

    /// Roughness factor (0.0 = mirror, 1.0 = completely rough), standard model only
    pub roughness: f32,

    /// Alpha/transparency (0.0 = transparent, 1.0 = opaque)
    pub opacity: f32,

    /// Strength of the bump map, standard model only
    pub bump_scale: f32,

    /// Color texture
    pub map: Option<TextureRef>,

    /// Tangent-space normal map
    pub normal_map: Option<TextureRef>,

    /// Height map used for bump mapping
    pub bump_map: Option<TextureRef>,

    /// Environment map for reflections or skybox faces
    pub env_map: Option<TextureRef>,

    /// Which faces are drawn
    pub side: Side,

    /// Whether drawing writes depth
    pub depth_write: bool,
}

/// Shared material handle
pub type MaterialRef = Rc<RefCell<Material>>;

impl Material {
    fn with_model(model: ShadingModel) -> Self {
        Self {
            name: None,
            model,
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            bump_scale: 1.0,
            map: None,
            normal_map: None,
            bump_map: None,
            env_map: None,
            side: Side::Front,
            depth_write: true,
        }
    }

    /// Unlit material
    pub fn basic() -> Self {
        Self::with_model(ShadingModel::Basic)
    }

    /// Diffuse material
    pub fn lambert() -> Self {
        Self::with_model(ShadingModel::Lambert)
    }

    /// PBR material
    pub fn standard() -> Self {
        Self::with_model(ShadingModel::Standard)
    }

    /// Set the material name for debugging
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the base color
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the metallic factor
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the alpha/transparency
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the color texture
    pub fn with_map(mut self, map: TextureRef) -> Self {
        self.map = Some(map);
        self
    }

    /// Set the normal map
    pub fn with_normal_map(mut self, normal_map: TextureRef) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    /// Set the bump map and its strength
    pub fn with_bump_map(mut self, bump_map: TextureRef, bump_scale: f32) -> Self {
        self.bump_map = Some(bump_map);
        self.bump_scale = bump_scale;
        self
    }

    /// Set the environment map
    pub fn with_env_map(mut self, env_map: TextureRef) -> Self {
        self.env_map = Some(env_map);
        self
    }

    /// Set which faces are drawn
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Enable or disable depth writes
    pub fn with_depth_write(mut self, depth_write: bool) -> Self {
        self.depth_write = depth_write;
        self
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> MaterialRef {
        Rc::new(RefCell::new(self))
    }

    /// Whether every texture the material references has finished loading
    pub fn textures_ready(&self) -> bool {
        [&self.map, &self.normal_map, &self.bump_map, &self.env_map]
            .into_iter()
            .flatten()
            .all(|texture| !texture.borrow().is_pending())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard()
    }
}

impl PropertyTarget for Material {
    fn type_name(&self) -> &'static str {
        "Material"
    }

    fn property_names(&self) -> Vec<&'static str> {
        match self.model {
            ShadingModel::Basic | ShadingModel::Lambert => vec!["color", "opacity"],
            ShadingModel::Standard => vec!["color", "opacity", "metalness", "roughness", "bump_scale"],
        }
    }

    fn read_attribute(&self, name: &str) -> Option<AttributeValue> {
        let pbr = self.model == ShadingModel::Standard;
        match name {
            "color" => Some(AttributeValue::Color(self.color)),
            "opacity" => Some(AttributeValue::Scalar(self.opacity)),
            "metalness" if pbr => Some(AttributeValue::Scalar(self.metalness)),
            "roughness" if pbr => Some(AttributeValue::Scalar(self.roughness)),
            "bump_scale" if pbr => Some(AttributeValue::Scalar(self.bump_scale)),
            _ => None,
        }
    }

    fn write_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), PropertyError> {
        let expected = self.property_kind(name).ok_or_else(|| PropertyError::UnknownProperty {
            target: self.type_name().to_string(),
            name: name.to_string(),
        })?;

        match (name, value) {
            ("color", AttributeValue::Color(color)) => self.color = color,
            ("opacity", AttributeValue::Scalar(value)) => self.opacity = value,
            ("metalness", AttributeValue::Scalar(value)) => self.metalness = value,
            ("roughness", AttributeValue::Scalar(value)) => self.roughness = value,
            ("bump_scale", AttributeValue::Scalar(value)) => self.bump_scale = value,
            (_, value) => {
                return Err(PropertyError::KindMismatch {
                    name: name.to_string(),
                    expected,
                    found: value.kind(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyKind;
    use crate::render::texture::Texture;

    #[test]
    fn test_builder_clamps_factors() {
        let material = Material::standard()
            .with_metalness(1.5)
            .with_roughness(-0.5)
            .with_opacity(2.0);
        assert_eq!(material.metalness, 1.0);
        assert_eq!(material.roughness, 0.0);
        assert_eq!(material.opacity, 1.0);
    }

    #[test]
    fn test_basic_material_hides_pbr_properties() {
        let basic = Material::basic().with_color(0x3a3030);
        assert_eq!(basic.property_names(), vec!["color", "opacity"]);
        assert_eq!(basic.read_attribute("metalness"), None);
        assert_eq!(basic.property_kind("color"), Some(PropertyKind::Color));
    }

    #[test]
    fn test_standard_material_writes_attributes() {
        let mut material = Material::standard();
        material
            .write_attribute("roughness", AttributeValue::Scalar(0.25))
            .expect("roughness is writable");
        material
            .write_attribute("color", AttributeValue::Color(Color::from_hex(0xff0000)))
            .expect("color is writable");

        assert_eq!(material.roughness, 0.25);
        assert_eq!(material.color.to_hex(), 0xff0000);
    }

    #[test]
    fn test_write_rejects_wrong_kind_and_unknown_name() {
        let mut material = Material::lambert();
        assert!(matches!(
            material.write_attribute("color", AttributeValue::Scalar(1.0)),
            Err(PropertyError::KindMismatch { .. })
        ));
        assert!(matches!(
            material.write_attribute("roughness", AttributeValue::Scalar(1.0)),
            Err(PropertyError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_textures_ready_tracks_pending_maps() {
        let map = Texture::pending("rock.jpg").into_ref();
        let material = Material::standard().with_map(Rc::clone(&map));
        assert!(!material.textures_ready());

        map.borrow_mut().fail("missing");
        assert!(material.textures_ready());
    }
}
