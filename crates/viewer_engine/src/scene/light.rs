//! Lighting system

use crate::foundation::color::Color;
use crate::foundation::math::Vec3;
use crate::properties::{AttributeValue, PropertyError, PropertyTarget};
use std::cell::RefCell;
use std::rc::Rc;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction
    Ambient,
    /// Directional light (like sunlight)
    Directional {
        /// Direction the light travels, normalized
        direction: Vec3,
    },
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub kind: LightKind,
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
}

/// Shared light handle
pub type LightRef = Rc<RefCell<Light>>;

impl Light {
    /// Create an ambient light
    pub fn ambient(color: impl Into<Color>, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: color.into(),
            intensity,
        }
    }

    /// Create a directional light
    pub fn directional(direction: Vec3, color: impl Into<Color>, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional {
                direction: direction.normalize(),
            },
            color: color.into(),
            intensity,
        }
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> LightRef {
        Rc::new(RefCell::new(self))
    }

    /// Color scaled by intensity, as a shader would consume it
    pub fn radiance(&self) -> Vec3 {
        Vec3::new(self.color.r, self.color.g, self.color.b) * self.intensity
    }
}

impl PropertyTarget for Light {
    fn type_name(&self) -> &'static str {
        "Light"
    }

    fn property_names(&self) -> Vec<&'static str> {
        vec!["color", "intensity"]
    }

    fn read_attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "color" => Some(AttributeValue::Color(self.color)),
            "intensity" => Some(AttributeValue::Scalar(self.intensity)),
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
            ("intensity", AttributeValue::Scalar(intensity)) => self.intensity = intensity,
            (_, found) => {
                return Err(PropertyError::KindMismatch {
                    name: name.to_string(),
                    expected,
                    found: found.kind(),
                })
            }
        }
        Ok(())
    }
}
