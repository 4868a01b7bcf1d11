//! Property kinds, values and the codec between widget and target form

use super::PropertyError;
use crate::foundation::color::Color;

/// The kinds of property a generic control can edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// A single floating point number
    Scalar,
    /// An RGB color
    Color,
}

/// A property value in the form control widgets use
///
/// Colors travel as packed `0xRRGGBB` integers, which makes equality
/// canonical regardless of how the target stores them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    /// Scalar value
    Scalar(f32),
    /// Packed `0xRRGGBB` color
    Color(u32),
}

impl PropertyValue {
    /// Kind of this value
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Scalar(_) => PropertyKind::Scalar,
            Self::Color(_) => PropertyKind::Color,
        }
    }

    /// Scalar payload, if this is a scalar
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Color(_) => None,
        }
    }

    /// Packed color payload, if this is a color
    pub fn as_color(&self) -> Option<u32> {
        match self {
            Self::Color(hex) => Some(*hex),
            Self::Scalar(_) => None,
        }
    }

    /// Parse a `#rrggbb` string as color pickers report it
    pub fn parse_color(text: &str) -> Result<Self, PropertyError> {
        Color::from_hex_str(text)
            .map(|color| Self::Color(color.to_hex()))
            .ok_or_else(|| PropertyError::InvalidColor(text.to_string()))
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl From<Color> for PropertyValue {
    fn from(color: Color) -> Self {
        Self::Color(color.to_hex())
    }
}

/// A property value in the form the target object stores it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue {
    /// Scalar attribute
    Scalar(f32),
    /// Structured color attribute
    Color(Color),
}

impl AttributeValue {
    /// Kind of this attribute
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Scalar(_) => PropertyKind::Scalar,
            Self::Color(_) => PropertyKind::Color,
        }
    }
}

impl PropertyKind {
    /// Convert a stored attribute into the widget form
    pub fn encode(self, name: &str, raw: AttributeValue) -> Result<PropertyValue, PropertyError> {
        match (self, raw) {
            (Self::Scalar, AttributeValue::Scalar(value)) => Ok(PropertyValue::Scalar(value)),
            (Self::Color, AttributeValue::Color(color)) => Ok(PropertyValue::Color(color.to_hex())),
            (expected, raw) => Err(PropertyError::KindMismatch {
                name: name.to_string(),
                expected,
                found: raw.kind(),
            }),
        }
    }

    /// Convert a widget value into the stored attribute form
    pub fn decode(self, name: &str, value: PropertyValue) -> Result<AttributeValue, PropertyError> {
        match (self, value) {
            (Self::Scalar, PropertyValue::Scalar(value)) => Ok(AttributeValue::Scalar(value)),
            (Self::Color, PropertyValue::Color(hex)) => Ok(AttributeValue::Color(Color::from_hex(hex))),
            (expected, value) => Err(PropertyError::KindMismatch {
                name: name.to_string(),
                expected,
                found: value.kind(),
            }),
        }
    }
}

/// Objects whose named attributes can be edited through a proxy
///
/// Implementors list their attributes explicitly; there is no reflection.
pub trait PropertyTarget {
    /// Short type name used in diagnostics
    fn type_name(&self) -> &'static str;

    /// Names of every editable attribute
    fn property_names(&self) -> Vec<&'static str>;

    /// Read an attribute, `None` if this target has no such attribute
    fn read_attribute(&self, name: &str) -> Option<AttributeValue>;

    /// Write an attribute
    fn write_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), PropertyError>;

    /// Kind of an attribute, `None` if this target has no such attribute
    fn property_kind(&self, name: &str) -> Option<PropertyKind> {
        self.read_attribute(name).map(|value| value.kind())
    }
}
