//! Reactive property binding
//!
//! A [`PropertyProxy`] lets a generic control read and write one named
//! attribute of some target without knowing the target's type. Targets
//! describe their attributes through [`PropertyTarget`]; the proxy applies
//! the codec for the attribute's [`PropertyKind`], so a color picker always
//! sees packed `0xRRGGBB` integers even though materials store float RGB.

pub mod value;
pub mod proxy;

pub use value::{PropertyKind, PropertyValue, AttributeValue, PropertyTarget};
pub use proxy::PropertyProxy;

use thiserror::Error;

/// Property binding errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// The target has no attribute with this name
    #[error("{target} has no property '{name}'")]
    UnknownProperty {
        /// Target type name
        target: String,
        /// Requested property name
        name: String,
    },

    /// A value of the wrong kind was written or read
    #[error("property '{name}' expects a {expected:?} value, got {found:?}")]
    KindMismatch {
        /// Property name
        name: String,
        /// Kind the property holds
        expected: PropertyKind,
        /// Kind that was supplied
        found: PropertyKind,
    },

    /// The proxied target no longer exists
    #[error("target of property '{0}' has been dropped")]
    TargetDropped(String),

    /// A color string could not be parsed
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    /// A control panel has no control with this label
    #[error("no control labelled '{0}'")]
    UnknownControl(String),

    /// A slider was given a bound that is NaN or infinite
    #[error("slider '{name}' needs finite bounds, got [{min}, {max}]")]
    InvalidRange {
        /// Property name
        name: String,
        /// Requested lower bound
        min: f32,
        /// Requested upper bound
        max: f32,
    },
}
