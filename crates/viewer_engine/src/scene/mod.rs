//! Scene management
//!
//! A single tree of shared nodes rooted at the registry's root. Demos add
//! their objects through [`SceneRegistry`]; the render loop traverses the
//! same root every frame.

pub mod light;
pub mod node;
pub mod registry;

pub use light::{Light, LightKind, LightRef};
pub use node::{MeshNode, NodeKind, NodeRef, SceneNode};
pub use registry::SceneRegistry;
