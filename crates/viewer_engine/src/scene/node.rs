//! Scene graph nodes
//!
//! Nodes are shared handles: the same [`NodeRef`] can sit in the tree, in
//! the registry's managed set and in a demo's local variables at once.
//! Identity is pointer identity ([`NodeRef::ptr_eq`]), never structural
//! equality.

use crate::foundation::math::{Quat, Transform, Vec3};
use crate::render::{Geometry, MaterialRef};
use super::light::LightRef;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Drawable part of a mesh node
#[derive(Debug, Clone)]
pub struct MeshNode {
    /// Shared geometry
    pub geometry: Rc<Geometry>,
    /// Shared material
    pub material: MaterialRef,
}

/// What a node contributes to a frame
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Pure transform container
    Group,
    /// Drawable mesh
    Mesh(MeshNode),
    /// Light source
    Light(LightRef),
}

impl NodeKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Mesh(_) => "mesh",
            Self::Light(_) => "light",
        }
    }
}

/// One node of the scene tree
#[derive(Debug)]
pub struct SceneNode {
    /// Debug name
    pub name: String,
    /// Local transform relative to the parent
    pub transform: Transform,
    /// Invisible nodes are skipped together with their subtree
    pub visible: bool,
    /// Node payload
    pub kind: NodeKind,
    children: Vec<NodeRef>,
}

impl SceneNode {
    /// Direct children in draw order
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }
}

/// Shared handle to a scene node
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<SceneNode>>);

impl NodeRef {
    fn from_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(SceneNode {
            name: name.into(),
            transform: Transform::identity(),
            visible: true,
            kind,
            children: Vec::new(),
        })))
    }

    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self::from_kind(name, NodeKind::Group)
    }

    /// Create a mesh node
    pub fn mesh(name: impl Into<String>, geometry: Rc<Geometry>, material: MaterialRef) -> Self {
        Self::from_kind(name, NodeKind::Mesh(MeshNode { geometry, material }))
    }

    /// Create a light node
    pub fn light(name: impl Into<String>, light: LightRef) -> Self {
        Self::from_kind(name, NodeKind::Light(light))
    }

    /// Immutable access to the node
    pub fn borrow(&self) -> Ref<'_, SceneNode> {
        self.0.borrow()
    }

    /// Mutable access to the node
    pub fn borrow_mut(&self) -> RefMut<'_, SceneNode> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Debug name
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Append `child` to this node's children
    ///
    /// A node is never made its own child. Adding a child twice stores it
    /// twice.
    pub fn add_child(&self, child: NodeRef) {
        if self.ptr_eq(&child) {
            log::warn!("Refusing to add node '{}' as its own child", self.name());
            return;
        }
        self.0.borrow_mut().children.push(child);
    }

    /// Remove the first occurrence of `child`
    ///
    /// Returns `false` when `child` is not a direct child.
    pub fn remove_child(&self, child: &NodeRef) -> bool {
        let mut node = self.0.borrow_mut();
        match node.children.iter().position(|c| c.ptr_eq(child)) {
            Some(index) => {
                node.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the direct children
    pub fn children(&self) -> Vec<NodeRef> {
        self.0.borrow().children.clone()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Whether `child` is a direct child
    pub fn contains_child(&self, child: &NodeRef) -> bool {
        self.0.borrow().children.iter().any(|c| c.ptr_eq(child))
    }

    /// Set the local position
    pub fn set_position(&self, position: Vec3) {
        self.0.borrow_mut().transform.position = position;
    }

    /// Set the local rotation
    pub fn set_rotation(&self, rotation: Quat) {
        self.0.borrow_mut().transform.rotation = rotation;
    }

    /// Set the same scale on every axis
    pub fn set_uniform_scale(&self, scale: f32) {
        self.0.borrow_mut().transform.scale = Vec3::new(scale, scale, scale);
    }

    /// Show or hide the node and its subtree
    pub fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }

    /// Material of a mesh node
    pub fn material(&self) -> Option<MaterialRef> {
        match &self.0.borrow().kind {
            NodeKind::Mesh(mesh) => Some(Rc::clone(&mesh.material)),
            _ => None,
        }
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.0
            .borrow()
            .children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(node) => f
                .debug_struct("NodeRef")
                .field("name", &node.name)
                .field("kind", &node.kind.label())
                .field("children", &node.children.len())
                .finish(),
            Err(_) => f.write_str("NodeRef(<borrowed>)"),
        }
    }
}
