//! Registry of demo-owned scene objects
//!
//! The registry owns the session's root node and remembers every object a
//! demo added, so switching demos is one [`SceneRegistry::clean`] call. The
//! render loop holds a clone of the same root and sees every mutation on its
//! next frame.

use super::node::NodeRef;

/// Root node plus the ordered set of objects the active demo owns
#[derive(Debug)]
pub struct SceneRegistry {
    root: NodeRef,
    managed: Vec<NodeRef>,
}

impl SceneRegistry {
    /// Create a registry with a fresh, empty root
    pub fn new() -> Self {
        Self::with_root(NodeRef::group("root"))
    }

    /// Create a registry around an existing root
    ///
    /// Children already under `root` are not managed and survive `clean`.
    pub fn with_root(root: NodeRef) -> Self {
        Self {
            root,
            managed: Vec::new(),
        }
    }

    /// The shared root node
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Attach `object` to the root and record it as managed
    ///
    /// Adding the same node twice attaches and records it twice.
    pub fn add(&mut self, object: NodeRef) {
        log::trace!("Registry adding '{}'", object.name());
        self.root.add_child(object.clone());
        self.managed.push(object);
    }

    /// Detach every managed object from the root and forget them
    ///
    /// Each managed entry removes one occurrence from the root's children.
    /// Entries that are no longer attached are logged and skipped. Returns
    /// the number of children actually removed.
    pub fn clean(&mut self) -> usize {
        if self.managed.is_empty() {
            return 0;
        }

        let mut removed = 0;
        for object in self.managed.drain(..) {
            if self.root.remove_child(&object) {
                removed += 1;
            } else {
                log::warn!("Managed object '{}' was no longer attached to the root", object.name());
            }
        }

        log::debug!("Registry cleaned {} object(s)", removed);
        removed
    }

    /// Managed objects in insertion order
    pub fn managed(&self) -> &[NodeRef] {
        &self.managed
    }

    /// Number of managed entries, duplicates included
    pub fn managed_count(&self) -> usize {
        self.managed.len()
    }

    /// Whether `object` is managed
    pub fn is_managed(&self, object: &NodeRef) -> bool {
        self.managed.iter().any(|m| m.ptr_eq(object))
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
