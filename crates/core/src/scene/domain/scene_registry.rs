use std::collections::HashMap;

use crate::scene::domain::scene_node::{Paint, SceneNode};
use crate::shared::bounds::Bounds;

/// Opaque handle to a node in a `SceneRegistry`.
///
/// Ids are allocated monotonically and never reused within a registry's
/// lifetime, so a stale handle held elsewhere (e.g. by the snapshot cache)
/// can always be recognized as dead instead of resolving to a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(u64);

/// Owns the scene nodes whose appearance can be snapshotted.
///
/// This is the externally-owned side of the weak relationship between the
/// snapshot cache and its targets: the cache holds only `TargetId`s and asks
/// the registry about liveness at lookup time.
#[derive(Default)]
pub struct SceneRegistry {
    nodes: HashMap<TargetId, SceneNode>,
    next_id: u64,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SceneNode) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Destroys a node. Snapshot entries referring to it are evicted lazily
    /// by the cache at its next lookup.
    pub fn remove(&mut self, id: TargetId) -> Option<SceneNode> {
        self.nodes.remove(&id)
    }

    pub fn node(&self, id: TargetId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: TargetId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    pub fn set_bounds(&mut self, id: TargetId, bounds: Bounds) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_bounds(bounds);
        }
    }

    pub fn set_paint(&mut self, id: TargetId, paint: Paint) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_paint(paint);
        }
    }

    pub fn detach(&mut self, id: TargetId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_attached(false);
        }
    }

    pub fn attach(&mut self, id: TargetId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_attached(true);
        }
    }

    /// Whether the node still exists at all.
    pub fn is_live(&self, id: TargetId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Whether the node can currently be rasterized: it exists, is attached,
    /// and has non-empty bounds.
    pub fn is_renderable(&self, id: TargetId) -> bool {
        self.nodes
            .get(&id)
            .map(|n| n.is_attached() && !n.bounds().is_empty())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
