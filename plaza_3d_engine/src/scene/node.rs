/// Scene node types.
///
/// A SceneNode is the flattened representation of one renderable object:
/// a world transform, local bounds for picking, and visibility/shadow flags.
/// Geometry and materials stay with the rendering collaborator.

use bitflags::bitflags;
use glam::{Mat4, Quat, Vec3};
use slotmap::new_key_type;
use super::aabb::AABB;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a SceneNode within a Scene.
    ///
    /// Keys remain valid even after other nodes are removed.
    pub struct NodeKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-node render flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node is drawn
        const VISIBLE        = 1 << 0;
        /// Node casts shadows
        const CAST_SHADOW    = 1 << 1;
        /// Node receives shadows
        const RECEIVE_SHADOW = 1 << 2;
    }
}

impl NodeFlags {
    /// Both shadow bits
    pub const SHADOWS: NodeFlags = NodeFlags::CAST_SHADOW.union(NodeFlags::RECEIVE_SHADOW);
}

// ===== SCENE NODE =====

/// A renderable object placed in a scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Debug name (asset or object name)
    name: String,
    /// World transform matrix
    world_matrix: Mat4,
    /// Bounds in local space
    bounding_box: AABB,
    /// Visibility and shadow flags
    flags: NodeFlags,
}

impl SceneNode {
    /// Create a visible node without shadows
    pub fn new(name: impl Into<String>, world_matrix: Mat4, bounding_box: AABB) -> Self {
        Self {
            name: name.into(),
            world_matrix,
            bounding_box,
            flags: NodeFlags::VISIBLE,
        }
    }

    /// Builder: set flags
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the world transform matrix
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Set the world transform matrix (use `Scene::set_world_matrix` to track dirtiness)
    pub(crate) fn set_world_matrix(&mut self, matrix: Mat4) {
        self.world_matrix = matrix;
    }

    /// World-space translation
    pub fn position(&self) -> Vec3 {
        self.world_matrix.col(3).truncate()
    }

    /// World-space rotation extracted from the matrix
    pub fn rotation(&self) -> Quat {
        let (_, rotation, _) = self.world_matrix.to_scale_rotation_translation();
        rotation
    }

    /// Get the bounding box (local space)
    pub fn bounding_box(&self) -> &AABB {
        &self.bounding_box
    }

    /// Bounding box in world space
    pub fn world_bounding_box(&self) -> AABB {
        self.bounding_box.transformed(&self.world_matrix)
    }

    /// Get the flags
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Set the flags
    pub fn set_flags(&mut self, flags: NodeFlags) {
        self.flags = flags;
    }

    /// Set visibility flag
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }

    /// Check if visible
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Check if the node casts shadows
    pub fn casts_shadow(&self) -> bool {
        self.flags.contains(NodeFlags::CAST_SHADOW)
    }

    /// Check if the node receives shadows
    pub fn receives_shadow(&self) -> bool {
        self.flags.contains(NodeFlags::RECEIVE_SHADOW)
    }
}
