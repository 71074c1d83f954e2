/// Scene: a collection of SceneNodes and LOD groups.
///
/// Nodes and groups live in SlotMaps keyed by NodeKey / LodKey, so keys
/// handed to deferred asset tasks stay valid across unrelated removals.

use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use crate::engine_error;
use crate::camera::Ray;
use super::fragment::SceneFragment;
use super::lod::{LodGroup, LodKey, LodLevel};
use super::node::{NodeKey, SceneNode};

/// One pick result: a node whose world bounds the ray enters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeKey,
    /// Entry distance along the ray
    pub distance: f32,
}

/// A named scene root containing nodes and LOD groups.
///
/// Nodes are managed via stable keys (NodeKey).
/// Keys remain valid even after other nodes are removed.
pub struct Scene {
    /// Scene name (key in the SceneManager)
    name: String,
    /// Nodes stored in a slot map for O(1) insert/remove
    nodes: SlotMap<NodeKey, SceneNode>,
    /// LOD-managed objects referencing nodes of this scene
    lod_groups: SlotMap<LodKey, LodGroup>,
    /// Nodes whose world matrix changed since last take_dirty_transforms()
    dirty_transforms: FxHashSet<NodeKey>,
}

impl Scene {
    /// Create a new empty scene (internal: only via SceneManager)
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: SlotMap::with_key(),
            lod_groups: SlotMap::with_key(),
            dirty_transforms: FxHashSet::default(),
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== NODES =====

    /// Add a node to the scene
    ///
    /// Returns a stable key that remains valid until the node is removed.
    pub fn add_node(&mut self, node: SceneNode) -> NodeKey {
        let key = self.nodes.insert(node);
        self.dirty_transforms.insert(key);
        key
    }

    /// Remove a node. Returns false if the key is invalid.
    ///
    /// LOD levels still pointing at the node are skipped on update.
    pub fn remove_node(&mut self, key: NodeKey) -> bool {
        self.dirty_transforms.remove(&key);
        self.nodes.remove(key).is_some()
    }

    /// Get a node by key
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Get a node by key for flag edits (use `set_world_matrix` for transforms)
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Check if a key refers to a node of this scene
    pub fn contains_node(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Set the world matrix of a node. Returns false if key is invalid.
    pub fn set_world_matrix(&mut self, key: NodeKey, matrix: Mat4) -> bool {
        if let Some(node) = self.nodes.get_mut(key) {
            node.set_world_matrix(matrix);
            self.dirty_transforms.insert(key);
            true
        } else {
            false
        }
    }

    /// Get the set of nodes with pending transform changes.
    pub fn dirty_transforms(&self) -> &FxHashSet<NodeKey> {
        &self.dirty_transforms
    }

    /// Take and clear the dirty transform set.
    pub fn take_dirty_transforms(&mut self) -> FxHashSet<NodeKey> {
        std::mem::take(&mut self.dirty_transforms)
    }

    /// Iterate over all nodes (key, node)
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    /// Iterate over visible nodes only
    pub fn visible_nodes(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter().filter(|(_, node)| node.is_visible())
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Instantiate every node of a fragment, placed by `placement`.
    ///
    /// Returns the created keys in fragment order.
    pub fn apply_fragment(&mut self, fragment: &SceneFragment, placement: Mat4) -> Vec<NodeKey> {
        fragment
            .nodes()
            .iter()
            .map(|template| {
                self.add_node(SceneNode::new(
                    template.name.clone(),
                    placement * template.local_matrix,
                    template.bounding_box,
                ))
            })
            .collect()
    }

    // ===== LOD GROUPS =====

    /// Register a LOD group. Every level must reference a node of this scene.
    pub fn add_lod_group(&mut self, group: LodGroup) -> Result<LodKey> {
        for level in group.levels() {
            self.check_level_nodes(group.name(), level)?;
        }
        Ok(self.lod_groups.insert(group))
    }

    /// Add a level to an existing group (typically when its asset finishes loading)
    pub fn add_lod_level(&mut self, key: LodKey, level: LodLevel) -> Result<()> {
        let Some(group) = self.lod_groups.get(key) else {
            engine_error!("plaza3d::Scene", "LOD group not found in scene '{}'", self.name);
            return Err(Error::InvalidResource(format!(
                "LOD group not found in scene '{}'", self.name)));
        };
        self.check_level_nodes(group.name(), &level)?;
        if let Some(group) = self.lod_groups.get_mut(key) {
            group.add_level(level);
        }
        Ok(())
    }

    /// Get a LOD group by key
    pub fn lod_group(&self, key: LodKey) -> Option<&LodGroup> {
        self.lod_groups.get(key)
    }

    /// Iterate over all LOD groups (key, group)
    pub fn lod_groups(&self) -> impl Iterator<Item = (LodKey, &LodGroup)> {
        self.lod_groups.iter()
    }

    /// Get the number of LOD groups
    pub fn lod_group_count(&self) -> usize {
        self.lod_groups.len()
    }

    /// Re-evaluate every LOD group against the viewer position.
    ///
    /// Returns the number of groups whose active level changed.
    pub fn update_lods(&mut self, eye: Vec3) -> usize {
        let mut switches = 0;
        for (_, group) in self.lod_groups.iter_mut() {
            let distance = eye.distance(group.position());
            if group.update(distance, &mut self.nodes).is_some() {
                switches += 1;
            }
        }
        switches
    }

    // ===== PICKING =====

    /// Cast a ray against the world bounds of every node.
    ///
    /// Hidden nodes are pickable too. Hits are ordered by ascending distance.
    pub fn pick(&self, ray: &Ray) -> Vec<PickHit> {
        let mut hits: Vec<PickHit> = self
            .nodes
            .iter()
            .filter_map(|(key, node)| {
                ray.intersect_aabb(&node.world_bounding_box())
                    .map(|distance| PickHit { node: key, distance })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Entry distance of `ray` into the node `key` (None on miss or unknown key)
    pub fn pick_node(&self, ray: &Ray, key: NodeKey) -> Option<f32> {
        let node = self.nodes.get(key)?;
        ray.intersect_aabb(&node.world_bounding_box())
    }

    fn check_level_nodes(&self, group: &str, level: &LodLevel) -> Result<()> {
        if level.nodes.is_empty() {
            engine_error!("plaza3d::Scene", "LOD group '{}' got a level with no nodes", group);
            return Err(Error::InvalidResource(format!(
                "LOD group '{}' got a level with no nodes", group)));
        }
        if level.nodes.iter().all(|&key| self.nodes.contains_key(key)) {
            Ok(())
        } else {
            engine_error!("plaza3d::Scene",
                "LOD group '{}' references a node missing from scene '{}'", group, self.name);
            Err(Error::InvalidResource(format!(
                "LOD group '{}' references a node missing from scene '{}'", group, self.name)))
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
