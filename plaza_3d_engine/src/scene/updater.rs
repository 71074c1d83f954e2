/// Instance data packing.
///
/// The InstanceUpdater mirrors every scene node into a GPU-layout record.
/// World matrices are rewritten only for nodes in the scene's dirty set;
/// flags are refreshed every frame since LOD switches change them without
/// touching transforms.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use rustc_hash::FxHashMap;
use slotmap::SecondaryMap;
use super::node::{NodeKey, SceneNode};
use super::scene::Scene;

/// Per-instance record submitted to the render backend
///
/// Layout: world (Mat4, 64 bytes), flags (u32), 12 bytes padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub world: [[f32; 4]; 4],
    pub flags: u32,
    pub _pad: [u32; 3],
}

impl InstanceData {
    pub fn new(world: &Mat4, flags: u32) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            flags,
            _pad: [0; 3],
        }
    }

    pub fn from_node(node: &SceneNode) -> Self {
        Self::new(node.world_matrix(), node.flags().bits())
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.world)
    }
}

/// Keeps packed instance records in sync with scene nodes.
#[derive(Debug, Default)]
pub struct InstanceUpdater {
    /// Records per scene name
    scenes: FxHashMap<String, SecondaryMap<NodeKey, InstanceData>>,
}

impl InstanceUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the scene's dirty set into the cached records.
    ///
    /// Returns the number of world matrices rewritten.
    pub fn update_instances(&mut self, scene: &mut Scene) -> usize {
        let dirty = scene.take_dirty_transforms();
        let records = self.scenes.entry(scene.name().to_string()).or_default();

        // Removed nodes
        records.retain(|key, _| scene.contains_node(key));

        let mut written = 0;
        for key in dirty {
            if let Some(node) = scene.node(key) {
                records.insert(key, InstanceData::from_node(node));
                written += 1;
            }
        }
        for (key, node) in scene.nodes() {
            match records.get_mut(key) {
                Some(record) => record.flags = node.flags().bits(),
                None => {
                    records.insert(key, InstanceData::from_node(node));
                }
            }
        }
        written
    }

    /// Packed records of the scene's visible nodes, in node order
    pub fn visible_instances(&self, scene: &Scene) -> Vec<InstanceData> {
        let records = self.scenes.get(scene.name());
        scene
            .visible_nodes()
            .map(|(key, node)| {
                records
                    .and_then(|records| records.get(key).copied())
                    .unwrap_or_else(|| InstanceData::from_node(node))
            })
            .collect()
    }

    /// Number of cached records for a scene
    pub fn instance_count(&self, scene_name: &str) -> usize {
        self.scenes.get(scene_name).map_or(0, |records| records.len())
    }
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;
