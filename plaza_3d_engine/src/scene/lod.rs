/// Distance-based level-of-detail selection.
///
/// A LodGroup owns an ordered list of levels, each pointing at the nodes of
/// one representation. Exactly one level is active: the one with the greatest
/// threshold not exceeding the viewer distance (level 0 below every
/// threshold, the last level beyond every threshold). Inactive levels are
/// hidden and never cast or receive shadows.

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::config_err;
use crate::engine_trace;
use super::node::{NodeFlags, NodeKey, SceneNode};

new_key_type! {
    /// Stable key for a LodGroup within a Scene.
    pub struct LodKey;
}

/// Flags cleared on every inactive level
const LEVEL_FLAGS: NodeFlags = NodeFlags::VISIBLE
    .union(NodeFlags::CAST_SHADOW)
    .union(NodeFlags::RECEIVE_SHADOW);

// ===== LOD LEVEL =====

/// One representation of a LOD-managed object.
///
/// A representation is a whole loaded model, so it may span several nodes.
/// All of them are shown and hidden together.
#[derive(Debug, Clone, PartialEq)]
pub struct LodLevel {
    /// Nodes displayed while this level is active
    pub nodes: Vec<NodeKey>,
    /// Distance from which this level becomes active
    pub threshold: f32,
    /// Shadow flags applied while active (`NodeFlags::empty()` for low-detail stand-ins)
    pub shadows: NodeFlags,
}

impl LodLevel {
    /// Single-node level that casts and receives shadows while active
    pub fn new(node: NodeKey, threshold: f32) -> Self {
        Self::from_nodes(vec![node], threshold)
    }

    /// Single-node level without shadows (low-detail stand-in)
    pub fn without_shadows(node: NodeKey, threshold: f32) -> Self {
        Self::new(node, threshold).with_shadows(NodeFlags::empty())
    }

    /// Level spanning every node of a placed model, with shadows
    pub fn from_nodes(nodes: Vec<NodeKey>, threshold: f32) -> Self {
        Self { nodes, threshold, shadows: NodeFlags::SHADOWS }
    }

    pub fn with_shadows(mut self, shadows: NodeFlags) -> Self {
        self.shadows = shadows & NodeFlags::SHADOWS;
        self
    }
}

// ===== SELECTION =====

/// Index of the level to display at `distance`.
///
/// Levels must be sorted ascending by threshold. Returns `None` only for an
/// empty list. Distances below the first threshold (or NaN) select level 0.
pub fn select_level_index(levels: &[LodLevel], distance: f32) -> Option<usize> {
    if levels.is_empty() {
        return None;
    }
    let count = levels.partition_point(|level| level.threshold <= distance);
    Some(count.saturating_sub(1))
}

/// Level to display at `distance` (see [`select_level_index`])
pub fn select_level(levels: &[LodLevel], distance: f32) -> Option<&LodLevel> {
    select_level_index(levels, distance).map(|index| &levels[index])
}

/// Check a level list at setup time: non-empty, every level with at least
/// one node and a finite non-negative threshold, ascending order.
pub fn validate_levels(levels: &[LodLevel]) -> Result<()> {
    if levels.is_empty() {
        return Err(config_err!("plaza3d::LodGroup", "LOD level list is empty"));
    }
    for (index, level) in levels.iter().enumerate() {
        if level.nodes.is_empty() {
            return Err(config_err!("plaza3d::LodGroup", "LOD level {} has no nodes", index));
        }
        if !level.threshold.is_finite() || level.threshold < 0.0 {
            return Err(config_err!("plaza3d::LodGroup",
                "LOD level {} has invalid threshold {}", index, level.threshold));
        }
    }
    if let Some(index) = levels.windows(2).position(|pair| pair[0].threshold > pair[1].threshold) {
        return Err(config_err!("plaza3d::LodGroup",
            "LOD levels are not sorted: threshold {} precedes {}",
            levels[index].threshold, levels[index + 1].threshold));
    }
    Ok(())
}

// ===== LOD GROUP =====

/// Active level change reported by [`LodGroup::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodSwitch {
    /// Previously active level (None on the first update)
    pub from: Option<usize>,
    /// Newly active level
    pub to: usize,
}

/// A LOD-managed object: an anchor position and its sorted levels.
#[derive(Debug, Clone)]
pub struct LodGroup {
    name: String,
    position: Vec3,
    levels: Vec<LodLevel>,
    active: Option<usize>,
}

impl LodGroup {
    /// Create an empty group anchored at `position`
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            levels: Vec::new(),
            active: None,
        }
    }

    /// Create a group from a complete level list (validated)
    pub fn from_levels(name: impl Into<String>, position: Vec3, levels: Vec<LodLevel>) -> Result<Self> {
        validate_levels(&levels)?;
        Ok(Self {
            name: name.into(),
            position,
            levels,
            active: None,
        })
    }

    /// Insert a level, keeping the list sorted by threshold.
    ///
    /// Levels with equal thresholds keep insertion order. The active level is
    /// recomputed on the next update.
    pub fn add_level(&mut self, level: LodLevel) {
        let index = self.levels.partition_point(|l| l.threshold <= level.threshold);
        self.levels.insert(index, level);
        self.active = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World-space anchor used for the viewer distance
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn levels(&self) -> &[LodLevel] {
        &self.levels
    }

    /// Index of the active level (None before the first update)
    pub fn active_level(&self) -> Option<usize> {
        self.active
    }

    /// Nodes of the active level (empty before the first update)
    pub fn active_nodes(&self) -> &[NodeKey] {
        match self.active {
            Some(index) => &self.levels[index].nodes,
            None => &[],
        }
    }

    /// Select the level for `distance` and rewrite node flags if it changed.
    ///
    /// Level nodes missing from `nodes` are skipped when writing flags. Returns the switch when the active level changed.
    pub fn update(
        &mut self,
        distance: f32,
        nodes: &mut SlotMap<NodeKey, SceneNode>,
    ) -> Option<LodSwitch> {
        let selected = select_level_index(&self.levels, distance)?;
        if self.active == Some(selected) {
            return None;
        }

        for (index, level) in self.levels.iter().enumerate() {
            for &key in &level.nodes {
                if let Some(node) = nodes.get_mut(key) {
                    let mut flags = node.flags() - LEVEL_FLAGS;
                    if index == selected {
                        flags |= NodeFlags::VISIBLE | level.shadows;
                    }
                    node.set_flags(flags);
                }
            }
        }

        let switch = LodSwitch { from: self.active, to: selected };
        self.active = Some(selected);
        engine_trace!("plaza3d::LodGroup",
            "'{}' switched to level {} (threshold {}, distance {:.2})",
            self.name, selected, self.levels[selected].threshold, distance);
        Some(switch)
    }
}

#[cfg(test)]
#[path = "lod_tests.rs"]
mod tests;
