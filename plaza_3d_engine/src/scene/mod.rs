//! Scene management module
//!
//! Provides scene nodes, LOD selection, scene storage and the
//! outdoor/indoor transition state machine.

mod aabb;
mod fragment;
mod lod;
mod node;
mod scene;
mod scene_manager;
mod transition;
mod updater;

pub use aabb::AABB;
pub use fragment::{FragmentNode, SceneFragment};
pub use lod::{
    LodGroup, LodKey, LodLevel, LodSwitch,
    select_level, select_level_index, validate_levels,
};
pub use node::{NodeFlags, NodeKey, SceneNode};
pub use scene::{PickHit, Scene};
pub use scene_manager::SceneManager;
pub use transition::{
    SceneMode, SceneTrigger, SceneTransitionController, TransitionEffects, TriggerKind,
};
pub use updater::{InstanceData, InstanceUpdater};
