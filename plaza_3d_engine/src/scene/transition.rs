/// Outdoor / indoor scene transitions.
///
/// A two-state machine driven by pointer picks. Only the trigger that leads
/// out of the current mode is tested: the entry trigger while outdoors, the
/// exit trigger while indoors. The exit trigger is registered late (its
/// model loads asynchronously); until then indoor clicks are no-ops.
///
/// Transition table:
///
/// | current | trigger | next    | effects                                   |
/// |---------|---------|---------|-------------------------------------------|
/// | Outdoor | Entry   | Indoor  | swap roots, vantage, indoor limit, no pan  |
/// | Indoor  | Exit    | Outdoor | swap roots, vantage, outdoor limit, pan    |
/// | Outdoor | Exit    | Outdoor | none                                      |
/// | Indoor  | Entry   | Indoor  | none                                      |

use glam::Vec3;
use crate::camera::{Camera, OrbitControls, Ray};
use crate::config::CameraConfig;
use crate::error::Result;
use crate::engine_info;
use super::node::NodeKey;
use super::scene_manager::SceneManager;

/// Active scene root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneMode {
    Outdoor,
    Indoor,
}

/// Which designated volume was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// Enters the indoor scene (the store building)
    Entry,
    /// Leaves the indoor scene (the exit door)
    Exit,
}

/// A pickable node designated as a transition trigger
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTrigger {
    /// Scene holding the node
    pub scene: String,
    pub node: NodeKey,
}

/// Side effects of one transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEffects {
    pub detach: String,
    pub attach: String,
    /// Eye position the camera is reset to
    pub vantage: Vec3,
    pub max_distance: f32,
    pub enable_pan: bool,
}

/// Two-state outdoor/indoor machine
#[derive(Debug, Clone)]
pub struct SceneTransitionController {
    mode: SceneMode,
    outdoor_scene: String,
    indoor_scene: String,
    entry: Option<SceneTrigger>,
    exit: Option<SceneTrigger>,
    vantage: Vec3,
    orbit_target: Vec3,
    outdoor_max_distance: f32,
    indoor_max_distance: f32,
}

impl SceneTransitionController {
    /// Controller starting outdoors, without triggers
    pub fn new(outdoor_scene: impl Into<String>, indoor_scene: impl Into<String>, camera: &CameraConfig) -> Self {
        Self {
            mode: SceneMode::Outdoor,
            outdoor_scene: outdoor_scene.into(),
            indoor_scene: indoor_scene.into(),
            entry: None,
            exit: None,
            vantage: camera.vantage,
            orbit_target: camera.target,
            outdoor_max_distance: camera.outdoor_max_distance,
            indoor_max_distance: camera.indoor_max_distance,
        }
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn outdoor_scene(&self) -> &str {
        &self.outdoor_scene
    }

    pub fn indoor_scene(&self) -> &str {
        &self.indoor_scene
    }

    /// Scene that should be attached in the current mode
    pub fn active_scene(&self) -> &str {
        match self.mode {
            SceneMode::Outdoor => &self.outdoor_scene,
            SceneMode::Indoor => &self.indoor_scene,
        }
    }

    pub fn set_entry_trigger(&mut self, trigger: SceneTrigger) {
        self.entry = Some(trigger);
    }

    pub fn set_exit_trigger(&mut self, trigger: SceneTrigger) {
        self.exit = Some(trigger);
    }

    pub fn entry_trigger(&self) -> Option<&SceneTrigger> {
        self.entry.as_ref()
    }

    pub fn exit_trigger(&self) -> Option<&SceneTrigger> {
        self.exit.as_ref()
    }

    /// Next mode for a trigger hit in `mode`
    pub fn next_mode(mode: SceneMode, kind: TriggerKind) -> SceneMode {
        match (mode, kind) {
            (SceneMode::Outdoor, TriggerKind::Entry) => SceneMode::Indoor,
            (SceneMode::Indoor, TriggerKind::Exit) => SceneMode::Outdoor,
            (mode, _) => mode,
        }
    }

    /// Record a trigger hit. Returns the effects to apply when the mode changed.
    pub fn fire(&mut self, kind: TriggerKind) -> Option<TransitionEffects> {
        let next = Self::next_mode(self.mode, kind);
        if next == self.mode {
            return None;
        }
        self.mode = next;
        let effects = match next {
            SceneMode::Indoor => TransitionEffects {
                detach: self.outdoor_scene.clone(),
                attach: self.indoor_scene.clone(),
                vantage: self.vantage,
                max_distance: self.indoor_max_distance,
                enable_pan: false,
            },
            SceneMode::Outdoor => TransitionEffects {
                detach: self.indoor_scene.clone(),
                attach: self.outdoor_scene.clone(),
                vantage: self.vantage,
                max_distance: self.outdoor_max_distance,
                enable_pan: true,
            },
        };
        engine_info!("plaza3d::Transition", "Scene transition to {:?} ('{}' -> '{}')",
            next, effects.detach, effects.attach);
        Some(effects)
    }

    /// Apply transition effects to the scene roots and the camera
    pub fn apply(
        &self,
        effects: &TransitionEffects,
        scenes: &mut SceneManager,
        camera: &mut Camera,
        controls: &mut OrbitControls,
    ) -> Result<()> {
        scenes.detach(&effects.detach);
        scenes.attach(&effects.attach)?;
        controls.set_target(self.orbit_target);
        controls.place(camera, effects.vantage);
        controls.set_max_distance(effects.max_distance);
        controls.set_enable_pan(effects.enable_pan);
        Ok(())
    }

    /// Pick-test the trigger relevant to the current mode and transition on a hit.
    ///
    /// A missing trigger (exit model not loaded yet) skips the test. Returns
    /// the new mode when a transition happened.
    pub fn handle_click(
        &mut self,
        ray: &Ray,
        scenes: &mut SceneManager,
        camera: &mut Camera,
        controls: &mut OrbitControls,
    ) -> Result<Option<SceneMode>> {
        let (kind, trigger) = match self.mode {
            SceneMode::Outdoor => (TriggerKind::Entry, self.entry.as_ref()),
            SceneMode::Indoor => (TriggerKind::Exit, self.exit.as_ref()),
        };
        let Some(trigger) = trigger else {
            return Ok(None);
        };
        let hit = scenes
            .scene(&trigger.scene)
            .map(|scene| scene.pick(ray).iter().any(|hit| hit.node == trigger.node))
            .unwrap_or(false);
        if !hit {
            return Ok(None);
        }

        match self.fire(kind) {
            Some(effects) => {
                self.apply(&effects, scenes, camera, controls)?;
                Ok(Some(self.mode))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
