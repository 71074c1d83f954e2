//! Central scene manager for the engine.
//!
//! Owns every named scene and the attachment list that models the main
//! render root: only attached scenes are simulated for LOD and submitted
//! for display. Detached scenes keep their content and may still be edited
//! (late asset loads land in them safely).

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error};
use super::scene::Scene;

pub struct SceneManager {
    scenes: FxHashMap<String, Scene>,
    /// Attached scene names, in attachment order
    attached: Vec<String>,
}

impl SceneManager {
    /// Create a new empty scene manager
    pub fn new() -> Self {
        Self {
            scenes: FxHashMap::default(),
            attached: Vec::new(),
        }
    }

    // ===== SCENES =====

    /// Create a named scene. Fails if the name is already used.
    pub fn create_scene(&mut self, name: &str) -> Result<&mut Scene> {
        if self.scenes.contains_key(name) {
            engine_error!("plaza3d::SceneManager", "Scene '{}' already exists", name);
            return Err(Error::InvalidResource(format!("Scene '{}' already exists", name)));
        }
        engine_debug!("plaza3d::SceneManager", "Created scene '{}'", name);
        Ok(self.scenes.entry(name.to_string()).or_insert_with(|| Scene::new(name)))
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Remove a scene (detaching it first). Returns the removed scene.
    pub fn remove_scene(&mut self, name: &str) -> Option<Scene> {
        self.attached.retain(|attached| attached != name);
        self.scenes.remove(name)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Names of all scenes (unordered)
    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    // ===== ATTACHMENT =====

    /// Attach a scene to the render root. Attaching twice is a no-op.
    pub fn attach(&mut self, name: &str) -> Result<()> {
        if !self.scenes.contains_key(name) {
            engine_error!("plaza3d::SceneManager", "Cannot attach unknown scene '{}'", name);
            return Err(Error::InvalidResource(format!("Scene '{}' not found", name)));
        }
        if !self.is_attached(name) {
            self.attached.push(name.to_string());
        }
        Ok(())
    }

    /// Detach a scene from the render root. Returns false if it was not attached.
    pub fn detach(&mut self, name: &str) -> bool {
        let before = self.attached.len();
        self.attached.retain(|attached| attached != name);
        self.attached.len() != before
    }

    pub fn is_attached(&self, name: &str) -> bool {
        self.attached.iter().any(|attached| attached == name)
    }

    /// Attached scene names, in attachment order
    pub fn attached_scenes(&self) -> &[String] {
        &self.attached
    }

    /// Attached scenes, in attachment order
    pub fn attached(&self) -> impl Iterator<Item = &Scene> {
        self.attached.iter().filter_map(|name| self.scenes.get(name))
    }

    /// Run `f` on every attached scene, in attachment order
    pub fn for_each_attached_mut(&mut self, mut f: impl FnMut(&mut Scene)) {
        for name in &self.attached {
            if let Some(scene) = self.scenes.get_mut(name) {
                f(scene);
            }
        }
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
