/// Simulation context.
///
/// All mutable session state in one place: scenes, camera and controls,
/// transition machine, agents, the shared animation and its proxy pool.
/// The FrameDriver owns it and is its only writer; deferred asset tasks
/// receive it between ticks.

use glam::{Mat4, Vec2};
use crate::anim::{AnimationClip, AnimationMixer, SharedPosePool};
use crate::assets::LoadedAsset;
use crate::camera::{Camera, OrbitControls};
use crate::config::PlazaConfig;
use crate::error::{Error, Result};
use crate::scene::{InstanceUpdater, NodeKey, SceneManager, SceneNode, SceneTransitionController};
use crate::sim::AgentSimulator;
use crate::{engine_error, engine_info, engine_warn};
use super::clock::SimulationClock;

pub struct SimulationContext {
    pub config: PlazaConfig,
    pub scenes: SceneManager,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub transitions: SceneTransitionController,
    pub simulator: AgentSimulator,
    /// Shared pose source; None until the pedestrian asset has loaded
    pub mixer: Option<AnimationMixer>,
    pub pose_pool: SharedPosePool,
    pub updater: InstanceUpdater,
    pub clock: SimulationClock,
    /// Viewport size in pixels, used to normalise pointer positions
    pub viewport: Vec2,
    /// Scene holding the pedestrian proxies
    pedestrian_scene: String,
}

impl SimulationContext {
    /// Validate `config`, create both scene roots (outdoor attached), the
    /// camera at its vantage point and the agent population.
    pub fn new(config: PlazaConfig, outdoor_scene: &str, indoor_scene: &str) -> Result<Self> {
        config.validate()?;

        let mut scenes = SceneManager::new();
        scenes.create_scene(outdoor_scene)?;
        scenes.create_scene(indoor_scene)?;
        scenes.attach(outdoor_scene)?;

        let camera = Camera::from_config(&config.camera);
        let controls = OrbitControls::new(&config.camera, &camera);
        let transitions = SceneTransitionController::new(outdoor_scene, indoor_scene, &config.camera);
        let simulator = AgentSimulator::with_population(&config.simulation, &config.agent)?;
        let clock = SimulationClock::new(config.simulation.max_frame_delta);

        engine_info!("plaza3d::SimulationContext",
            "Session ready: outdoor '{}', indoor '{}', {} agents",
            outdoor_scene, indoor_scene, simulator.agent_count());

        Ok(Self {
            config,
            scenes,
            camera,
            controls,
            transitions,
            simulator,
            mixer: None,
            pose_pool: SharedPosePool::new(),
            updater: InstanceUpdater::new(),
            clock,
            viewport: Vec2::new(1920.0, 1080.0),
            pedestrian_scene: outdoor_scene.to_string(),
        })
    }

    pub fn pedestrian_scene(&self) -> &str {
        &self.pedestrian_scene
    }

    /// Resize the viewport (pixels); also updates the camera aspect
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.camera.set_aspect(width / height);
            self.controls.set_viewport_height(height);
        }
    }

    /// Clone a skinned asset once per agent and start its `clip_name` clip
    /// on the shared mixer.
    ///
    /// Fails without touching the scene if the asset has no skeleton or
    /// lacks the clip. Proxies are created once per session: a repeated
    /// attachment is skipped and returns the existing proxy count.
    pub fn attach_pedestrians(&mut self, asset: &LoadedAsset, clip_name: &str) -> Result<usize> {
        if !self.pose_pool.is_empty() {
            engine_warn!("plaza3d::SimulationContext",
                "Pedestrians already attached ({} proxies), ignoring '{}'",
                self.pose_pool.len(), asset.locator);
            return Ok(self.pose_pool.len());
        }
        let Some(skeleton) = asset.skeleton.clone() else {
            engine_error!("plaza3d::SimulationContext", "Asset '{}' has no skeleton", asset.locator);
            return Err(Error::InvalidResource(format!("asset '{}' has no skeleton", asset.locator)));
        };
        let Some(clip) = AnimationClip::find_by_name(&asset.clips, clip_name) else {
            engine_error!("plaza3d::SimulationContext",
                "Asset '{}' has no clip named '{}'", asset.locator, clip_name);
            return Err(Error::InvalidResource(format!(
                "asset '{}' has no clip named '{}'", asset.locator, clip_name)));
        };
        let Some(bounds) = asset.fragment.bounds() else {
            return Err(Error::InvalidResource(format!("asset '{}' is empty", asset.locator)));
        };
        let Some(scene) = self.scenes.scene_mut(&self.pedestrian_scene) else {
            return Err(Error::InvalidResource(format!("scene '{}' not found", self.pedestrian_scene)));
        };

        let mut count = 0;
        for agent in self.simulator.agents() {
            let node = scene.add_node(SceneNode::new(asset.locator.clone(), agent.world_matrix(), bounds));
            self.pose_pool.add_proxy(agent.id(), node);
            count += 1;
        }

        let mut mixer = AnimationMixer::new(skeleton);
        mixer.play(clip.clone());
        self.mixer = Some(mixer);
        engine_info!("plaza3d::SimulationContext",
            "Attached {} pedestrians playing '{}'", count, clip_name);
        Ok(count)
    }

    /// Place every node of a loaded asset into `scene_name`
    pub fn place_asset(&mut self, scene_name: &str, asset: &LoadedAsset, placement: Mat4) -> Result<Vec<NodeKey>> {
        match self.scenes.scene_mut(scene_name) {
            Some(scene) => Ok(scene.apply_fragment(&asset.fragment, placement)),
            None => {
                engine_error!("plaza3d::SimulationContext", "Scene '{}' not found", scene_name);
                Err(Error::InvalidResource(format!("scene '{}' not found", scene_name)))
            }
        }
    }
}
