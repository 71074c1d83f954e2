/// Per-frame orchestration.
///
/// One `tick` runs to completion before the next: deferred asset tasks are
/// applied first, then the fixed update order runs and the frame is
/// submitted. Pointer and key input is routed between ticks.

use crate::assets::{AssetLoader, AssetQueue, RequestId, SceneTask};
use crate::camera::normalize_pointer;
use crate::error::Result;
use crate::scene::SceneMode;
use crate::engine_trace;
use super::context::SimulationContext;
use super::render_backend::{FrameSubmission, RenderBackend, CLEAR_COLOR};

/// Counters reported by every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    /// Simulated seconds since the session started
    pub elapsed: f64,
    /// Delta applied this tick, after clamping
    pub delta: f32,
    pub agents: usize,
    pub lod_switches: usize,
    pub visible_instances: usize,
    pub tasks_applied: usize,
    pub mode: SceneMode,
}

pub struct FrameDriver {
    context: SimulationContext,
    backend: Box<dyn RenderBackend>,
    loader: Box<dyn AssetLoader>,
    assets: AssetQueue,
    last_stats: Option<FrameStats>,
}

impl FrameDriver {
    pub fn new(context: SimulationContext, backend: Box<dyn RenderBackend>, loader: Box<dyn AssetLoader>) -> Self {
        Self {
            context,
            backend,
            loader,
            assets: AssetQueue::new(),
            last_stats: None,
        }
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.context
    }

    pub fn assets(&self) -> &AssetQueue {
        &self.assets
    }

    /// Stats of the last completed tick
    pub fn last_stats(&self) -> Option<&FrameStats> {
        self.last_stats.as_ref()
    }

    /// Request an asset; `task` runs at the start of the tick after it loads
    pub fn request_asset(&mut self, locator: &str, task: SceneTask) -> RequestId {
        self.assets.request(self.loader.as_mut(), locator, task)
    }

    /// Run one frame of `dt` seconds.
    ///
    /// Only a backend submission failure is returned as an error.
    pub fn tick(&mut self, dt: f32) -> Result<FrameStats> {
        // Deferred scene mutations land strictly between frames
        self.loader.poll();
        let mut tasks_applied = 0;
        for ready in self.assets.collect() {
            if ready.apply(&mut self.context) {
                tasks_applied += 1;
            }
        }

        let ctx = &mut self.context;
        let dt = ctx.clock.advance(dt);

        if let Some(mixer) = ctx.mixer.as_mut() {
            mixer.advance(dt);
        }

        ctx.simulator.update(dt);

        if let Some(mixer) = ctx.mixer.as_ref() {
            ctx.pose_pool.broadcast(mixer.pose());
        }
        ctx.pose_pool.sync_all(ctx.simulator.agents());
        let pedestrian_scene = ctx.pedestrian_scene().to_string();
        if let Some(scene) = ctx.scenes.scene_mut(&pedestrian_scene) {
            ctx.pose_pool.write_transforms(scene);
        }

        let eye = ctx.camera.eye();
        let mut lod_switches = 0;
        ctx.scenes.for_each_attached_mut(|scene| lod_switches += scene.update_lods(eye));

        let clamped = ctx.config.camera.travel_box.clamp_point(ctx.camera.eye());
        ctx.camera.set_eye(clamped);
        ctx.controls.update(&mut ctx.camera);

        let mut instances = Vec::new();
        let updater = &mut ctx.updater;
        ctx.scenes.for_each_attached_mut(|scene| {
            updater.update_instances(scene);
            instances.extend(updater.visible_instances(scene));
        });

        let submission = FrameSubmission {
            frame: ctx.clock.frame(),
            scenes: ctx.scenes.attached_scenes().to_vec(),
            view_projection: ctx.camera.view_projection_matrix(),
            clear_color: CLEAR_COLOR,
            instances,
        };
        self.backend.submit(&submission)?;

        let ctx = &self.context;
        let stats = FrameStats {
            frame: ctx.clock.frame(),
            elapsed: ctx.clock.elapsed(),
            delta: dt,
            agents: ctx.simulator.agent_count(),
            lod_switches,
            visible_instances: submission.instances.len(),
            tasks_applied,
            mode: ctx.transitions.mode(),
        };
        engine_trace!("plaza3d::FrameDriver",
            "Frame {}: {} instances, {} LOD switches", stats.frame, stats.visible_instances, stats.lod_switches);
        self.last_stats = Some(stats);
        Ok(stats)
    }

    /// Route a pointer click (viewport pixels) into the transition controller.
    ///
    /// Returns the new mode when the click caused a transition.
    pub fn click(&mut self, x_px: f32, y_px: f32) -> Result<Option<SceneMode>> {
        let ctx = &mut self.context;
        let ndc = normalize_pointer(x_px, y_px, ctx.viewport.x, ctx.viewport.y);
        let ray = ctx.camera.pick_ray(ndc);
        ctx.transitions.handle_click(&ray, &mut ctx.scenes, &mut ctx.camera, &mut ctx.controls)
    }

    /// Route a keyboard code to the orbit controls. Returns false if unbound.
    pub fn key(&mut self, code: &str) -> bool {
        let ctx = &mut self.context;
        ctx.controls.handle_key(code, &mut ctx.camera)
    }
}

#[cfg(test)]
#[path = "frame_driver_tests.rs"]
mod tests;
