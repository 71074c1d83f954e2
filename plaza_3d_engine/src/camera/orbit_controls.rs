/// Orbit camera controls.
///
/// Pointer and keyboard input accumulates into pending rotate / zoom / pan
/// deltas; `update` integrates them into the camera once per frame, applying
/// damping and the min/max distance limits. The eye orbits `target` on a
/// sphere (theta around +Y, phi from +Y).

use glam::{Vec2, Vec3};
use crate::config::CameraConfig;
use crate::engine_debug;
use super::camera::Camera;

/// Keeps phi away from the poles
const POLE_EPSILON: f32 = 1e-6;

/// Smallest eye movement reported as a change
const CHANGE_EPSILON: f32 = 1e-6;

/// Arrow keys that pan the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanKey {
    Up,
    Down,
    Left,
    Right,
}

impl PanKey {
    /// Map a keyboard code ("ArrowUp", ...) to a pan key
    pub fn from_code(code: &str) -> Option<PanKey> {
        match code {
            "ArrowUp" => Some(PanKey::Up),
            "ArrowDown" => Some(PanKey::Down),
            "ArrowLeft" => Some(PanKey::Left),
            "ArrowRight" => Some(PanKey::Right),
            _ => None,
        }
    }
}

/// Snapshot restored by `reset`
#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedState {
    eye: Vec3,
    target: Vec3,
}

/// Orbit controls driving one camera.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    min_distance: f32,
    max_distance: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    pan_speed: f32,
    key_pan_speed: f32,
    enable_pan: bool,
    enable_damping: bool,
    damping_factor: f32,
    top_down: Vec3,
    /// Viewport height in pixels; pointer deltas are relative to it
    viewport_height: f32,

    // Pending input
    /// (theta, phi) radians
    spherical_delta: Vec2,
    scale: f32,
    pan_offset: Vec3,

    saved: SavedState,
}

impl OrbitControls {
    /// Controls with the outdoor distance limit, saving the camera's current
    /// state as the reset point.
    pub fn new(config: &CameraConfig, camera: &Camera) -> Self {
        Self {
            target: camera.target(),
            min_distance: config.min_distance,
            max_distance: config.outdoor_max_distance,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            key_pan_speed: config.key_pan_speed,
            enable_pan: true,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            top_down: config.top_down,
            viewport_height: 1080.0,
            spherical_delta: Vec2::ZERO,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            saved: SavedState { eye: camera.eye(), target: camera.target() },
        }
    }

    // ===== LIMITS =====

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit center (pending input is kept)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn set_max_distance(&mut self, distance: f32) {
        self.max_distance = distance;
    }

    pub fn enable_pan(&self) -> bool {
        self.enable_pan
    }

    /// Enable or disable panning; disabling drops any pending pan
    pub fn set_enable_pan(&mut self, enabled: bool) {
        self.enable_pan = enabled;
        if !enabled {
            self.pan_offset = Vec3::ZERO;
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    // ===== INPUT =====

    /// Pointer drag in pixels orbits around the target
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        let per_pixel = std::f32::consts::TAU / self.viewport_height * self.rotate_speed;
        self.spherical_delta.x -= dx_px * per_pixel;
        self.spherical_delta.y -= dy_px * per_pixel;
    }

    /// Wheel steps; positive steps move towards the target
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= 0.95f32.powf(self.zoom_speed).powf(steps);
    }

    /// Pointer drag in pixels pans the target in the view plane
    pub fn pan(&mut self, dx_px: f32, dy_px: f32, camera: &Camera) {
        self.pan_pixels(dx_px * self.pan_speed, dy_px * self.pan_speed, camera);
    }

    /// Arrow-key pan by `key_pan_speed` pixels
    pub fn key_pan(&mut self, key: PanKey, camera: &Camera) {
        let speed = self.key_pan_speed;
        match key {
            PanKey::Up => self.pan_pixels(0.0, speed, camera),
            PanKey::Down => self.pan_pixels(0.0, -speed, camera),
            PanKey::Left => self.pan_pixels(speed, 0.0, camera),
            PanKey::Right => self.pan_pixels(-speed, 0.0, camera),
        }
    }

    fn pan_pixels(&mut self, dx_px: f32, dy_px: f32, camera: &Camera) {
        if !self.enable_pan {
            return;
        }
        let offset = camera.eye() - self.target;
        let target_distance = offset.length() * (camera.fov_y() * 0.5).tan();

        let forward = (self.target - camera.eye()).normalize_or_zero();
        let right = forward.cross(camera.up()).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        let left_distance = 2.0 * dx_px * target_distance / self.viewport_height;
        let up_distance = 2.0 * dy_px * target_distance / self.viewport_height;
        self.pan_offset += -right * left_distance + up * up_distance;
    }

    // ===== STATE =====

    /// Remember the current view as the reset point
    pub fn save_state(&mut self, camera: &Camera) {
        self.saved = SavedState { eye: camera.eye(), target: self.target };
        engine_debug!("plaza3d::OrbitControls", "Saved camera state at {:?}", camera.eye());
    }

    /// Restore the saved view and drop pending input
    pub fn reset(&mut self, camera: &mut Camera) {
        self.target = self.saved.target;
        camera.set_eye(self.saved.eye);
        camera.look_at(self.target);
        self.clear_pending();
        engine_debug!("plaza3d::OrbitControls", "Reset camera to {:?}", self.saved.eye);
    }

    /// Jump to the top-down vantage point
    pub fn top_down(&mut self, camera: &mut Camera) {
        camera.set_eye(self.top_down);
        camera.look_at(self.target);
    }

    /// Move the camera to `eye`, looking at the orbit target, with no pending input
    pub fn place(&mut self, camera: &mut Camera, eye: Vec3) {
        camera.set_eye(eye);
        camera.look_at(self.target);
        self.clear_pending();
    }

    /// Route a keyboard code: arrows pan, S saves, L resets, Q goes top-down.
    ///
    /// Returns false for unbound codes.
    pub fn handle_key(&mut self, code: &str, camera: &mut Camera) -> bool {
        if let Some(key) = PanKey::from_code(code) {
            self.key_pan(key, camera);
            return true;
        }
        match code {
            "KeyS" => self.save_state(camera),
            "KeyL" => self.reset(camera),
            "KeyQ" => self.top_down(camera),
            _ => return false,
        }
        true
    }

    fn clear_pending(&mut self) {
        self.spherical_delta = Vec2::ZERO;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }

    // ===== UPDATE =====

    /// Integrate pending input into the camera and enforce distance limits.
    ///
    /// With damping, only `damping_factor` of the pending rotation and pan is
    /// applied and the rest decays over the following frames. Returns true if
    /// the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let previous_eye = camera.eye();
        let offset = previous_eye - self.target;
        let radius = offset.length();

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        theta += self.spherical_delta.x * factor;
        phi += self.spherical_delta.y * factor;
        phi = phi.clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);

        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.set_eye(self.target + new_offset);
        camera.look_at(self.target);

        if self.enable_damping {
            self.spherical_delta *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.eye().distance_squared(previous_eye) > CHANGE_EPSILON
    }
}

#[cfg(test)]
#[path = "orbit_controls_tests.rs"]
mod tests;
