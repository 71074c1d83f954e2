//! Session configuration
//!
//! Plain data structs carrying the town-square constants. Everything is
//! validated once at setup by [`PlazaConfig::validate`]; per-frame code
//! assumes a valid configuration.

use glam::Vec3;
use crate::error::Result;
use crate::config_err;
use crate::scene::AABB;

// ===== SIMULATION =====

/// Pedestrian population and simulation clock settings
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of pedestrians spawned at startup
    pub agent_count: usize,
    /// Side of the square (centered on the origin, y = 0) agents spawn in
    pub spawn_extent: f32,
    /// Region agents are clamped into after every tick
    pub bounds: AABB,
    /// Seed for the steering random source (None = entropy)
    pub rng_seed: Option<u64>,
    /// Largest delta accepted by the simulation clock, in seconds
    pub max_frame_delta: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_count: 50,
            spawn_extent: 5.0,
            bounds: AABB::new(Vec3::new(-18.0, -5.0, -18.0), Vec3::new(18.0, 5.0, 18.0)),
            rng_seed: None,
            max_frame_delta: 0.25,
        }
    }
}

// ===== AGENT =====

/// Vehicle and wander parameters shared by every pedestrian
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub mass: f32,
    /// Units per second
    pub max_speed: f32,
    pub max_force: f32,
    /// Radians per second; bounds the heading change of one tick
    pub max_turn_rate: f32,
    /// Radius of the wander circle
    pub wander_radius: f32,
    /// Distance of the wander circle ahead of the agent
    pub wander_distance: f32,
    /// Jitter applied to the wander target, per second
    pub wander_jitter: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            max_speed: 1.0,
            max_force: 100.0,
            max_turn_rate: std::f32::consts::PI,
            wander_radius: 1.0,
            wander_distance: 5.0,
            wander_jitter: 5.0,
        }
    }
}

// ===== CAMERA =====

/// Projection, vantage points and orbit-control limits
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view, in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Initial eye position, also restored on every scene transition
    pub vantage: Vec3,
    /// Orbit center
    pub target: Vec3,
    /// Eye position of the top-down shortcut
    pub top_down: Vec3,
    pub min_distance: f32,
    pub outdoor_max_distance: f32,
    pub indoor_max_distance: f32,
    pub pan_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    /// Pixels panned per arrow key press
    pub key_pan_speed: f32,
    /// Box the eye is clamped into every frame
    pub travel_box: AABB,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            vantage: Vec3::new(8.0, 7.0, 13.0),
            target: Vec3::ZERO,
            top_down: Vec3::new(0.0, 28.0, 0.0),
            min_distance: 1.0,
            outdoor_max_distance: 40.0,
            indoor_max_distance: 28.0,
            pan_speed: 3.0,
            rotate_speed: 3.0,
            zoom_speed: 3.0,
            enable_damping: true,
            damping_factor: 0.5,
            key_pan_speed: 20.0,
            travel_box: AABB::new(Vec3::new(-40.0, 0.0, -40.0), Vec3::new(40.0, 40.0, 40.0)),
        }
    }
}

// ===== SESSION =====

/// Complete session configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlazaConfig {
    pub simulation: SimulationConfig,
    pub agent: AgentConfig,
    pub camera: CameraConfig,
}

impl PlazaConfig {
    /// Check every precondition the per-frame code relies on
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.agent.validate()?;
        self.camera.validate()
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.bounds.is_valid() {
            return Err(config_err!("plaza3d::Config",
                "agent bounds are inverted: min {:?} max {:?}", self.bounds.min, self.bounds.max));
        }
        if !(self.spawn_extent >= 0.0) {
            return Err(config_err!("plaza3d::Config",
                "spawn extent must be non-negative, got {}", self.spawn_extent));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(config_err!("plaza3d::Config",
                "max frame delta must be positive, got {}", self.max_frame_delta));
        }
        Ok(())
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("mass", self.mass),
            ("max speed", self.max_speed),
            ("max force", self.max_force),
            ("max turn rate", self.max_turn_rate),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(config_err!("plaza3d::Config", "agent {} must be positive, got {}", name, value));
            }
        }
        let non_negative = [
            ("wander radius", self.wander_radius),
            ("wander distance", self.wander_distance),
            ("wander jitter", self.wander_jitter),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(config_err!("plaza3d::Config", "agent {} must be non-negative, got {}", name, value));
            }
        }
        Ok(())
    }
}

impl CameraConfig {
    /// Vertical field of view in radians
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(config_err!("plaza3d::Config", "camera fov {} out of range", self.fov_degrees));
        }
        if !(self.near > 0.0 && self.far > self.near) || !(self.aspect > 0.0) {
            return Err(config_err!("plaza3d::Config",
                "invalid projection: near {} far {} aspect {}", self.near, self.far, self.aspect));
        }
        if !(self.min_distance >= 0.0) {
            return Err(config_err!("plaza3d::Config",
                "camera min distance must be non-negative, got {}", self.min_distance));
        }
        if self.min_distance > self.indoor_max_distance {
            return Err(config_err!("plaza3d::Config",
                "camera min distance {} exceeds indoor max distance {}",
                self.min_distance, self.indoor_max_distance));
        }
        if self.indoor_max_distance > self.outdoor_max_distance {
            return Err(config_err!("plaza3d::Config",
                "indoor max distance {} exceeds outdoor max distance {}",
                self.indoor_max_distance, self.outdoor_max_distance));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(config_err!("plaza3d::Config",
                "damping factor must be in (0, 1], got {}", self.damping_factor));
        }
        if !self.travel_box.is_valid() || !self.travel_box.contains_point(self.vantage) {
            return Err(config_err!("plaza3d::Config",
                "camera vantage {:?} lies outside the travel box", self.vantage));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
