/// Wander steering.
///
/// Keeps a target on a circle of `radius` projected `distance` ahead of the
/// agent. Every tick the target is jittered by a random planar displacement
/// scaled by `jitter * dt`, pushed back onto the circle, and the steering
/// force points from the agent to the projected target. The result is
/// smooth, non-repeating motion without waypoints.

use glam::{Quat, Vec3};
use rand::Rng;
use crate::config::AgentConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct WanderBehavior {
    radius: f32,
    distance: f32,
    jitter: f32,
    /// Target on the wander circle, agent-local (y always 0)
    target: Vec3,
}

impl WanderBehavior {
    /// Behavior with a target at a random angle on the circle
    pub fn new<R: Rng>(radius: f32, distance: f32, jitter: f32, rng: &mut R) -> Self {
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            radius,
            distance,
            jitter,
            target: Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin()),
        }
    }

    pub fn from_config<R: Rng>(config: &AgentConfig, rng: &mut R) -> Self {
        Self::new(config.wander_radius, config.wander_distance, config.wander_jitter, rng)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    /// Current target on the circle (agent-local)
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Advance the target and return the steering force for an agent at
    /// `position` facing `rotation`.
    pub fn calculate<R: Rng>(&mut self, position: Vec3, rotation: Quat, dt: f32, rng: &mut R) -> Vec3 {
        let jitter = self.jitter * dt;
        self.target.x += rng.random_range(-1.0..=1.0) * jitter;
        self.target.z += rng.random_range(-1.0..=1.0) * jitter;

        self.target = match self.target.try_normalize() {
            Some(direction) => direction * self.radius,
            None => Vec3::new(0.0, 0.0, self.radius),
        };

        let local = self.target + Vec3::new(0.0, 0.0, self.distance);
        let world = position + rotation * local;
        world - position
    }
}

#[cfg(test)]
#[path = "wander_tests.rs"]
mod tests;
