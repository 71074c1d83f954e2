/// Perspective viewer state.
///
/// Holds eye, target and projection parameters and derives the matrices on
/// demand. The FrameDriver owns the single session camera; OrbitControls
/// mutate it, and pointer clicks turn into pick rays through it.

use glam::{Mat4, Vec2, Vec3};
use crate::config::CameraConfig;
use super::ray::Ray;

/// Perspective camera looking from `eye` at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    /// Vertical field of view, radians
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Create a camera with +Y up
    pub fn new(eye: Vec3, target: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y,
            aspect,
            near,
            far,
        }
    }

    /// Camera at the configured vantage point, looking at the configured target
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            config.vantage,
            config.target,
            config.fov_radians(),
            config.aspect,
            config.near,
            config.far,
        )
    }

    // ===== GETTERS =====

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Distance from eye to target
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix (right-handed perspective, depth 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    // ===== SETTERS =====

    /// Move the eye, keeping the target
    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    /// Aim at a new target, keeping the eye
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    // ===== PICKING =====

    /// World-space ray from the eye through a point in normalised device
    /// coordinates (x right, y up, both in [-1, 1]).
    pub fn pick_ray(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.eye, through - self.eye)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
