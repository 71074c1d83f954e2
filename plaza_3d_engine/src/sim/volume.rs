/// Region agents are confined to.

use glam::Vec3;
use crate::error::Result;
use crate::config_err;
use crate::scene::AABB;

/// Axis-aligned box agents are clamped into after each movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedVolume {
    aabb: AABB,
}

impl BoundedVolume {
    /// Volume between two corners; fails if `min` exceeds `max` on any axis
    pub fn new(min: Vec3, max: Vec3) -> Result<Self> {
        Self::from_aabb(AABB::new(min, max))
    }

    pub fn from_aabb(aabb: AABB) -> Result<Self> {
        if !aabb.is_valid() {
            return Err(config_err!("plaza3d::BoundedVolume",
                "bounded volume is inverted: min {:?} max {:?}", aabb.min, aabb.max));
        }
        Ok(Self { aabb })
    }

    pub fn min(&self) -> Vec3 {
        self.aabb.min
    }

    pub fn max(&self) -> Vec3 {
        self.aabb.max
    }

    pub fn aabb(&self) -> &AABB {
        &self.aabb
    }

    /// Componentwise clamp into the volume
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        self.aabb.clamp_point(position)
    }

    /// Whether `min <= position <= max` componentwise
    pub fn contains(&self, position: Vec3) -> bool {
        self.aabb.contains_point(position)
    }
}
