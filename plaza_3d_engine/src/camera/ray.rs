/// Pick rays and pointer normalisation.
///
/// A click is normalised to device coordinates, turned into a world-space
/// ray by `Camera::pick_ray`, and tested against node bounds with a slab test.

use glam::{Vec2, Vec3};
use crate::scene::AABB;

/// Half-line in world space. `direction` is kept unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalising `direction` (a zero direction stays zero)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an axis-aligned box.
    ///
    /// Returns the entry distance along the ray, `Some(0.0)` when the origin
    /// is inside the box, and `None` on a miss or when the box lies entirely
    /// behind the origin.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<f32> {
        let mut tmin = 0.0f32;
        let mut tmax = f32::INFINITY;
        for i in 0..3 {
            let s = self.origin[i];
            let dir = self.direction[i];
            let minb = aabb.min[i];
            let maxb = aabb.max[i];
            if dir.abs() < 1e-6 {
                if s < minb || s > maxb {
                    return None;
                }
            } else {
                let inv = 1.0 / dir;
                let mut t0 = (minb - s) * inv;
                let mut t1 = (maxb - s) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                tmin = tmin.max(t0);
                tmax = tmax.min(t1);
                if tmin > tmax {
                    return None;
                }
            }
        }
        Some(tmin)
    }
}

/// Map a pointer position in pixels to normalised device coordinates.
///
/// The viewport's top-left pixel maps to (-1, 1) and the bottom-right to
/// (1, -1): +y points up. A degenerate viewport maps everything to the center.
pub fn normalize_pointer(x_px: f32, y_px: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (x_px / width) * 2.0 - 1.0,
        -(y_px / height) * 2.0 + 1.0,
    )
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
