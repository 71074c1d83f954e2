use glam::{Vec2, Vec3};
use super::*;

fn unit_box_at(center: Vec3) -> AABB {
    AABB::from_center_size(center, Vec3::splat(2.0))
}

// ============================================================================
// Slab test
// ============================================================================

#[test]
fn test_ray_hits_box_ahead() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
    let t = ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).unwrap();
    assert!((t - 9.0).abs() < 1e-5);
    assert!((ray.point_at(t) - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
}

#[test]
fn test_ray_misses_box_to_the_side() {
    let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
    assert!(ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).is_none());
}

#[test]
fn test_box_behind_origin_is_not_hit() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0));
    assert!(ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).is_none());
}

#[test]
fn test_origin_inside_box_hits_at_zero() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    assert_eq!(ray.intersect_aabb(&unit_box_at(Vec3::ZERO)), Some(0.0));
}

#[test]
fn test_diagonal_ray_normalised() {
    let ray = Ray::new(Vec3::new(8.0, 7.0, 13.0), -Vec3::new(8.0, 7.0, 13.0));
    assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    let t = ray.intersect_aabb(&unit_box_at(Vec3::ZERO)).unwrap();
    assert!(t > 0.0 && t < Vec3::new(8.0, 7.0, 13.0).length());
}

// ============================================================================
// Pointer normalisation
// ============================================================================

#[test]
fn test_normalize_pointer_corners_and_center() {
    assert_eq!(normalize_pointer(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(normalize_pointer(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(normalize_pointer(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn test_normalize_pointer_degenerate_viewport() {
    assert_eq!(normalize_pointer(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
}
