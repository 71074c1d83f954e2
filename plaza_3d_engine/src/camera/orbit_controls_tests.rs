use glam::Vec3;
use crate::config::CameraConfig;
use super::*;

fn setup(enable_damping: bool) -> (OrbitControls, Camera) {
    let config = CameraConfig { enable_damping, ..CameraConfig::default() };
    let camera = Camera::from_config(&config);
    let controls = OrbitControls::new(&config, &camera);
    (controls, camera)
}

// ============================================================================
// Update at rest and distance limits
// ============================================================================

#[test]
fn test_update_without_input_keeps_eye() {
    let (mut controls, mut camera) = setup(true);
    let eye = camera.eye();
    assert!(!controls.update(&mut camera));
    assert!((camera.eye() - eye).length() < 1e-4);
}

#[test]
fn test_update_clamps_to_max_distance() {
    let (mut controls, mut camera) = setup(true);
    camera.set_eye(Vec3::new(0.0, 0.0, 50.0));
    assert!(controls.update(&mut camera));
    assert!((camera.distance() - 40.0).abs() < 1e-3);

    controls.set_max_distance(28.0);
    controls.update(&mut camera);
    assert!((camera.distance() - 28.0).abs() < 1e-3);
}

#[test]
fn test_zoom_in_respects_min_distance() {
    let (mut controls, mut camera) = setup(false);
    controls.zoom(500.0);
    controls.update(&mut camera);
    assert!((camera.distance() - controls.min_distance()).abs() < 1e-4);
}

#[test]
fn test_zoom_out_moves_away() {
    let (mut controls, mut camera) = setup(false);
    let before = camera.distance();
    controls.zoom(-1.0);
    controls.update(&mut camera);
    assert!(camera.distance() > before);
}

// ============================================================================
// Rotation and damping
// ============================================================================

#[test]
fn test_rotation_keeps_distance() {
    let (mut controls, mut camera) = setup(false);
    let before = camera.distance();
    controls.rotate(120.0, -40.0);
    assert!(controls.update(&mut camera));
    assert!((camera.distance() - before).abs() < 1e-3);
    assert_eq!(camera.target(), Vec3::ZERO);
}

#[test]
fn test_damping_converges_to_undamped_result() {
    let (mut damped, mut damped_camera) = setup(true);
    let (mut direct, mut direct_camera) = setup(false);
    damped.rotate(60.0, 0.0);
    direct.rotate(60.0, 0.0);

    direct.update(&mut direct_camera);
    damped.update(&mut damped_camera);
    // First damped frame covers only part of the rotation
    assert!((damped_camera.eye() - direct_camera.eye()).length() > 1e-2);

    for _ in 0..40 {
        damped.update(&mut damped_camera);
    }
    assert!((damped_camera.eye() - direct_camera.eye()).length() < 1e-3);
}

#[test]
fn test_phi_stays_off_the_pole() {
    let (mut controls, mut camera) = setup(false);
    controls.rotate(0.0, 100_000.0);
    controls.update(&mut camera);
    assert!(camera.eye().is_finite());
    assert!(camera.eye().y > 0.0);
}

// ============================================================================
// Panning
// ============================================================================

#[test]
fn test_key_pan_moves_target_when_enabled() {
    let (mut controls, mut camera) = setup(false);
    controls.key_pan(PanKey::Up, &camera);
    controls.update(&mut camera);
    assert!(controls.target().length() > 0.0);
    assert_eq!(camera.target(), controls.target());
}

#[test]
fn test_pan_ignored_when_disabled() {
    let (mut controls, mut camera) = setup(false);
    controls.set_enable_pan(false);
    controls.key_pan(PanKey::Left, &camera);
    controls.pan(100.0, 100.0, &camera);
    controls.update(&mut camera);
    assert_eq!(controls.target(), Vec3::ZERO);
}

#[test]
fn test_pan_key_codes() {
    assert_eq!(PanKey::from_code("ArrowLeft"), Some(PanKey::Left));
    assert_eq!(PanKey::from_code("ArrowDown"), Some(PanKey::Down));
    assert_eq!(PanKey::from_code("KeyW"), None);
}

// ============================================================================
// Save / reset / top-down keys
// ============================================================================

#[test]
fn test_save_and_reset() {
    let (mut controls, mut camera) = setup(false);
    camera.set_eye(Vec3::new(3.0, 4.0, 5.0));
    assert!(controls.handle_key("KeyS", &mut camera));

    camera.set_eye(Vec3::new(-10.0, 2.0, 0.0));
    controls.rotate(50.0, 0.0);
    assert!(controls.handle_key("KeyL", &mut camera));
    assert_eq!(camera.eye(), Vec3::new(3.0, 4.0, 5.0));

    // Pending rotation was dropped by the reset
    controls.update(&mut camera);
    assert!((camera.eye() - Vec3::new(3.0, 4.0, 5.0)).length() < 1e-4);
}

#[test]
fn test_top_down_key() {
    let (mut controls, mut camera) = setup(false);
    assert!(controls.handle_key("KeyQ", &mut camera));
    assert_eq!(camera.eye(), Vec3::new(0.0, 28.0, 0.0));
    assert!(!controls.handle_key("KeyZ", &mut camera));
}
