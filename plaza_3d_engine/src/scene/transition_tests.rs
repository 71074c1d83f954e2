/// Tests for SceneTransitionController
///
/// These tests exercise the transition table directly and through pick
/// rays, without any rendering context.

use glam::{Mat4, Vec2, Vec3};
use crate::camera::{Camera, OrbitControls, Ray};
use crate::config::CameraConfig;
use crate::scene::{AABB, SceneNode};
use super::*;

const EXIT_POSITION: Vec3 = Vec3::new(5.0, 0.0, -6.0);

struct Fixture {
    scenes: SceneManager,
    camera: Camera,
    controls: OrbitControls,
    controller: SceneTransitionController,
    exit_node: NodeKey,
}

fn fixture() -> Fixture {
    let config = CameraConfig::default();
    let mut scenes = SceneManager::new();

    let outdoor = scenes.create_scene("outdoor").unwrap();
    let building = outdoor.add_node(SceneNode::new(
        "tescoBuilding", Mat4::IDENTITY, AABB::from_center_size(Vec3::ZERO, Vec3::splat(4.0))));

    let indoor = scenes.create_scene("indoor").unwrap();
    let exit_node = indoor.add_node(SceneNode::new(
        "exitScene",
        Mat4::from_scale_rotation_translation(Vec3::splat(1.5), glam::Quat::IDENTITY, EXIT_POSITION),
        AABB::from_center_size(Vec3::ZERO, Vec3::splat(2.0))));

    scenes.attach("outdoor").unwrap();

    let camera = Camera::from_config(&config);
    let controls = OrbitControls::new(&config, &camera);
    let mut controller = SceneTransitionController::new("outdoor", "indoor", &config);
    controller.set_entry_trigger(SceneTrigger { scene: "outdoor".to_string(), node: building });

    Fixture { scenes, camera, controls, controller, exit_node }
}

fn click_center(f: &mut Fixture) -> Option<SceneMode> {
    let ray = f.camera.pick_ray(Vec2::ZERO);
    f.controller.handle_click(&ray, &mut f.scenes, &mut f.camera, &mut f.controls).unwrap()
}

fn click_exit(f: &mut Fixture) -> Option<SceneMode> {
    let ray = Ray::new(f.camera.eye(), EXIT_POSITION - f.camera.eye());
    f.controller.handle_click(&ray, &mut f.scenes, &mut f.camera, &mut f.controls).unwrap()
}

// ============================================================================
// Transition table
// ============================================================================

#[test]
fn test_transition_table() {
    use SceneMode::*;
    use TriggerKind::*;
    assert_eq!(SceneTransitionController::next_mode(Outdoor, Entry), Indoor);
    assert_eq!(SceneTransitionController::next_mode(Indoor, Exit), Outdoor);
    assert_eq!(SceneTransitionController::next_mode(Indoor, Entry), Indoor);
    assert_eq!(SceneTransitionController::next_mode(Outdoor, Exit), Outdoor);
}

#[test]
fn test_fire_is_idempotent() {
    let mut f = fixture();
    let effects = f.controller.fire(TriggerKind::Entry).unwrap();
    assert_eq!(effects.attach, "indoor");
    assert_eq!(effects.max_distance, 28.0);
    assert!(!effects.enable_pan);

    assert!(f.controller.fire(TriggerKind::Entry).is_none());
    assert_eq!(f.controller.mode(), SceneMode::Indoor);
}

// ============================================================================
// Clicks
// ============================================================================

#[test]
fn test_entry_click_goes_indoor() {
    let mut f = fixture();
    assert_eq!(f.controller.mode(), SceneMode::Outdoor);

    assert_eq!(click_center(&mut f), Some(SceneMode::Indoor));
    assert_eq!(f.controller.mode(), SceneMode::Indoor);
    assert!(f.scenes.is_attached("indoor"));
    assert!(!f.scenes.is_attached("outdoor"));
    assert!(!f.controls.enable_pan());
    assert_eq!(f.controls.max_distance(), 28.0);
    assert_eq!(f.camera.eye(), Vec3::new(8.0, 7.0, 13.0));
    assert_eq!(f.controller.active_scene(), "indoor");
}

#[test]
fn test_click_missing_entry_trigger_is_noop() {
    let mut f = fixture();
    f.camera.look_at(Vec3::new(0.0, 40.0, 0.0));
    assert_eq!(click_center(&mut f), None);
    assert_eq!(f.controller.mode(), SceneMode::Outdoor);
}

#[test]
fn test_unloaded_exit_trigger_is_skipped() {
    let mut f = fixture();
    click_center(&mut f);
    assert!(f.controller.exit_trigger().is_none());

    assert_eq!(click_exit(&mut f), None);
    assert_eq!(f.controller.mode(), SceneMode::Indoor);
}

#[test]
fn test_exit_click_restores_outdoor_limits() {
    let mut f = fixture();
    click_center(&mut f);
    let exit_node = f.exit_node;
    f.controller.set_exit_trigger(SceneTrigger { scene: "indoor".to_string(), node: exit_node });

    assert_eq!(click_exit(&mut f), Some(SceneMode::Outdoor));
    assert!(f.scenes.is_attached("outdoor"));
    assert!(!f.scenes.is_attached("indoor"));
    assert!(f.controls.enable_pan());
    assert_eq!(f.controls.max_distance(), 40.0);
}

#[test]
fn test_entry_click_while_indoor_does_not_retrigger() {
    let mut f = fixture();
    click_center(&mut f);
    // Entry building sits at the origin the camera looks at; indoors it is ignored
    assert_eq!(click_center(&mut f), None);
    assert_eq!(f.controller.mode(), SceneMode::Indoor);
    assert_eq!(f.scenes.attached_scenes(), &["indoor".to_string()]);
}
