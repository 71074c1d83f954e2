/// Tests for SceneManager
///
/// These tests validate scene creation, retrieval, removal and the
/// attach/detach bookkeeping of the render root.

use super::*;

// ============================================================================
// Tests: SceneManager Creation
// ============================================================================

#[test]
fn test_scene_manager_new() {
    let sm = SceneManager::new();
    assert_eq!(sm.scene_count(), 0);
    assert!(sm.attached_scenes().is_empty());
}

// ============================================================================
// Tests: Create Scene
// ============================================================================

#[test]
fn test_create_scene() {
    let mut sm = SceneManager::new();
    let scene = sm.create_scene("outdoor").unwrap();
    assert_eq!(scene.name(), "outdoor");
    assert_eq!(scene.node_count(), 0);
    assert_eq!(sm.scene_count(), 1);
}

#[test]
fn test_create_scene_duplicate_name_fails() {
    let mut sm = SceneManager::new();
    sm.create_scene("outdoor").unwrap();

    let result = sm.create_scene("outdoor");
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(sm.scene_count(), 1);
}

#[test]
fn test_scene_not_found() {
    let sm = SceneManager::new();
    assert!(sm.scene("indoor").is_none());
}

// ============================================================================
// Tests: Remove Scene
// ============================================================================

#[test]
fn test_remove_scene_detaches() {
    let mut sm = SceneManager::new();
    sm.create_scene("outdoor").unwrap();
    sm.attach("outdoor").unwrap();

    assert!(sm.remove_scene("outdoor").is_some());
    assert!(!sm.is_attached("outdoor"));
    assert!(sm.remove_scene("outdoor").is_none());
    assert_eq!(sm.scene_count(), 0);
}

// ============================================================================
// Tests: Attachment
// ============================================================================

#[test]
fn test_attach_is_idempotent() {
    let mut sm = SceneManager::new();
    sm.create_scene("outdoor").unwrap();
    sm.attach("outdoor").unwrap();
    sm.attach("outdoor").unwrap();
    assert_eq!(sm.attached_scenes(), &["outdoor".to_string()]);
}

#[test]
fn test_attach_unknown_scene_fails() {
    let mut sm = SceneManager::new();
    assert!(sm.attach("attic").is_err());
}

#[test]
fn test_detach_is_idempotent() {
    let mut sm = SceneManager::new();
    sm.create_scene("outdoor").unwrap();
    sm.attach("outdoor").unwrap();
    assert!(sm.detach("outdoor"));
    assert!(!sm.detach("outdoor"));
    assert!(sm.scene("outdoor").is_some());
}

#[test]
fn test_attached_iterates_in_order_and_mutably() {
    let mut sm = SceneManager::new();
    sm.create_scene("indoor").unwrap();
    sm.create_scene("outdoor").unwrap();
    sm.attach("outdoor").unwrap();
    sm.attach("indoor").unwrap();

    let names: Vec<&str> = sm.attached().map(|s| s.name()).collect();
    assert_eq!(names, vec!["outdoor", "indoor"]);

    let mut visited = 0;
    sm.for_each_attached_mut(|_| visited += 1);
    assert_eq!(visited, 2);
}
