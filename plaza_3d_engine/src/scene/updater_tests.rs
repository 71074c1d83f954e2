use glam::{Mat4, Vec3};
use crate::scene::{AABB, NodeFlags};
use super::*;

fn scene_with_two() -> (Scene, NodeKey, NodeKey) {
    let mut scene = Scene::new("outdoor");
    let bounds = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let a = scene.add_node(SceneNode::new("a", Mat4::IDENTITY, bounds));
    let b = scene.add_node(SceneNode::new("b", Mat4::from_translation(Vec3::X), bounds));
    (scene, a, b)
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_instance_data_layout() {
    assert_eq!(std::mem::size_of::<InstanceData>(), 80);
    let data = InstanceData::new(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), 5);
    let bytes: &[u8] = bytemuck::bytes_of(&data);
    assert_eq!(bytes.len(), 80);
    assert_eq!(data.world_matrix().col(3).truncate(), Vec3::new(1.0, 2.0, 3.0));
}

// ============================================================================
// Dirty tracking
// ============================================================================

#[test]
fn test_update_drains_dirty_set() {
    let (mut scene, a, _) = scene_with_two();
    let mut updater = InstanceUpdater::new();

    assert_eq!(updater.update_instances(&mut scene), 2);
    assert!(scene.dirty_transforms().is_empty());
    assert_eq!(updater.update_instances(&mut scene), 0);

    scene.set_world_matrix(a, Mat4::from_translation(Vec3::Z));
    assert_eq!(updater.update_instances(&mut scene), 1);
    assert_eq!(updater.instance_count("outdoor"), 2);
}

#[test]
fn test_flags_refresh_without_dirty_transform() {
    let (mut scene, a, _) = scene_with_two();
    let mut updater = InstanceUpdater::new();
    updater.update_instances(&mut scene);

    scene.node_mut(a).unwrap().set_flags(NodeFlags::VISIBLE | NodeFlags::CAST_SHADOW);
    updater.update_instances(&mut scene);

    let instances = updater.visible_instances(&scene);
    assert_eq!(instances.len(), 2);
    assert!(instances.iter().any(|i| i.flags == (NodeFlags::VISIBLE | NodeFlags::CAST_SHADOW).bits()));
}

#[test]
fn test_hidden_and_removed_nodes_are_not_packed() {
    let (mut scene, a, b) = scene_with_two();
    let mut updater = InstanceUpdater::new();
    updater.update_instances(&mut scene);

    scene.node_mut(a).unwrap().set_visible(false);
    scene.remove_node(b);
    updater.update_instances(&mut scene);

    assert!(updater.visible_instances(&scene).is_empty());
    assert_eq!(updater.instance_count("outdoor"), 1);
}
