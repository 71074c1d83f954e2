//! Integration tests for distance-based level of detail
//!
//! Builds the plaza's LOD groups through the public scene API and moves the
//! viewer around them.
//!
//! Run with: cargo test --test lod_integration_tests

use plaza_3d_engine::glam::{Mat4, Vec3};
use plaza_3d_engine::plaza3d::scene::{
    AABB, InstanceUpdater, LodGroup, LodLevel, NodeKey, Scene, SceneManager, SceneNode,
};

fn add_model(scene: &mut Scene, name: &str, position: Vec3) -> NodeKey {
    scene.add_node(SceneNode::new(
        name,
        Mat4::from_translation(position),
        AABB::from_center_size(Vec3::ZERO, Vec3::splat(2.0)),
    ))
}

fn visible_names(scene: &Scene) -> Vec<String> {
    let mut names: Vec<String> = scene.visible_nodes().map(|(_, n)| n.name().to_string()).collect();
    names.sort();
    names
}

// ============================================================================
// PLAZA GROUPS
// ============================================================================

#[test]
fn test_integration_statue_switches_at_threshold() {
    let mut manager = SceneManager::new();
    let scene = manager.create_scene("outdoor").unwrap();
    let position = Vec3::new(-6.0, 0.0, 4.0);
    let high = add_model(scene, "statue_high", position);
    let low = add_model(scene, "statue_low", position);
    scene.add_lod_group(LodGroup::from_levels("statue", position, vec![
        LodLevel::new(high, 0.0),
        LodLevel::new(low, 30.0),
    ]).unwrap()).unwrap();

    // Far away: low detail
    assert_eq!(scene.update_lods(position + Vec3::new(0.0, 0.0, 31.0)), 1);
    assert_eq!(visible_names(scene), vec!["statue_low"]);
    assert!(scene.node(low).unwrap().casts_shadow());
    assert!(!scene.node(high).unwrap().casts_shadow());

    // Close up: high detail
    assert_eq!(scene.update_lods(position + Vec3::new(0.0, 0.0, 5.0)), 1);
    assert_eq!(visible_names(scene), vec!["statue_high"]);

    // Still under the threshold: no switch
    assert_eq!(scene.update_lods(position + Vec3::new(0.0, 0.0, 24.0)), 0);
    assert_eq!(visible_names(scene), vec!["statue_high"]);
}

#[test]
fn test_integration_exactly_one_level_visible_per_group() {
    let mut manager = SceneManager::new();
    let scene = manager.create_scene("outdoor").unwrap();

    let groups = [
        ("benches", Vec3::new(4.0, 0.0, 2.0), 26.0),
        ("stall", Vec3::new(-3.0, 0.0, -8.0), 22.0),
        ("church", Vec3::new(0.0, 0.0, -20.0), 26.0),
    ];
    for (name, position, threshold) in groups {
        let high = add_model(scene, &format!("{name}_high"), position);
        let low = add_model(scene, &format!("{name}_low"), position);
        scene.add_lod_group(LodGroup::from_levels(name, position, vec![
            LodLevel::new(high, 0.0),
            LodLevel::new(low, threshold),
        ]).unwrap()).unwrap();
    }

    for step in 0..40 {
        let eye = Vec3::new(step as f32 * 2.0 - 40.0, 7.0, 13.0);
        scene.update_lods(eye);
        for (_, group) in scene.lod_groups() {
            let visible = group
                .levels()
                .iter()
                .filter(|level| level.nodes.iter().all(|&key| scene.node(key).unwrap().is_visible()))
                .count();
            assert_eq!(visible, 1, "group {} at eye {:?}", group.name(), eye);
        }
    }
}

#[test]
fn test_integration_late_level_joins_group() {
    let mut manager = SceneManager::new();
    let scene = manager.create_scene("outdoor").unwrap();
    let position = Vec3::ZERO;
    let low = add_model(scene, "tesco_low", position);
    let group = scene.add_lod_group(LodGroup::from_levels("tesco", position, vec![
        LodLevel::new(low, 24.0),
    ]).unwrap()).unwrap();

    // Only one level so far: it is used at every distance
    scene.update_lods(Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(visible_names(scene), vec!["tesco_low"]);

    let high = add_model(scene, "tesco_high", position);
    scene.add_lod_level(group, LodLevel::new(high, 0.0)).unwrap();
    assert_eq!(scene.update_lods(Vec3::new(0.0, 0.0, 5.0)), 1);

    assert_eq!(visible_names(scene), vec!["tesco_high"]);
    assert_eq!(scene.lod_group(group).unwrap().levels()[0].nodes, vec![high]);
}

#[test]
fn test_integration_logo_single_level_always_visible() {
    let mut manager = SceneManager::new();
    let scene = manager.create_scene("outdoor").unwrap();
    let logo = add_model(scene, "logo", Vec3::new(0.0, 10.0, 0.0));
    scene.add_lod_group(LodGroup::from_levels("logo", Vec3::new(0.0, 10.0, 0.0), vec![
        LodLevel::without_shadows(logo, 0.0),
    ]).unwrap()).unwrap();

    for distance in [0.0, 15.0, 500.0] {
        scene.update_lods(Vec3::new(distance, 10.0, 0.0));
        assert!(scene.node(logo).unwrap().is_visible());
        assert!(!scene.node(logo).unwrap().casts_shadow());
    }
}

#[test]
fn test_integration_updater_sees_lod_visibility() {
    let mut manager = SceneManager::new();
    let scene = manager.create_scene("indoor").unwrap();
    let mut updater = InstanceUpdater::new();

    let position = Vec3::new(2.0, 0.0, 2.0);
    let high = add_model(scene, "tescoAssets_high", position);
    let low = add_model(scene, "tescoAssets_low", position);
    scene.add_lod_group(LodGroup::from_levels("tescoAssets", position, vec![
        LodLevel::new(high, 0.0),
        LodLevel::new(low, 8.0),
    ]).unwrap()).unwrap();

    scene.update_lods(position + Vec3::new(0.0, 0.0, 20.0));
    updater.update_instances(scene);
    let instances = updater.visible_instances(scene);

    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].world_matrix(), Mat4::from_translation(position));
}

#[test]
fn test_integration_group_with_foreign_node_rejected() {
    let mut manager = SceneManager::new();
    let foreign = {
        let indoor = manager.create_scene("indoor").unwrap();
        add_model(indoor, "shelf", Vec3::ZERO)
    };
    let outdoor = manager.create_scene("outdoor").unwrap();

    let group = LodGroup::from_levels("shelf", Vec3::ZERO, vec![LodLevel::new(foreign, 0.0)]).unwrap();

    assert!(outdoor.add_lod_group(group).is_err());
    assert_eq!(outdoor.lod_group_count(), 0);
}
