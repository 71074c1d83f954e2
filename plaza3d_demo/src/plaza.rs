//! Town square and store layout
//!
//! Every model is described declaratively: its LOD group, the asset backing
//! each level and where that asset is placed. Groups are registered empty at
//! startup and levels join them as their assets arrive.

use plaza_3d_engine::glam::{Mat4, Quat, Vec3};
use plaza_3d_engine::plaza3d::frame::{FrameDriver, SimulationContext};
use plaza_3d_engine::plaza3d::assets::LoadedAsset;
use plaza_3d_engine::plaza3d::scene::{LodGroup, LodKey, LodLevel, NodeFlags, SceneTrigger};
use plaza_3d_engine::plaza3d::{Error, Result};

pub const OUTDOOR: &str = "outdoor";
pub const INDOOR: &str = "indoor";

pub const SOLDIER: &str = "models/Soldier.glb";
pub const WALK_CLIP: &str = "Walk";
pub const EXIT_DOOR: &str = "models/exitScene.glb";
pub const EXIT_POSITION: Vec3 = Vec3::new(5.0, 0.0, -6.0);
pub const TESCO_POSITION: Vec3 = Vec3::new(4.0, 3.0, -6.0);

/// Role of a level beyond its LOD membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    None,
    /// Clicking it enters the store
    Entry,
}

#[derive(Debug, Clone, Copy)]
pub struct LevelDesc {
    pub locator: &'static str,
    pub threshold: f32,
    pub shadows: bool,
    pub position: Vec3,
    pub scale: f32,
    pub trigger: Trigger,
}

#[derive(Debug, Clone, Copy)]
pub struct ModelDesc {
    pub name: &'static str,
    pub scene: &'static str,
    pub anchor: Vec3,
    pub levels: &'static [LevelDesc],
}

const fn level(locator: &'static str, threshold: f32, shadows: bool, position: Vec3, scale: f32) -> LevelDesc {
    LevelDesc { locator, threshold, shadows, position, scale, trigger: Trigger::None }
}

const fn bench(x: f32, z: f32) -> [LevelDesc; 2] {
    [
        level("models/bench_low.glb", 26.0, false, Vec3::new(x, 0.25, z), 1.0),
        level("models/bench.glb", 0.0, true, Vec3::new(x, 0.0, z), 1.8),
    ]
}

const BENCH_1: [LevelDesc; 2] = bench(-1.0, -1.0);
const BENCH_1R: [LevelDesc; 2] = bench(8.0, -1.0);
const BENCH_2: [LevelDesc; 2] = bench(-1.0, 4.0);
const BENCH_2R: [LevelDesc; 2] = bench(8.0, 4.0);
const BENCH_3: [LevelDesc; 2] = bench(-1.0, 9.0);
const BENCH_3R: [LevelDesc; 2] = bench(8.0, 9.0);

const fn aisle(x: f32) -> [LevelDesc; 2] {
    [
        level("models/tescoAssets.glb", 0.0, true, Vec3::new(x, 0.0, 0.0), 0.4),
        level("models/tescoAssets_low.glb", 8.0, false, Vec3::new(x, 0.0, 0.0), 0.4),
    ]
}

const AISLE_1: [LevelDesc; 2] = aisle(0.0);
const AISLE_2: [LevelDesc; 2] = aisle(-6.0);
const AISLE_3: [LevelDesc; 2] = aisle(-12.0);

/// Every LOD-managed model of both scenes
pub const MODELS: &[ModelDesc] = &[
    ModelDesc {
        name: "statue",
        scene: OUTDOOR,
        anchor: Vec3::new(4.0, 0.0, -6.0),
        levels: &[
            level("models/statue_low.glb", 30.0, false, Vec3::new(4.0, 3.0, -6.0), 1.0),
            level("models/statue.glb", 0.0, true, Vec3::new(4.0, 0.0, -6.0), 0.016),
        ],
    },
    ModelDesc {
        name: "statue2",
        scene: OUTDOOR,
        anchor: Vec3::new(-1.0, 0.0, 6.8),
        levels: &[
            level("models/statue2_low.glb", 30.0, false, Vec3::new(-1.0, 1.8, 6.8), 0.6),
            level("models/statue2.glb", 0.0, true, Vec3::new(-1.0, 0.0, 6.8), 55.0),
        ],
    },
    ModelDesc { name: "bench1", scene: OUTDOOR, anchor: Vec3::new(-1.0, 0.0, -1.0), levels: &BENCH_1 },
    ModelDesc { name: "bench1r", scene: OUTDOOR, anchor: Vec3::new(8.0, 0.0, -1.0), levels: &BENCH_1R },
    ModelDesc { name: "bench2", scene: OUTDOOR, anchor: Vec3::new(-1.0, 0.0, 4.0), levels: &BENCH_2 },
    ModelDesc { name: "bench2r", scene: OUTDOOR, anchor: Vec3::new(8.0, 0.0, 4.0), levels: &BENCH_2R },
    ModelDesc { name: "bench3", scene: OUTDOOR, anchor: Vec3::new(-1.0, 0.0, 9.0), levels: &BENCH_3 },
    ModelDesc { name: "bench3r", scene: OUTDOOR, anchor: Vec3::new(8.0, 0.0, 9.0), levels: &BENCH_3R },
    ModelDesc {
        name: "stall",
        scene: OUTDOOR,
        anchor: Vec3::new(14.0, 0.0, 7.0),
        levels: &[
            level("models/stall_low.glb", 22.0, false, Vec3::new(14.0, 0.5, 7.0), 1.0),
            level("models/stall.glb", 0.0, true, Vec3::new(15.0, 0.0, 7.0), 2.5),
        ],
    },
    ModelDesc {
        name: "tescoBuilding",
        scene: OUTDOOR,
        anchor: TESCO_POSITION,
        levels: &[
            LevelDesc {
                locator: "models/tescoBuilding.glb",
                threshold: 0.0,
                shadows: true,
                position: TESCO_POSITION,
                scale: 1.0,
                trigger: Trigger::Entry,
            },
            level("models/tescoBuilding_low.glb", 24.0, false, TESCO_POSITION, 1.0),
        ],
    },
    ModelDesc {
        name: "redBuilding",
        scene: OUTDOOR,
        anchor: Vec3::new(0.0, 3.0, -7.0),
        levels: &[
            level("models/redBuilding_low.glb", 0.0, true, Vec3::new(0.0, 3.0, -7.0), 1.0),
            level("models/redBuilding.glb", 24.0, true, Vec3::new(0.0, 3.0, -7.0), 1.0),
        ],
    },
    ModelDesc {
        name: "church",
        scene: OUTDOOR,
        anchor: Vec3::new(6.0, 0.0, 28.0),
        levels: &[
            level("models/church_low.glb", 26.0, false, Vec3::new(6.0, 9.0, 28.0), 1.0),
            level("models/church.glb", 0.0, true, Vec3::new(6.0, -0.1, 45.0), 0.5),
        ],
    },
    ModelDesc {
        name: "tescoLogo",
        scene: OUTDOOR,
        anchor: Vec3::new(13.0, 9.0, -30.0),
        levels: &[level("models/tescoLogo.glb", 0.0, false, Vec3::new(13.0, 9.0, -30.0), 0.05)],
    },
    ModelDesc { name: "tescoAssets", scene: INDOOR, anchor: Vec3::ZERO, levels: &AISLE_1 },
    ModelDesc { name: "tescoAssets2", scene: INDOOR, anchor: Vec3::new(-6.0, 0.0, 0.0), levels: &AISLE_2 },
    ModelDesc { name: "tescoAssets3", scene: INDOOR, anchor: Vec3::new(-12.0, 0.0, 0.0), levels: &AISLE_3 },
];

fn placement(position: Vec3, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), Quat::IDENTITY, position)
}

/// Register every LOD group empty and request the assets of its levels.
///
/// Returns the number of asset requests issued.
pub fn assemble(driver: &mut FrameDriver) -> Result<usize> {
    let mut requests = 0;
    for model in MODELS {
        let group = {
            let scene = driver
                .context_mut()
                .scenes
                .scene_mut(model.scene)
                .ok_or_else(|| Error::InitializationFailed(format!("scene '{}' missing", model.scene)))?;
            scene.add_lod_group(LodGroup::new(model.name, model.anchor))?
        };
        for desc in model.levels {
            let (scene, desc) = (model.scene, *desc);
            driver.request_asset(desc.locator, Box::new(move |ctx: &mut SimulationContext, asset: LoadedAsset| {
                add_level(ctx, scene, group, &desc, &asset)
            }));
            requests += 1;
        }
    }

    driver.request_asset(EXIT_DOOR, Box::new(|ctx: &mut SimulationContext, asset: LoadedAsset| {
        let nodes = ctx.place_asset(INDOOR, &asset, placement(EXIT_POSITION, 1.5))?;
        let node = nodes
            .first()
            .copied()
            .ok_or_else(|| Error::InvalidResource(format!("'{}' has no nodes", asset.locator)))?;
        ctx.transitions.set_exit_trigger(SceneTrigger { scene: INDOOR.to_string(), node });
        Ok(())
    }));

    driver.request_asset(SOLDIER, Box::new(|ctx: &mut SimulationContext, asset: LoadedAsset| {
        ctx.attach_pedestrians(&asset, WALK_CLIP).map(|_| ())
    }));

    Ok(requests + 2)
}

fn add_level(
    ctx: &mut SimulationContext,
    scene_name: &str,
    group: LodKey,
    desc: &LevelDesc,
    asset: &LoadedAsset,
) -> Result<()> {
    let nodes = ctx.place_asset(scene_name, asset, placement(desc.position, desc.scale))?;
    let Some(scene) = ctx.scenes.scene_mut(scene_name) else {
        return Err(Error::InvalidResource(format!("scene '{}' missing", scene_name)));
    };
    let entry = nodes.first().copied();
    let level = LodLevel::from_nodes(nodes, desc.threshold);
    let level = if desc.shadows { level } else { level.with_shadows(NodeFlags::empty()) };
    scene.add_lod_level(group, level)?;
    if desc.trigger == Trigger::Entry {
        if let Some(node) = entry {
            ctx.transitions.set_entry_trigger(SceneTrigger { scene: scene_name.to_string(), node });
        }
    }
    Ok(())
}
