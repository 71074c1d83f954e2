//! Headless collaborators for the demo session
//!
//! A loader that fabricates placeholder assets after a per-locator latency,
//! and a backend that logs frame summaries instead of drawing.

use plaza_3d_engine::glam::{Quat, Vec3};
use plaza_3d_engine::plaza3d::Engine;
use plaza_3d_engine::plaza3d::Result;
use plaza_3d_engine::plaza3d::anim::{
    AnimationClip, Joint, JointTrack, JointTransform, Skeleton, TrackQuat,
};
use plaza_3d_engine::plaza3d::assets::{AssetCompletion, AssetLoader, LoadedAsset};
use plaza_3d_engine::plaza3d::frame::{FrameSubmission, RenderBackend};
use plaza_3d_engine::plaza3d::log::LogSeverity;
use plaza_3d_engine::plaza3d::scene::{AABB, SceneFragment};
use crate::plaza::{EXIT_DOOR, SOLDIER, WALK_CLIP};

const SOURCE: &str = "plaza3d::Demo";

// ===== LOADER =====

/// Resolves requests after a scripted number of frames.
///
/// High-detail models take longer than their stand-ins and the exit door
/// arrives last, like a real network fetch of the full scene.
pub struct ScriptedLoader {
    pending: Vec<(u32, AssetCompletion)>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    fn latency(locator: &str) -> u32 {
        if locator == EXIT_DOOR {
            240
        } else if locator == SOLDIER {
            30
        } else if locator.contains("_low") {
            5
        } else {
            90
        }
    }
}

impl Default for ScriptedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader for ScriptedLoader {
    fn request(&mut self, locator: &str, completion: AssetCompletion) {
        self.pending.push((Self::latency(locator), completion));
    }

    fn poll(&mut self) {
        let mut waiting = Vec::with_capacity(self.pending.len());
        for (frames, completion) in self.pending.drain(..) {
            if frames > 0 {
                waiting.push((frames - 1, completion));
                continue;
            }
            let asset = placeholder(completion.locator());
            completion.complete_with(asset);
        }
        self.pending = waiting;
    }
}

fn placeholder(locator: &str) -> LoadedAsset {
    let name = locator
        .rsplit('/')
        .next()
        .unwrap_or(locator)
        .trim_end_matches(".glb");
    if locator == SOLDIER {
        return soldier(name);
    }
    let size = if name.contains("Building") || name.contains("church") {
        Vec3::new(6.0, 6.0, 6.0)
    } else {
        Vec3::new(2.0, 2.0, 2.0)
    };
    LoadedAsset::new(locator, SceneFragment::single(name, AABB::from_center_size(Vec3::ZERO, size)))
}

/// Three-joint figure with a looping one-second walk cycle
fn soldier(name: &str) -> LoadedAsset {
    let joints = vec![
        Joint { name: "hips".to_string(), parent: None, bind: JointTransform::IDENTITY },
        Joint {
            name: "leftLeg".to_string(),
            parent: Some(0),
            bind: JointTransform { translation: Vec3::new(-0.1, -0.1, 0.0), ..JointTransform::IDENTITY },
        },
        Joint {
            name: "rightLeg".to_string(),
            parent: Some(0),
            bind: JointTransform { translation: Vec3::new(0.1, -0.1, 0.0), ..JointTransform::IDENTITY },
        },
    ];
    let swing = |phase: f32| TrackQuat {
        times: vec![0.0, 0.5, 1.0],
        values: vec![
            Quat::from_rotation_x(0.4 * phase),
            Quat::from_rotation_x(-0.4 * phase),
            Quat::from_rotation_x(0.4 * phase),
        ],
    };
    let walk = AnimationClip::new(WALK_CLIP, vec![
        JointTrack { joint: 1, rotation: Some(swing(1.0)), ..Default::default() },
        JointTrack { joint: 2, rotation: Some(swing(-1.0)), ..Default::default() },
    ]);
    let idle = AnimationClip::new("Idle", Vec::new());

    let fragment = SceneFragment::single(name, AABB::from_center_size(Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.5, 1.8, 0.5)));
    match Skeleton::new(joints) {
        Ok(skeleton) => LoadedAsset::new(SOLDIER, fragment).with_animation(skeleton, vec![idle, walk]),
        Err(err) => {
            Engine::log(LogSeverity::Error, SOURCE, format!("Soldier skeleton rejected: {}", err));
            LoadedAsset::new(SOLDIER, fragment)
        }
    }
}

// ===== BACKEND =====

/// Logs one summary line every `interval` frames
pub struct LoggingBackend {
    interval: u64,
}

impl LoggingBackend {
    pub fn new(interval: u64) -> Self {
        Self { interval: interval.max(1) }
    }
}

impl RenderBackend for LoggingBackend {
    fn submit(&mut self, frame: &FrameSubmission) -> Result<()> {
        if frame.frame % self.interval == 0 {
            Engine::log(LogSeverity::Info, SOURCE, format!(
                "Frame {}: scenes {:?}, {} instances ({} bytes)",
                frame.frame, frame.scenes, frame.instances.len(), frame.instance_bytes().len()));
        }
        Ok(())
    }
}
