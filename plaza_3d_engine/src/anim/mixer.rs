/// The single shared pose source.
///
/// One mixer evaluates one clip for the whole pedestrian pool; its pose is
/// broadcast to every visual proxy afterwards.

use super::clip::AnimationClip;
use super::pose::{Pose, Skeleton};
use crate::engine_debug;

pub struct AnimationMixer {
    skeleton: Skeleton,
    clip: Option<AnimationClip>,
    time: f32,
    time_scale: f32,
    pose: Pose,
    /// Incremented on every evaluation
    generation: u64,
}

impl AnimationMixer {
    /// Mixer holding the bind pose, with no clip playing
    pub fn new(skeleton: Skeleton) -> Self {
        let pose = skeleton.bind_pose();
        Self {
            skeleton,
            clip: None,
            time: 0.0,
            time_scale: 1.0,
            pose,
            generation: 0,
        }
    }

    /// Start playing `clip` from the beginning
    pub fn play(&mut self, clip: AnimationClip) {
        engine_debug!("plaza3d::AnimationMixer", "Playing clip '{}' ({:.2}s)", clip.name(), clip.duration());
        self.clip = Some(clip);
        self.time = 0.0;
        self.evaluate();
    }

    pub fn stop(&mut self) {
        self.clip = None;
        self.pose.reset_to_bind(&self.skeleton);
        self.generation += 1;
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    pub fn clip(&self) -> Option<&AnimationClip> {
        self.clip.as_ref()
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Unwrapped playback time, seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance playback by `dt` seconds and re-evaluate the pose
    pub fn advance(&mut self, dt: f32) {
        if self.clip.is_none() {
            return;
        }
        self.time += dt * self.time_scale;
        self.evaluate();
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn evaluate(&mut self) {
        self.pose.reset_to_bind(&self.skeleton);
        if let Some(clip) = &self.clip {
            clip.sample_into(self.time, &mut self.pose);
        }
        self.generation += 1;
    }
}
