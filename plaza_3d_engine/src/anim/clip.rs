/// Keyframe animation clips.
///
/// Tracks are sampled with linear interpolation (spherical for rotations),
/// holding the first/last key outside their time range. Clip time loops.

use glam::{Quat, Vec3};
use super::pose::Pose;

/// Keyframed 3D vector (translation or scale)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackVec3 {
    pub times: Vec<f32>,
    pub values: Vec<Vec3>,
}

/// Keyframed rotation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackQuat {
    pub times: Vec<f32>,
    pub values: Vec<Quat>,
}

/// Keys bracketing `t`: (index, blend factor towards index + 1).
///
/// Returns `None` for an empty track; a factor of 0 at the ends.
fn bracket(times: &[f32], t: f32) -> Option<(usize, f32)> {
    let last = times.len().checked_sub(1)?;
    if t <= times[0] {
        return Some((0, 0.0));
    }
    if t >= times[last] {
        return Some((last, 0.0));
    }
    let next = times.partition_point(|&key| key <= t);
    let i = next - 1;
    let span = times[next] - times[i];
    let f = if span > 0.0 { (t - times[i]) / span } else { 0.0 };
    Some((i, f))
}

impl TrackVec3 {
    pub fn sample(&self, t: f32) -> Option<Vec3> {
        let (i, f) = bracket(&self.times, t)?;
        let a = *self.values.get(i)?;
        Some(match self.values.get(i + 1) {
            Some(&b) if f > 0.0 => a.lerp(b, f),
            _ => a,
        })
    }

    fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

impl TrackQuat {
    pub fn sample(&self, t: f32) -> Option<Quat> {
        let (i, f) = bracket(&self.times, t)?;
        let a = *self.values.get(i)?;
        Some(match self.values.get(i + 1) {
            Some(&b) if f > 0.0 => a.slerp(b, f),
            _ => a,
        })
    }

    fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// Tracks animating one joint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointTrack {
    pub joint: usize,
    pub translation: Option<TrackVec3>,
    pub rotation: Option<TrackQuat>,
    pub scale: Option<TrackVec3>,
}

/// Named clip (e.g. "Walk") embedded in a loaded asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    name: String,
    duration: f32,
    tracks: Vec<JointTrack>,
}

impl AnimationClip {
    /// Clip whose duration is the last key time over all tracks
    pub fn new(name: impl Into<String>, tracks: Vec<JointTrack>) -> Self {
        let duration = tracks
            .iter()
            .flat_map(|track| {
                [
                    track.translation.as_ref().map_or(0.0, TrackVec3::end_time),
                    track.rotation.as_ref().map_or(0.0, TrackQuat::end_time),
                    track.scale.as_ref().map_or(0.0, TrackVec3::end_time),
                ]
            })
            .fold(0.0f32, f32::max);
        Self { name: name.into(), duration, tracks }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn tracks(&self) -> &[JointTrack] {
        &self.tracks
    }

    /// Find a clip by name in an asset's clip list
    pub fn find_by_name<'a>(clips: &'a [AnimationClip], name: &str) -> Option<&'a AnimationClip> {
        clips.iter().find(|clip| clip.name == name)
    }

    /// Wrap `time` into the clip range
    pub fn loop_time(&self, time: f32) -> f32 {
        if self.duration > 0.0 {
            time.rem_euclid(self.duration)
        } else {
            0.0
        }
    }

    /// Write the sampled tracks at `time` (looped) into `pose`.
    ///
    /// Joints without a track keep their current transform; tracks for
    /// joints outside the pose are ignored.
    pub fn sample_into(&self, time: f32, pose: &mut Pose) {
        let t = self.loop_time(time);
        let locals = pose.locals_mut();
        for track in &self.tracks {
            let Some(local) = locals.get_mut(track.joint) else {
                continue;
            };
            if let Some(value) = track.translation.as_ref().and_then(|tr| tr.sample(t)) {
                local.translation = value;
            }
            if let Some(value) = track.rotation.as_ref().and_then(|tr| tr.sample(t)) {
                local.rotation = value;
            }
            if let Some(value) = track.scale.as_ref().and_then(|tr| tr.sample(t)) {
                local.scale = value;
            }
        }
    }
}

#[cfg(test)]
#[path = "clip_tests.rs"]
mod tests;
