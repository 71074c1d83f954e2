//! Animation module
//!
//! Keyframe clips, skeleton poses, the shared mixer and the pose pool
//! that broadcasts one evaluated pose to every cloned figure.

mod clip;
mod mixer;
mod pose;
mod pose_pool;

pub use clip::{AnimationClip, JointTrack, TrackQuat, TrackVec3};
pub use mixer::AnimationMixer;
pub use pose::{Joint, JointTransform, Pose, Skeleton};
pub use pose_pool::{SharedPosePool, VisualProxy};
