/// Skeletons and evaluated poses.

use glam::{Mat4, Quat, Vec3};
use crate::error::{Error, Result};
use crate::engine_error;

/// Local joint transform (translation, rotation, scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl JointTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for JointTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    /// Parent joint index; parents always precede their children
    pub parent: Option<usize>,
    pub bind: JointTransform,
}

/// Joint hierarchy shared by every cloned figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    joints: Vec<Joint>,
}

impl Skeleton {
    /// Build a skeleton; every parent index must be smaller than its child's
    pub fn new(joints: Vec<Joint>) -> Result<Self> {
        for (index, joint) in joints.iter().enumerate() {
            if let Some(parent) = joint.parent {
                if parent >= index {
                    engine_error!("plaza3d::Skeleton",
                        "Joint '{}' ({}) has parent {} that does not precede it", joint.name, index, parent);
                    return Err(Error::InvalidResource(format!(
                        "joint '{}' parent {} does not precede index {}", joint.name, parent, index)));
                }
            }
        }
        Ok(Self { joints })
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn find_joint(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|joint| joint.name == name)
    }

    /// Pose with every joint at its bind transform
    pub fn bind_pose(&self) -> Pose {
        Pose {
            locals: self.joints.iter().map(|joint| joint.bind).collect(),
        }
    }
}

/// Evaluated local joint transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    locals: Vec<JointTransform>,
}

impl Pose {
    pub fn locals(&self) -> &[JointTransform] {
        &self.locals
    }

    pub fn local(&self, joint: usize) -> Option<&JointTransform> {
        self.locals.get(joint)
    }

    pub(crate) fn locals_mut(&mut self) -> &mut [JointTransform] {
        &mut self.locals
    }

    /// Reset every joint to the skeleton's bind transform
    pub(crate) fn reset_to_bind(&mut self, skeleton: &Skeleton) {
        for (local, joint) in self.locals.iter_mut().zip(skeleton.joints()) {
            *local = joint.bind;
        }
    }

    /// Global joint matrices (model space), in joint order
    pub fn matrices(&self, skeleton: &Skeleton) -> Vec<Mat4> {
        let mut globals: Vec<Mat4> = Vec::with_capacity(self.locals.len());
        for (index, local) in self.locals.iter().enumerate() {
            let local = local.to_matrix();
            let parent = skeleton
                .joints()
                .get(index)
                .and_then(|joint| joint.parent)
                .and_then(|parent| globals.get(parent).copied());
            globals.push(match parent {
                Some(parent) => parent * local,
                None => local,
            });
        }
        globals
    }
}
