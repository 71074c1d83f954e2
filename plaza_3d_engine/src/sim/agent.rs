/// Pedestrian agents.

use glam::{Mat4, Quat, Vec3};
use super::wander::WanderBehavior;

/// Stable agent identity (index into the simulator's agent list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An autonomous moving agent with one wander behavior.
///
/// Forward is local +Z; orientation is a yaw around +Y.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    pub(crate) position: Vec3,
    pub(crate) rotation: Quat,
    pub(crate) velocity: Vec3,
    pub(crate) wander: WanderBehavior,
}

impl Agent {
    pub fn new(id: AgentId, position: Vec3, yaw: f32, wander: WanderBehavior) -> Self {
        Self {
            id,
            position,
            rotation: Quat::from_rotation_y(yaw),
            velocity: Vec3::ZERO,
            wander,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit forward direction in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Yaw angle around +Y, radians in (-π, π]
    pub fn yaw(&self) -> f32 {
        let forward = self.forward();
        forward.x.atan2(forward.z)
    }

    pub fn wander(&self) -> &WanderBehavior {
        &self.wander
    }

    /// World transform (rotation then translation)
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}
