/// Shared pose broadcast.
///
/// One pose source, many sinks. Each frame the mixer is advanced first, then
/// its pose is broadcast to every VisualProxy of the pool, then each proxy
/// copies the world transform of the agent it follows. All figures walk in
/// lockstep while keeping independent positions and headings.

use glam::Mat4;
use crate::scene::{NodeKey, Scene};
use crate::sim::{Agent, AgentId};
use super::pose::Pose;

/// Renderable stand-in for one agent.
///
/// Holds the agent id only; it never owns the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualProxy {
    agent: AgentId,
    node: NodeKey,
    transform: Mat4,
    /// Broadcast generation last applied (0 = never)
    pose_generation: u64,
}

impl VisualProxy {
    pub fn new(agent: AgentId, node: NodeKey) -> Self {
        Self {
            agent,
            node,
            transform: Mat4::IDENTITY,
            pose_generation: 0,
        }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn pose_generation(&self) -> u64 {
        self.pose_generation
    }
}

/// Every proxy driven by one shared animation evaluator.
#[derive(Debug, Default)]
pub struct SharedPosePool {
    proxies: Vec<VisualProxy>,
    pose: Option<Pose>,
    generation: u64,
}

impl SharedPosePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a proxy following `agent`, displayed by `node`
    pub fn add_proxy(&mut self, agent: AgentId, node: NodeKey) {
        self.proxies.push(VisualProxy::new(agent, node));
    }

    pub fn proxies(&self) -> &[VisualProxy] {
        &self.proxies
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Latest broadcast generation (0 before the first broadcast)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply `pose` identically to every member of the pool
    pub fn broadcast(&mut self, pose: &Pose) {
        match &mut self.pose {
            Some(shared) => shared.clone_from(pose),
            None => self.pose = Some(pose.clone()),
        }
        self.generation += 1;
        for proxy in &mut self.proxies {
            proxy.pose_generation = self.generation;
        }
    }

    /// Pose currently shown by `proxy` (None before the first broadcast)
    pub fn pose_of(&self, proxy: &VisualProxy) -> Option<&Pose> {
        if proxy.pose_generation == self.generation {
            self.pose.as_ref()
        } else {
            None
        }
    }

    /// Copy an agent's world transform onto its proxy
    pub fn sync(agent: &Agent, proxy: &mut VisualProxy) {
        proxy.transform = agent.world_matrix();
    }

    /// Sync every proxy from its agent. Proxies whose agent is missing keep
    /// their last transform. Returns the number synced.
    pub fn sync_all(&mut self, agents: &[Agent]) -> usize {
        let mut synced = 0;
        for proxy in &mut self.proxies {
            if let Some(agent) = agents.get(proxy.agent.index()).filter(|a| a.id() == proxy.agent) {
                Self::sync(agent, proxy);
                synced += 1;
            }
        }
        synced
    }

    /// Write proxy transforms into their scene nodes
    pub fn write_transforms(&self, scene: &mut Scene) -> usize {
        self.proxies
            .iter()
            .filter(|proxy| scene.set_world_matrix(proxy.node, proxy.transform))
            .count()
    }
}

#[cfg(test)]
#[path = "pose_pool_tests.rs"]
mod tests;
