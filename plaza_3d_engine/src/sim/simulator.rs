/// Agent simulation.
///
/// Owns the pedestrian population and its random source. Each tick every
/// agent independently: evaluates wander, integrates velocity and position,
/// turns towards its velocity at a bounded rate, then is clamped into the
/// bounded volume. There is no inter-agent avoidance.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use crate::config::{AgentConfig, SimulationConfig};
use crate::error::Result;
use crate::engine_info;
use super::agent::{Agent, AgentId};
use super::volume::BoundedVolume;
use super::wander::WanderBehavior;

/// Speeds below this leave the orientation untouched
const MIN_TURN_SPEED: f32 = 1e-5;

/// Headings closer than this snap to the target orientation
const ANGLE_EPSILON: f32 = 1e-4;

pub struct AgentSimulator {
    agents: Vec<Agent>,
    bounds: BoundedVolume,
    config: AgentConfig,
    spawn_extent: f32,
    rng: ChaCha8Rng,
}

impl AgentSimulator {
    /// Empty simulator; `rng_seed` of None seeds from entropy
    pub fn new(simulation: &SimulationConfig, agent: &AgentConfig) -> Result<Self> {
        simulation.validate()?;
        agent.validate()?;
        Ok(Self {
            agents: Vec::new(),
            bounds: BoundedVolume::from_aabb(simulation.bounds)?,
            config: agent.clone(),
            spawn_extent: simulation.spawn_extent,
            rng: ChaCha8Rng::seed_from_u64(simulation.rng_seed.unwrap_or_else(rand::random)),
        })
    }

    /// Simulator populated with `simulation.agent_count` agents
    pub fn with_population(simulation: &SimulationConfig, agent: &AgentConfig) -> Result<Self> {
        let mut simulator = Self::new(simulation, agent)?;
        simulator.spawn(simulation.agent_count);
        Ok(simulator)
    }

    /// Spawn `count` agents uniformly in the spawn square (y = 0) with
    /// independent random headings. Returns their ids.
    pub fn spawn(&mut self, count: usize) -> Vec<AgentId> {
        let half = self.spawn_extent * 0.5;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let id = AgentId(self.agents.len() as u32);
            let (x, z) = if half > 0.0 {
                (self.rng.random_range(-half..half), self.rng.random_range(-half..half))
            } else {
                (0.0, 0.0)
            };
            let yaw = self.rng.random_range(0.0..std::f32::consts::TAU);
            let wander = WanderBehavior::from_config(&self.config, &mut self.rng);
            let position = self.bounds.clamp(Vec3::new(x, 0.0, z));
            self.agents.push(Agent::new(id, position, yaw, wander));
            ids.push(id);
        }
        engine_info!("plaza3d::AgentSimulator", "Spawned {} agents ({} total)", count, self.agents.len());
        ids
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn bounds(&self) -> &BoundedVolume {
        &self.bounds
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Advance every agent by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for agent in &mut self.agents {
            step_agent(agent, &self.config, &self.bounds, dt, &mut self.rng);
        }
    }
}

/// One steering tick for a single agent
fn step_agent(agent: &mut Agent, config: &AgentConfig, bounds: &BoundedVolume, dt: f32, rng: &mut ChaCha8Rng) {
    let force = agent
        .wander
        .calculate(agent.position, agent.rotation, dt, rng)
        .clamp_length_max(config.max_force);
    let acceleration = force / config.mass;

    agent.velocity = (agent.velocity + acceleration * dt).clamp_length_max(config.max_speed);
    agent.position += agent.velocity * dt;

    if agent.velocity.length() > MIN_TURN_SPEED {
        let heading = Quat::from_rotation_y(agent.velocity.x.atan2(agent.velocity.z));
        agent.rotation = rotate_towards(agent.rotation, heading, config.max_turn_rate * dt);
    }

    agent.position = bounds.clamp(agent.position);
}

/// Rotate `from` towards `to` by at most `max_angle` radians
pub(crate) fn rotate_towards(from: Quat, to: Quat, max_angle: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle < ANGLE_EPSILON || angle <= max_angle {
        return to;
    }
    from.slerp(to, max_angle / angle).normalize()
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod tests;
