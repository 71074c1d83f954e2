//! Pedestrian simulation module
//!
//! Wander-steered agents confined to a bounded volume.

mod agent;
mod simulator;
mod volume;
mod wander;

pub use agent::{Agent, AgentId};
pub use simulator::AgentSimulator;
pub use volume::BoundedVolume;
pub use wander::WanderBehavior;
