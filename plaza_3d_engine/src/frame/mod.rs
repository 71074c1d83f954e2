//! Frame module
//!
//! Simulation clock, session context, render seam and the frame driver.

mod clock;
mod context;
mod frame_driver;
mod render_backend;

pub use clock::SimulationClock;
pub use context::SimulationContext;
pub use frame_driver::{FrameDriver, FrameStats};
pub use render_backend::{FrameSubmission, NoOpBackend, RenderBackend, CLEAR_COLOR};
