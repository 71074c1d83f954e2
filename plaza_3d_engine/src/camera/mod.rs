//! Camera module
//!
//! Perspective camera, orbit controls and pick rays.
//!
//! The engine does NOT keep cameras in any global state: the session camera
//! and its controls are owned by the FrameDriver's simulation context.

mod camera;
mod orbit_controls;
mod ray;

pub use camera::Camera;
pub use orbit_controls::{OrbitControls, PanKey};
pub use ray::{Ray, normalize_pointer};
