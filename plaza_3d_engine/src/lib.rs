/*!
# Plaza 3D Engine

Headless core of an interactive town-plaza scene: wandering pedestrians,
distance-based level of detail, and an outdoor/indoor scene switch driven
by clicks on trigger models.

Rendering, windowing and file formats stay behind two seams: a
`RenderBackend` receives one `FrameSubmission` per tick, and an
`AssetLoader` delivers loaded fragments whose scene mutations are applied
between ticks.

## Architecture

- **SceneManager / Scene**: named scene roots, node storage, LOD groups, picking
- **AgentSimulator**: seeded wander steering inside a bounded volume
- **AnimationMixer / SharedPosePool**: one evaluated pose shared by every pedestrian
- **SceneTransitionController**: outdoor/indoor state machine
- **OrbitControls**: pointer and keyboard camera navigation
- **FrameDriver**: fixed per-tick update order and input routing
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod scene;
pub mod camera;
pub mod anim;
pub mod sim;
pub mod assets;
pub mod frame;

// Main plaza3d namespace module
pub mod plaza3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine logging hub
    pub use crate::engine::Engine;

    // Session driver
    pub use crate::frame::{FrameDriver, FrameStats};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod config {
        pub use crate::config::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod anim {
        pub use crate::anim::*;
    }

    pub mod sim {
        pub use crate::sim::*;
    }

    pub mod assets {
        pub use crate::assets::*;
    }

    pub mod frame {
        pub use crate::frame::*;
    }
}

// Re-export math library at crate root
pub use glam;
