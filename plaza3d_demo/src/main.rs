//! Plaza3D demo
//!
//! Headless session of the town square: assets stream in, fifty pedestrians
//! wander, and a scripted visitor walks into the store and back out.
//!
//! Run with: PLAZA3D_LOG=debug cargo run -p plaza3d_demo

mod headless;
mod plaza;

use plaza_3d_engine::glam::Vec3;
use plaza_3d_engine::plaza3d::config::PlazaConfig;
use plaza_3d_engine::plaza3d::frame::SimulationContext;
use plaza_3d_engine::plaza3d::log::LogSeverity;
use plaza_3d_engine::plaza3d::{Engine, FrameDriver, Result};
use headless::{LoggingBackend, ScriptedLoader};
use plaza::{EXIT_POSITION, INDOOR, OUTDOOR, TESCO_POSITION};

const SOURCE: &str = "plaza3d::Demo";
const FRAMES: u64 = 600;
const DT: f32 = 1.0 / 60.0;

/// Scripted user input
enum Input {
    Key(&'static str),
    ClickCentre,
    ClickWorld(Vec3),
}

/// Frame at which each input is delivered (after that frame's tick)
const SCRIPT: &[(u64, Input)] = &[
    (60, Input::Key("KeyS")),
    (100, Input::ClickWorld(TESCO_POSITION)),
    (150, Input::ClickCentre),
    (200, Input::ClickWorld(EXIT_POSITION)),
    (300, Input::ClickWorld(EXIT_POSITION)),
    (420, Input::Key("KeyQ")),
    (470, Input::Key("KeyL")),
    (500, Input::Key("ArrowLeft")),
    (501, Input::Key("ArrowLeft")),
    (502, Input::Key("ArrowUp")),
];

fn main() {
    if let Err(err) = run() {
        Engine::log(LogSeverity::Error, SOURCE, format!("Demo failed: {}", err));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let context = SimulationContext::new(PlazaConfig::default(), OUTDOOR, INDOOR)?;
    let mut driver = FrameDriver::new(
        context,
        Box::new(LoggingBackend::new(60)),
        Box::new(ScriptedLoader::new()),
    );
    let requests = plaza::assemble(&mut driver)?;
    Engine::log(LogSeverity::Info, SOURCE, format!("Requested {} assets", requests));

    for frame in 1..=FRAMES {
        let stats = driver.tick(DT)?;
        if stats.lod_switches > 0 {
            Engine::log(LogSeverity::Debug, SOURCE, format!(
                "Frame {}: {} LOD switches", stats.frame, stats.lod_switches));
        }
        for (_, input) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            deliver(&mut driver, input)?;
        }
    }

    if let Some(stats) = driver.last_stats() {
        Engine::log(LogSeverity::Info, SOURCE, format!(
            "Finished after {} frames ({:.2}s): {:?} mode, {} agents, {} instances, {} failed assets",
            stats.frame, stats.elapsed, stats.mode, stats.agents, stats.visible_instances,
            driver.assets().failures().len()));
    }
    Ok(())
}

fn deliver(driver: &mut FrameDriver, input: &Input) -> Result<()> {
    let (x, y) = match input {
        Input::Key(code) => {
            let bound = driver.key(code);
            Engine::log(LogSeverity::Info, SOURCE, format!("Key {} ({})", code, if bound { "bound" } else { "unbound" }));
            return Ok(());
        }
        Input::ClickCentre => {
            let viewport = driver.context().viewport;
            (viewport.x * 0.5, viewport.y * 0.5)
        }
        Input::ClickWorld(point) => screen_position(driver, *point),
    };
    match driver.click(x, y)? {
        Some(mode) => Engine::log(LogSeverity::Info, SOURCE, format!("Click at ({:.0}, {:.0}) -> {:?}", x, y, mode)),
        None => Engine::log(LogSeverity::Info, SOURCE, format!("Click at ({:.0}, {:.0}) ignored", x, y)),
    }
    Ok(())
}

/// Viewport pixel under a world point
fn screen_position(driver: &FrameDriver, point: Vec3) -> (f32, f32) {
    let ctx = driver.context();
    let ndc = ctx.camera.view_projection_matrix().project_point3(point);
    ((ndc.x + 1.0) * 0.5 * ctx.viewport.x, (1.0 - ndc.y) * 0.5 * ctx.viewport.y)
}
