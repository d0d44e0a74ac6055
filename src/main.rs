//! Laser Trace entry point
//!
//! Headless demo: fires one laser across a scene, logs its forecast, then
//! ticks it until it hits a wall.
//!
//! Usage: `laser-trace [scene.json] [settings.json]`

use std::error::Error;
use std::process::ExitCode;

use glam::Vec3;

use laser_trace::consts::*;
use laser_trace::sim::LaserField;
use laser_trace::{Scene, Settings};

/// Seed for the generated scene when none is given
const DEMO_SEED: u64 = 7;
const DEMO_ARENA_HALF_SIZE: f32 = 20.0;
const DEMO_MIRRORS: usize = 8;
/// Stop a laser that never finds a wall
const MAX_DEMO_TICKS: u32 = 10_000;

fn load_inputs() -> Result<(Scene, Settings), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let scene = match args.next() {
        Some(path) => Scene::load(path)?,
        None => Scene::generate(DEMO_SEED, DEMO_ARENA_HALF_SIZE, DEMO_MIRRORS),
    };
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    Ok((scene, settings))
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Laser Trace starting...");

    let (scene, settings) = match load_inputs() {
        Ok(inputs) => inputs,
        Err(e) => {
            log::error!("Failed to load inputs: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut field = LaserField::new();
    let origin = Vec3::new(0.0, ARENA_WALL_HEIGHT / 2.0, 0.0);
    let id = match field.fire(origin, laser_trace::heading_to_direction(0.3), DEFAULT_SHOT_SPEED) {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to fire: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match field.forecast(id, &scene, &settings) {
        Ok(path) => {
            log::info!("Forecast: {} segments", path.len().saturating_sub(1));
            for point in &path {
                log::info!("  {}", point);
            }
        }
        Err(e) => log::warn!("Forecast failed: {}", e),
    }

    for tick in 1..=MAX_DEMO_TICKS {
        let report = field.tick(&scene, &settings);
        if let Some(laser) = field.get(id) {
            log::debug!("Tick {}: laser at {}", tick, laser.render_position);
        }
        if !report.failed.is_empty() {
            return ExitCode::FAILURE;
        }
        if report.destroyed.contains(&id) {
            log::info!("Laser hit a wall on tick {}", tick);
            return ExitCode::SUCCESS;
        }
    }

    log::warn!("Laser still flying after {} ticks", MAX_DEMO_TICKS);
    ExitCode::SUCCESS
}
