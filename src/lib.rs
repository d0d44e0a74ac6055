//! Laser Trace - kinematic laser trajectories with mirror reflection
//!
//! Core modules:
//! - `sim`: Deterministic trajectory simulation (segment tracing, reflection, ticks)
//! - `scene`: Reference scene intersection oracle (panels and spheres)
//! - `settings`: Tunable trace constants, loaded from JSON

pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{Panel, Scene, SceneError, Sphere};
pub use settings::{ConfigError, Settings};

use glam::Vec3;

/// Simulation configuration constants
pub mod consts {
    /// Budget multiplier for Predict mode (how many ticks ahead to look)
    pub const PREDICT_MULTIPLIER: f32 = 100.0;
    /// Distance lost on every surface hit; keeps the trace loop finite
    pub const TRACE_EPSILON: f32 = 0.1;
    /// Directions shorter than this (squared) cannot form a ray
    pub const MIN_DIRECTION_LENGTH_SQ: f32 = 1e-12;

    /// A mirror within this distance of a ray origin is the one the ray just left
    pub const SURFACE_SKIN: f32 = 1e-4;

    /// Default laser travel per tick
    pub const DEFAULT_SHOT_SPEED: f32 = 0.5;
    /// Height of generated arena walls and mirrors
    pub const ARENA_WALL_HEIGHT: f32 = 4.0;
}

/// Unit vector on the XZ (ground) plane for a heading angle in radians
#[inline]
pub fn heading_to_direction(theta: f32) -> Vec3 {
    Vec3::new(theta.cos(), 0.0, theta.sin())
}
