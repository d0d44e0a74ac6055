//! Trajectory simulation errors

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TraceError {
    /// Direction too short (or not finite) to cast a ray along
    #[error("direction {direction} cannot be used as a ray direction")]
    InvalidDirection { direction: Vec3 },
    /// Speed must be finite and non-negative
    #[error("speed {speed} must be finite and non-negative")]
    InvalidSpeed { speed: f32 },
    #[error("invalid trace settings: {0}")]
    InvalidSettings(String),
    #[error("no laser with id {0}")]
    UnknownLaser(u32),
}
