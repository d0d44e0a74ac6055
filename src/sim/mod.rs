//! Deterministic trajectory simulation
//!
//! All laser movement lives here. This module must be pure and deterministic:
//! - One call per fixed tick, no wall-clock time
//! - Stable iteration order (by laser ID)
//! - Scene geometry only through the `SceneOracle` trait
//! - No rendering or platform dependencies

pub mod error;
pub mod oracle;
pub mod reflect;
pub mod state;
pub mod tick;
pub mod trace;

pub use error::TraceError;
pub use oracle::{SceneOracle, SegmentHit, SurfaceKind};
pub use reflect::reflect;
pub use state::{Laser, LaserField, TraceMode, TrajectoryState};
pub use tick::{FieldTick, TickOutcome, run_tick};
pub use trace::{SegmentStep, trace_segment};
