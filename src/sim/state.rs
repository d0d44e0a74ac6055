//! Trajectory state and the laser entity container
//!
//! `TrajectoryState` is a plain value owned by exactly one `Laser`. Render
//! positions live beside it and are only written back as an explicit step.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::TraceError;
use crate::consts::*;

/// Execution mode of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceMode {
    /// Travel is committed every tick; a wall hit ends the laser
    #[default]
    Live,
    /// Look far ahead without moving; state is restored after each tick
    Predict,
}

/// Position, heading and speed of one laser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryState {
    pub position: Vec3,
    /// Expected to be unit length
    pub direction: Vec3,
    /// Distance travelled per tick
    pub speed: f32,
    pub mode: TraceMode,
}

impl TrajectoryState {
    pub fn new(position: Vec3, direction: Vec3, speed: f32, mode: TraceMode) -> Self {
        Self {
            position,
            direction,
            speed,
            mode,
        }
    }

    /// Total distance one tick covers in this mode
    pub fn tick_budget(&self, predict_multiplier: f32) -> f32 {
        match self.mode {
            TraceMode::Live => self.speed,
            TraceMode::Predict => self.speed * predict_multiplier,
        }
    }

    /// Copy of this state switched to Predict mode
    pub fn to_predict(&self) -> Self {
        Self {
            mode: TraceMode::Predict,
            ..*self
        }
    }

    pub fn validate_direction(&self) -> Result<(), TraceError> {
        let len_sq = self.direction.length_squared();
        if !len_sq.is_finite() || len_sq < MIN_DIRECTION_LENGTH_SQ {
            return Err(TraceError::InvalidDirection {
                direction: self.direction,
            });
        }
        Ok(())
    }

    pub fn validate_speed(&self) -> Result<(), TraceError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(TraceError::InvalidSpeed { speed: self.speed });
        }
        Ok(())
    }
}

/// A laser entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub id: u32,
    pub state: TrajectoryState,
    /// Position the renderer shows; synced after Live ticks only
    pub render_position: Vec3,
    /// Segment endpoints explored during the last tick (start point first)
    #[serde(skip)]
    pub path: Vec<Vec3>,
}

impl Laser {
    pub fn new(id: u32, state: TrajectoryState) -> Self {
        Self {
            id,
            state,
            render_position: state.position,
            path: Vec::new(),
        }
    }

    /// Write the committed simulation position to the render handle
    pub fn sync_render(&mut self) {
        if self.state.mode == TraceMode::Live {
            self.render_position = self.state.position;
        }
    }
}

/// Every active laser, keyed by a stable ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserField {
    pub lasers: Vec<Laser>,
    next_id: u32,
}

impl Default for LaserField {
    fn default() -> Self {
        Self::new()
    }
}

impl LaserField {
    pub fn new() -> Self {
        Self {
            lasers: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new laser ID
    pub fn next_laser_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a laser with caller-supplied initial state
    pub fn spawn(
        &mut self,
        position: Vec3,
        direction: Vec3,
        speed: f32,
        mode: TraceMode,
    ) -> Result<u32, TraceError> {
        let state = TrajectoryState::new(position, direction, speed, mode);
        state.validate_speed()?;
        state.validate_direction()?;

        let id = self.next_laser_id();
        self.lasers.push(Laser::new(id, state));
        log::info!(
            "Spawned {:?} laser {} at {} heading {} (speed {})",
            mode,
            id,
            position,
            direction,
            speed
        );
        Ok(id)
    }

    /// Fire a Live shot along an aim vector; the aim is normalized first
    pub fn fire(&mut self, position: Vec3, aim: Vec3, speed: f32) -> Result<u32, TraceError> {
        let direction = aim.try_normalize().ok_or_else(|| {
            log::warn!("Refusing to fire without an aim direction ({})", aim);
            TraceError::InvalidDirection { direction: aim }
        })?;
        self.spawn(position, direction, speed, TraceMode::Live)
    }

    pub fn get(&self, id: u32) -> Option<&Laser> {
        self.lasers.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Laser> {
        self.lasers.iter_mut().find(|l| l.id == id)
    }

    /// Remove a laser, returning it if it existed
    pub fn destroy(&mut self, id: u32) -> Option<Laser> {
        let index = self.lasers.iter().position(|l| l.id == id)?;
        log::info!("Destroyed laser {}", id);
        Some(self.lasers.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Laser> {
        self.lasers.iter()
    }

    pub fn len(&self) -> usize {
        self.lasers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lasers.is_empty()
    }

    /// Ensure lasers are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.lasers.sort_by_key(|l| l.id);
    }
}
