//! Fixed tick driver
//!
//! Advances trajectories one tick at a time. A tick keeps tracing segments
//! until its distance budget is spent or a Live laser hits a wall.

use glam::Vec3;

use super::error::TraceError;
use super::oracle::SceneOracle;
use super::state::{LaserField, TraceMode, TrajectoryState};
use super::trace::trace_segment;
use crate::settings::Settings;

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Budget ran out normally
    BudgetExhausted,
    /// A Live laser hit a non-reflective surface and must be removed
    Terminated,
}

/// Summary of one field-wide tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTick {
    /// Lasers that completed their tick (including destroyed ones)
    pub advanced: usize,
    /// IDs removed after a terminal wall hit, in ID order
    pub destroyed: Vec<u32>,
    /// Lasers whose tick was rejected; their state is unchanged
    pub failed: Vec<(u32, TraceError)>,
}

/// Advance a trajectory by one tick
pub fn run_tick<O: SceneOracle + ?Sized>(
    state: &mut TrajectoryState,
    oracle: &O,
    settings: &Settings,
) -> Result<TickOutcome, TraceError> {
    run_tick_recorded(state, oracle, settings, None)
}

/// Advance a trajectory by one tick, recording every segment endpoint
///
/// `path` receives the start position followed by the end of each segment.
/// It is only written when the tick actually traces something.
pub fn run_tick_recorded<O: SceneOracle + ?Sized>(
    state: &mut TrajectoryState,
    oracle: &O,
    settings: &Settings,
    mut path: Option<&mut Vec<Vec3>>,
) -> Result<TickOutcome, TraceError> {
    settings
        .validate()
        .map_err(|err| TraceError::InvalidSettings(err.to_string()))?;
    state.validate_speed()?;

    let mut budget = state.tick_budget(settings.predict_multiplier);
    if budget <= 0.0 {
        return Ok(TickOutcome::BudgetExhausted);
    }
    state.validate_direction()?;

    // Predict explores a hypothetical path, and a rejected tick leaves no trace
    let snapshot = (state.position, state.direction);

    if let Some(path) = path.as_deref_mut() {
        path.push(state.position);
    }

    let mut outcome = TickOutcome::BudgetExhausted;
    let mut segments = 0u32;
    while budget > 0.0 {
        let step = match trace_segment(state, oracle, budget, settings.epsilon) {
            Ok(step) => step,
            Err(err) => {
                (state.position, state.direction) = snapshot;
                return Err(err);
            }
        };
        segments += 1;
        if let Some(path) = path.as_deref_mut() {
            path.push(step.end);
        }
        if step.terminate {
            outcome = TickOutcome::Terminated;
            break;
        }
        if step.remaining >= budget {
            // Float precision swallowed the epsilon charge
            log::warn!(
                "Budget {} did not shrink after a hit, ending tick after {} segments",
                budget,
                segments
            );
            break;
        }
        budget = step.remaining;
    }

    if state.mode == TraceMode::Predict {
        (state.position, state.direction) = snapshot;
    }

    log::debug!(
        "{:?} tick finished after {} segments: {:?}",
        state.mode,
        segments,
        outcome
    );
    Ok(outcome)
}

impl LaserField {
    /// Advance every laser by one tick in ID order
    ///
    /// Live lasers have their render position synced afterwards. Lasers that
    /// hit a wall are removed.
    pub fn tick<O: SceneOracle + ?Sized>(&mut self, oracle: &O, settings: &Settings) -> FieldTick {
        self.normalize_order();

        let mut report = FieldTick::default();
        for laser in &mut self.lasers {
            laser.path.clear();
            match run_tick_recorded(&mut laser.state, oracle, settings, Some(&mut laser.path)) {
                Ok(outcome) => {
                    report.advanced += 1;
                    laser.sync_render();
                    if outcome == TickOutcome::Terminated {
                        report.destroyed.push(laser.id);
                    }
                }
                Err(err) => {
                    log::error!("Laser {} tick rejected: {}", laser.id, err);
                    report.failed.push((laser.id, err));
                }
            }
        }

        for id in &report.destroyed {
            self.destroy(*id);
        }

        report
    }

    /// Forecast the path of a laser without moving it
    ///
    /// Runs one Predict tick from the laser's current state and returns the
    /// explored path, starting at the laser's position.
    pub fn forecast<O: SceneOracle + ?Sized>(
        &self,
        id: u32,
        oracle: &O,
        settings: &Settings,
    ) -> Result<Vec<Vec3>, TraceError> {
        let laser = self.get(id).ok_or(TraceError::UnknownLaser(id))?;
        let mut ghost = laser.state.to_predict();
        let mut path = Vec::new();
        run_tick_recorded(&mut ghost, oracle, settings, Some(&mut path))?;
        Ok(path)
    }
}
