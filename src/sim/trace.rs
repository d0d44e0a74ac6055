//! Single-segment trace and reflect
//!
//! One step casts a ray from the current position for the remaining budget.
//! A miss spends the whole budget. A hit moves the laser onto the surface,
//! bends its direction and charges the travelled distance plus `epsilon`, so
//! the remaining budget strictly shrinks with every hit.

use glam::Vec3;

use super::error::TraceError;
use super::oracle::{SceneOracle, SegmentHit};
use super::reflect::reflect;
use super::state::{TraceMode, TrajectoryState};

/// Outcome of one segment trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStep {
    /// Budget left for further segments (never negative)
    pub remaining: f32,
    /// A Live laser struck a non-reflective surface
    pub terminate: bool,
    /// Where this segment ended
    pub end: Vec3,
    pub hit: Option<SegmentHit>,
}

/// Trace one straight segment of at most `remaining` distance
///
/// Fails without touching `state` or querying the oracle when the direction
/// cannot form a ray.
pub fn trace_segment<O: SceneOracle + ?Sized>(
    state: &mut TrajectoryState,
    oracle: &O,
    remaining: f32,
    epsilon: f32,
) -> Result<SegmentStep, TraceError> {
    state.validate_direction()?;

    let Some(hit) = oracle.intersect(state.position, state.direction, remaining) else {
        state.position += state.direction * remaining;
        log::trace!("Segment miss, travelled {} to {}", remaining, state.position);
        return Ok(SegmentStep {
            remaining: 0.0,
            terminate: false,
            end: state.position,
            hit: None,
        });
    };

    let budget_left = (remaining - hit.distance - epsilon).max(0.0);
    state.position += state.direction * hit.distance;
    state.direction = reflect(state.direction, hit.normal);

    log::trace!(
        "Segment hit {} at {} (distance {}), budget left {}",
        hit.surface.as_str(),
        state.position,
        hit.distance,
        budget_left
    );

    let (remaining, terminate) = if hit.surface.reflects() {
        (budget_left, false)
    } else {
        match state.mode {
            TraceMode::Live => (0.0, true),
            TraceMode::Predict => (0.0, false),
        }
    };

    Ok(SegmentStep {
        remaining,
        terminate,
        end: state.position,
        hit: Some(hit),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::consts::TRACE_EPSILON;
    use crate::sim::oracle::{EmptyScene, SurfaceKind};

    fn plane_at_x(x: f32, surface: SurfaceKind) -> impl Fn(Vec3, Vec3, f32) -> Option<SegmentHit> {
        move |origin: Vec3, direction: Vec3, max: f32| {
            if direction.x <= 0.0 {
                return None;
            }
            let t = (x - origin.x) / direction.x;
            (t >= 0.0 && t <= max).then(|| SegmentHit {
                distance: t,
                point: origin + direction * t,
                normal: Vec3::NEG_X,
                surface,
            })
        }
    }

    #[test]
    fn test_miss_consumes_budget() {
        let mut state = TrajectoryState::new(Vec3::ZERO, Vec3::Z, 1.0, TraceMode::Live);
        let step = trace_segment(&mut state, &EmptyScene, 2.5, TRACE_EPSILON).unwrap();
        assert_eq!(step.remaining, 0.0);
        assert!(!step.terminate);
        assert!(step.hit.is_none());
        assert_eq!(state.position, Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(state.direction, Vec3::Z);
    }

    #[test]
    fn test_mirror_hit_reflects_and_charges_epsilon() {
        let mut state = TrajectoryState::new(Vec3::ZERO, Vec3::X, 5.0, TraceMode::Live);
        let oracle = plane_at_x(3.0, SurfaceKind::Mirror);
        let step = trace_segment(&mut state, &oracle, 5.0, TRACE_EPSILON).unwrap();
        assert!((step.remaining - 1.9).abs() < 1e-5);
        assert!(!step.terminate);
        assert_eq!(state.position, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(state.direction, Vec3::NEG_X);
    }

    #[test]
    fn test_wall_hit_terminates_live() {
        let mut state = TrajectoryState::new(Vec3::ZERO, Vec3::X, 5.0, TraceMode::Live);
        let step = trace_segment(&mut state, &plane_at_x(2.0, SurfaceKind::Wall), 5.0, TRACE_EPSILON).unwrap();
        assert_eq!(step.remaining, 0.0);
        assert!(step.terminate);
        assert_eq!(step.end, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_other_hit_stops_predict_without_terminating() {
        let mut state = TrajectoryState::new(Vec3::ZERO, Vec3::X, 5.0, TraceMode::Predict);
        let step = trace_segment(&mut state, &plane_at_x(2.0, SurfaceKind::Other), 5.0, TRACE_EPSILON).unwrap();
        assert_eq!(step.remaining, 0.0);
        assert!(!step.terminate);
        assert_eq!(state.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_hit_at_budget_boundary_is_a_hit() {
        let mut state = TrajectoryState::new(Vec3::ZERO, Vec3::X, 3.0, TraceMode::Live);
        let step = trace_segment(&mut state, &plane_at_x(3.0, SurfaceKind::Mirror), 3.0, TRACE_EPSILON).unwrap();
        assert!(step.hit.is_some());
        // Overdrawn budget clamps to zero
        assert_eq!(step.remaining, 0.0);
        assert_eq!(state.direction, Vec3::NEG_X);
    }

    #[test]
    fn test_unusable_direction_never_reaches_oracle() {
        let queries = Cell::new(0);
        let counting = |_: Vec3, _: Vec3, _: f32| -> Option<SegmentHit> {
            queries.set(queries.get() + 1);
            None
        };

        for direction in [Vec3::ZERO, Vec3::NAN, Vec3::INFINITY] {
            let mut state = TrajectoryState::new(Vec3::ONE, direction, 1.0, TraceMode::Live);
            let result = trace_segment(&mut state, &counting, 1.0, TRACE_EPSILON);
            assert!(matches!(result, Err(TraceError::InvalidDirection { .. })));
            assert_eq!(state.position, Vec3::ONE);
        }
        assert_eq!(queries.get(), 0);
    }
}
