//! Scene intersection oracle
//!
//! The simulator never looks at geometry directly. Every segment asks an
//! oracle for the nearest surface along a ray, and the oracle answers with
//! the hit distance, point, normal and the kind of surface that was struck.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How a surface reacts to a laser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Stops the laser
    #[default]
    Wall,
    /// Reflects the laser and lets it keep travelling
    Mirror,
    /// Anything untagged; treated like a wall
    Other,
}

impl SurfaceKind {
    /// Resolve an engine tag string once, at the oracle boundary
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "mirror" => SurfaceKind::Mirror,
            "wall" => SurfaceKind::Wall,
            _ => SurfaceKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Wall => "Wall",
            SurfaceKind::Mirror => "Mirror",
            SurfaceKind::Other => "Other",
        }
    }

    #[inline]
    pub fn reflects(&self) -> bool {
        matches!(self, SurfaceKind::Mirror)
    }
}

/// Result of a single ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// Hit point in world space
    pub point: Vec3,
    /// Unit surface normal at the hit point
    pub normal: Vec3,
    pub surface: SurfaceKind,
}

/// Ray-vs-scene query service
pub trait SceneOracle {
    /// Nearest hit along `origin + t * direction` with `0 <= t <= max_distance`.
    ///
    /// `max_distance` is inclusive: a surface exactly at the limit is a hit.
    fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SegmentHit>;
}

impl<F> SceneOracle for F
where
    F: Fn(Vec3, Vec3, f32) -> Option<SegmentHit>,
{
    fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SegmentHit> {
        self(origin, direction, max_distance)
    }
}

/// An oracle with nothing in it
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl SceneOracle for EmptyScene {
    fn intersect(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<SegmentHit> {
        None
    }
}
