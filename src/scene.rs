//! Reference scene intersection oracle
//!
//! A small headless scene made of finite rectangular panels and spheres, each
//! tagged with a surface kind. It answers the same ray queries a game engine
//! would, so lasers can be simulated and tested without one.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{SceneOracle, SegmentHit, SurfaceKind};

/// A finite rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    pub center: Vec3,
    /// Unit normal of the front face
    pub normal: Vec3,
    /// Unit in-plane axis for `half_extents.x`
    pub u_axis: Vec3,
    /// Half width along `u_axis`, half height along `normal × u_axis`
    pub half_extents: Vec2,
    pub surface: SurfaceKind,
}

impl Panel {
    /// An upright panel standing on the ground plane (y = 0)
    pub fn upright(base: Vec2, facing: Vec2, half_width: f32, height: f32, surface: SurfaceKind) -> Self {
        let normal = Vec3::new(facing.x, 0.0, facing.y).normalize_or_zero();
        Self {
            center: Vec3::new(base.x, height / 2.0, base.y),
            normal,
            u_axis: Vec3::Y.cross(normal),
            half_extents: Vec2::new(half_width, height / 2.0),
            surface,
        }
    }

    #[inline]
    pub fn v_axis(&self) -> Vec3 {
        self.normal.cross(self.u_axis)
    }

    /// Ray parameter and facing normal of a hit, if any
    ///
    /// Walls stop a ray however close its origin is. A mirror ignores rays
    /// whose origin lies on it, since those are leaving after a bounce.
    pub fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<(f32, Vec3)> {
        let denom = direction.dot(self.normal);
        if denom.abs() < 1e-8 {
            return None; // Parallel to the panel
        }

        let offset = (origin - self.center).dot(self.normal);
        if self.surface.reflects() && offset.abs() <= SURFACE_SKIN {
            return None;
        }

        let t = -offset / denom;
        if t < 0.0 || t > max_distance {
            return None;
        }

        let local = origin + direction * t - self.center;
        if local.dot(self.u_axis).abs() > self.half_extents.x
            || local.dot(self.v_axis()).abs() > self.half_extents.y
        {
            return None;
        }

        // Both faces are solid; report the one the ray struck
        let normal = if denom > 0.0 { -self.normal } else { self.normal };
        Some((t, normal))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub surface: SurfaceKind,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, surface: SurfaceKind) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            surface,
        }
    }

    /// Ray parameter and facing normal of the nearest hit, if any
    pub fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<(f32, Vec3)> {
        let oc = self.center - origin;
        let a = direction.length_squared();
        let h = direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // A mirror ray starting on the sphere is leaving the point it bounced off
        let on_surface = (oc.length() - self.radius).abs() <= SURFACE_SKIN;
        let min_t = if self.surface.reflects() && on_surface {
            SURFACE_SKIN
        } else {
            0.0
        };
        let in_range = |t: f32| t >= min_t && t <= max_distance;
        let mut root = (h - sqrtd) / a;
        if !in_range(root) {
            root = (h + sqrtd) / a;
            if !in_range(root) {
                return None;
            }
        }

        let point = origin + direction * root;
        let outward = (point - self.center) / self.radius;
        // Flip when the ray starts inside the sphere
        let normal = if direction.dot(outward) > 0.0 { -outward } else { outward };
        Some((root, normal))
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Headless scene geometry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(default)]
    pub spheres: Vec<Sphere>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Square arena on the XZ plane enclosed by four inward-facing walls
    pub fn arena(half_size: f32, height: f32) -> Self {
        let walls = [
            (Vec2::new(half_size, 0.0), Vec2::new(-1.0, 0.0)),
            (Vec2::new(-half_size, 0.0), Vec2::new(1.0, 0.0)),
            (Vec2::new(0.0, half_size), Vec2::new(0.0, -1.0)),
            (Vec2::new(0.0, -half_size), Vec2::new(0.0, 1.0)),
        ];
        Self {
            panels: walls
                .into_iter()
                .map(|(base, facing)| Panel::upright(base, facing, half_size, height, SurfaceKind::Wall))
                .collect(),
            spheres: Vec::new(),
        }
    }

    /// Arena with randomly placed upright mirrors (same seed, same scene)
    pub fn generate(seed: u64, half_size: f32, mirrors: usize) -> Self {
        let half_size = half_size.abs();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut scene = Self::arena(half_size, ARENA_WALL_HEIGHT);

        // Keep the middle clear so a laser fired from the center gets going
        let inner = half_size * 0.15;
        let outer = half_size * 0.75;
        if !half_size.is_finite() || inner >= outer {
            log::warn!("Arena half size {} leaves no room for mirrors", half_size);
            return scene;
        }
        for _ in 0..mirrors {
            let radius = rng.random_range(inner..outer);
            let bearing = rng.random_range(0.0..std::f32::consts::TAU);
            let facing = rng.random_range(0.0..std::f32::consts::TAU);
            let half_width = rng.random_range(0.05f32..0.15) * half_size;

            scene.panels.push(Panel::upright(
                Vec2::new(bearing.cos(), bearing.sin()) * radius,
                Vec2::new(facing.cos(), facing.sin()),
                half_width,
                ARENA_WALL_HEIGHT,
                SurfaceKind::Mirror,
            ));
        }

        log::info!("Generated scene (seed {}): {} panels", seed, scene.panels.len());
        scene
    }

    pub fn add_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a scene description from a JSON file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let scene = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded scene from {}: {} panels, {} spheres",
            path.display(),
            scene.panels.len(),
            scene.spheres.len()
        );
        Ok(scene)
    }
}

impl SceneOracle for Scene {
    fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SegmentHit> {
        let panels = self
            .panels
            .iter()
            .filter_map(|p| p.intersect(origin, direction, max_distance).map(|hit| (hit, p.surface)));
        let spheres = self
            .spheres
            .iter()
            .filter_map(|s| s.intersect(origin, direction, max_distance).map(|hit| (hit, s.surface)));

        let mut nearest: Option<((f32, Vec3), SurfaceKind)> = None;
        for candidate in panels.chain(spheres) {
            // Strictly closer wins, so ties go to the earlier primitive
            if nearest.is_none_or(|((t, _), _)| candidate.0.0 < t) {
                nearest = Some(candidate);
            }
        }

        nearest.map(|((distance, normal), surface)| SegmentHit {
            distance,
            point: origin + direction * distance,
            normal,
            surface,
        })
    }
}
