//! Scatter Planner
//!
//! Turns a disc of random 2-D offsets into surface-anchored placements:
//!
//! 1. Each sample is mapped into the tangent space of the brush center.
//! 2. A probe ray is cast from above the surface back along `-normal`.
//! 3. Hits become [`PlacementCandidate`]s oriented to the hit normal and spun
//!    by the sample angle; misses are silently dropped (brush over an edge).
//! 4. Candidates whose template has a clearance height are checked for
//!    obstruction above the hit point and flagged invalid if blocked.
//!
//! [`resolve`] is the pure core. [`ScatterPlanner`] wraps it with the brush
//! state a tool keeps between frames: configuration, the template pool, the
//! RNG and the current samples.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::frame::{TangentFrame, surface_rotation};
use super::sampling::{DiscSample, PropTemplate, generate_samples};
use super::selection::SelectionSet;
use crate::physics::{ClearanceQuery, SurfaceQuery};

/// Default lift of probe origins above the brush plane (meters).
pub const DEFAULT_PROBE_OFFSET: f32 = 2.0;

/// Number of points in the brush outline.
pub const DEFAULT_OUTLINE_DETAIL: usize = 256;

/// Outline points are lifted this far off the surface to avoid z-fighting.
pub const OUTLINE_SURFACE_LIFT: f32 = 0.02;

/// Relative radius change per scroll notch.
pub const RADIUS_SCROLL_STEP: f32 = 0.05;

pub const MIN_RADIUS: f32 = 0.1;
pub const MAX_RADIUS: f32 = 50.0;
pub const MIN_SPAWN_COUNT: usize = 1;
pub const MAX_SPAWN_COUNT: usize = 256;

// ============================================================================
// TYPES
// ============================================================================

/// Position and rotation handed to the instantiation layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// A resolved placement on the surface. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementCandidate {
    /// Surface hit point
    pub position: Vec3,
    /// Orientation; local +Y points out of the surface
    pub rotation: Quat,
    /// Surface normal at the hit
    pub normal: Vec3,
    /// Template assigned to the originating sample
    pub template: Option<Arc<PropTemplate>>,
    /// False when the clearance column above the hit is obstructed
    pub valid: bool,
}

impl PlacementCandidate {
    /// The placed object's up axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        self.pose().to_matrix()
    }
}

/// Brush settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Brush radius in meters (0.1 ..= 50)
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Samples per brush (1 ..= 256)
    #[serde(default = "default_spawn_count")]
    pub spawn_count: usize,
    /// Probe lift above the brush plane
    #[serde(default = "default_probe_offset")]
    pub probe_offset: f32,
    /// Fixed RNG seed; `None` seeds from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_radius() -> f32 {
    2.0
}

fn default_spawn_count() -> usize {
    8
}

fn default_probe_offset() -> f32 {
    DEFAULT_PROBE_OFFSET
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            spawn_count: default_spawn_count(),
            probe_offset: default_probe_offset(),
            seed: None,
        }
    }
}

impl ScatterConfig {
    /// Copy with every field clamped into its supported range.
    pub fn sanitized(&self) -> Self {
        let radius = if self.radius.is_finite() {
            self.radius.clamp(MIN_RADIUS, MAX_RADIUS)
        } else {
            default_radius()
        };
        let probe_offset = if self.probe_offset.is_finite() && self.probe_offset > 0.0 {
            self.probe_offset
        } else {
            DEFAULT_PROBE_OFFSET
        };
        Self {
            radius,
            spawn_count: self.spawn_count.clamp(MIN_SPAWN_COUNT, MAX_SPAWN_COUNT),
            probe_offset,
            seed: self.seed,
        }
    }
}

// ============================================================================
// CORE
// ============================================================================

/// Resolve samples against a surface using the default probe offset.
///
/// Output order follows `samples`; probes that miss produce no candidate.
pub fn resolve<S, C>(
    frame: &TangentFrame,
    radius: f32,
    samples: &[DiscSample],
    surface: &S,
    clearance: &C,
) -> Vec<PlacementCandidate>
where
    S: SurfaceQuery + ?Sized,
    C: ClearanceQuery + ?Sized,
{
    resolve_with_offset(frame, radius, samples, DEFAULT_PROBE_OFFSET, surface, clearance)
}

/// [`resolve`] with an explicit probe lift.
pub fn resolve_with_offset<S, C>(
    frame: &TangentFrame,
    radius: f32,
    samples: &[DiscSample],
    probe_offset: f32,
    surface: &S,
    clearance: &C,
) -> Vec<PlacementCandidate>
where
    S: SurfaceQuery + ?Sized,
    C: ClearanceQuery + ?Sized,
{
    let mut candidates = Vec::with_capacity(samples.len());

    for (index, sample) in samples.iter().enumerate() {
        let (origin, direction) = frame.probe_ray(sample.point, radius, probe_offset);
        let Some(hit) = surface.cast(origin, direction) else {
            trace!(index, "Scatter probe missed");
            continue;
        };

        let rotation = surface_rotation(hit.normal, sample.angle_degrees);
        let up = rotation * Vec3::Y;

        let valid = match sample.template.as_ref().and_then(|t| t.clearance_height) {
            Some(height) => clearance.is_clear(hit.point, up, height),
            None => true,
        };

        candidates.push(PlacementCandidate {
            position: hit.point,
            rotation,
            normal: hit.normal,
            template: sample.template.clone(),
            valid,
        });
    }

    candidates
}

/// Surface-conforming brush rim.
///
/// Points run once around the circle (`t = i / (detail - 1)` turns). Probes
/// that hit are lifted slightly off the surface; misses fall back to the
/// probe origin so the ring stays closed.
pub fn brush_outline<S>(
    frame: &TangentFrame,
    radius: f32,
    detail: usize,
    probe_offset: f32,
    surface: &S,
) -> Vec<Vec3>
where
    S: SurfaceQuery + ?Sized,
{
    let denom = detail.saturating_sub(1).max(1) as f32;
    (0..detail)
        .map(|i| {
            let angle = i as f32 / denom * TAU;
            let dir = Vec2::new(angle.cos(), angle.sin());
            let (origin, direction) = frame.probe_ray(dir, radius, probe_offset);
            match surface.cast(origin, direction) {
                Some(hit) => hit.point + hit.normal * OUTLINE_SURFACE_LIFT,
                None => origin,
            }
        })
        .collect()
}

// ============================================================================
// BRUSH STATE
// ============================================================================

/// Scatter brush: configuration, template pool and the current sample set.
///
/// Samples are re-rolled whenever radius, count or pool change, and after
/// every commit.
pub struct ScatterPlanner {
    config: ScatterConfig,
    pool: Vec<Arc<PropTemplate>>,
    samples: Vec<DiscSample>,
    rng: StdRng,
}

impl ScatterPlanner {
    pub fn new(config: ScatterConfig) -> Self {
        let config = config.sanitized();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut planner = Self {
            config,
            pool: Vec::new(),
            samples: Vec::new(),
            rng,
        };
        planner.regenerate();
        planner
    }

    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    pub fn samples(&self) -> &[DiscSample] {
        &self.samples
    }

    pub fn pool(&self) -> &[Arc<PropTemplate>] {
        &self.pool
    }

    /// Roll a fresh sample set.
    pub fn regenerate(&mut self) {
        self.samples = generate_samples(self.config.spawn_count, &self.pool, &mut self.rng);
        debug!(
            count = self.samples.len(),
            pool = self.pool.len(),
            "Scatter samples regenerated"
        );
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.config.radius = radius;
        self.config = self.config.sanitized();
        self.regenerate();
    }

    pub fn set_spawn_count(&mut self, spawn_count: usize) {
        self.config.spawn_count = spawn_count;
        self.config = self.config.sanitized();
        self.regenerate();
    }

    pub fn set_pool(&mut self, pool: Vec<Arc<PropTemplate>>) {
        self.pool = pool;
        self.regenerate();
    }

    /// Use the active pool of a selection set.
    pub fn set_selection(&mut self, selection: &SelectionSet) {
        self.set_pool(selection.active_pool());
    }

    /// Grow or shrink the radius by one scroll notch (5%). Zero is ignored.
    pub fn scroll_radius(&mut self, direction: f32) {
        if direction == 0.0 || !direction.is_finite() {
            return;
        }
        let radius = self.config.radius * (1.0 + direction.signum() * RADIUS_SCROLL_STEP);
        self.set_radius(radius);
    }

    /// Add or remove one sample per scroll notch. Zero is ignored.
    pub fn scroll_spawn_count(&mut self, direction: f32) {
        if direction == 0.0 || !direction.is_finite() {
            return;
        }
        let count = if direction > 0.0 {
            self.config.spawn_count.saturating_add(1)
        } else {
            self.config.spawn_count.saturating_sub(1)
        };
        self.set_spawn_count(count);
    }

    /// Candidates for the current samples, for preview.
    pub fn preview<S, C>(
        &self,
        frame: &TangentFrame,
        surface: &S,
        clearance: &C,
    ) -> Vec<PlacementCandidate>
    where
        S: SurfaceQuery + ?Sized,
        C: ClearanceQuery + ?Sized,
    {
        resolve_with_offset(
            frame,
            self.config.radius,
            &self.samples,
            self.config.probe_offset,
            surface,
            clearance,
        )
    }

    /// Valid candidates to instantiate. Re-rolls the samples afterwards.
    pub fn commit<S, C>(
        &mut self,
        frame: &TangentFrame,
        surface: &S,
        clearance: &C,
    ) -> Vec<PlacementCandidate>
    where
        S: SurfaceQuery + ?Sized,
        C: ClearanceQuery + ?Sized,
    {
        let candidates = self.preview(frame, surface, clearance);
        let resolved = candidates.len();
        let placed: Vec<_> = candidates.into_iter().filter(|c| c.valid).collect();

        info!(
            placed = placed.len(),
            rejected = resolved - placed.len(),
            missed = self.samples.len() - resolved,
            x = frame.origin.x,
            y = frame.origin.y,
            z = frame.origin.z,
            "Scatter committed"
        );

        self.regenerate();
        placed
    }

    /// Brush rim for the current radius.
    pub fn outline<S>(&self, frame: &TangentFrame, surface: &S) -> Vec<Vec3>
    where
        S: SurfaceQuery + ?Sized,
    {
        brush_outline(
            frame,
            self.config.radius,
            DEFAULT_OUTLINE_DETAIL,
            self.config.probe_offset,
            surface,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{AlwaysClear, Collider, SceneColliders, SurfaceHit};

    fn seeded(count: usize) -> ScatterPlanner {
        ScatterPlanner::new(ScatterConfig {
            spawn_count: count,
            seed: Some(11),
            ..Default::default()
        })
    }

    #[test]
    fn test_config_sanitized() {
        let config = ScatterConfig {
            radius: 0.0,
            spawn_count: 0,
            probe_offset: -1.0,
            seed: None,
        }
        .sanitized();
        assert_eq!(config.radius, MIN_RADIUS);
        assert_eq!(config.spawn_count, MIN_SPAWN_COUNT);
        assert_eq!(config.probe_offset, DEFAULT_PROBE_OFFSET);

        let config = ScatterConfig {
            radius: 1000.0,
            spawn_count: 10_000,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.radius, MAX_RADIUS);
        assert_eq!(config.spawn_count, MAX_SPAWN_COUNT);
    }

    #[test]
    fn test_planner_rolls_on_creation() {
        let planner = seeded(8);
        assert_eq!(planner.samples().len(), 8);
    }

    #[test]
    fn test_set_spawn_count_regenerates() {
        let mut planner = seeded(8);
        planner.set_spawn_count(3);
        assert_eq!(planner.samples().len(), 3);
        planner.set_spawn_count(0);
        assert_eq!(planner.samples().len(), 1);
    }

    #[test]
    fn test_scroll_radius_steps_five_percent() {
        let mut planner = seeded(4);
        planner.scroll_radius(1.0);
        assert!((planner.config().radius - 2.1).abs() < 1e-5);
        planner.scroll_radius(-3.0);
        assert!((planner.config().radius - 1.995).abs() < 1e-5);
        planner.scroll_radius(0.0);
        assert!((planner.config().radius - 1.995).abs() < 1e-5);
    }

    #[test]
    fn test_scroll_spawn_count() {
        let mut planner = seeded(1);
        planner.scroll_spawn_count(-1.0);
        assert_eq!(planner.config().spawn_count, 1);
        planner.scroll_spawn_count(1.0);
        planner.scroll_spawn_count(1.0);
        assert_eq!(planner.config().spawn_count, 3);
        assert_eq!(planner.samples().len(), 3);
    }

    #[test]
    fn test_selection_feeds_pool() {
        let mut selection = SelectionSet::new([PropTemplate::new("a"), PropTemplate::new("b")]);
        selection.toggle(1);

        let mut planner = seeded(16);
        planner.set_selection(&selection);
        assert_eq!(planner.pool().len(), 1);
        assert!(
            planner
                .samples()
                .iter()
                .all(|s| s.template.as_ref().map(|t| t.name.as_str()) == Some("b"))
        );
    }

    #[test]
    fn test_commit_drops_invalid_and_rerolls() {
        let template = Arc::new(PropTemplate::new("tall").with_clearance(5.0));
        let mut planner = seeded(6);
        planner.set_pool(vec![template]);
        let before = planner.samples().to_vec();

        let scene = SceneColliders::new().with(Collider::ground(0.0));
        let blocked = |_p: Vec3, _a: Vec3, _h: f32| false;
        let frame = TangentFrame::new(Vec3::ZERO, Vec3::Y, Vec3::Z);

        let preview = planner.preview(&frame, &scene, &blocked);
        assert_eq!(preview.len(), 6);
        assert!(preview.iter().all(|c| !c.valid));

        let placed = planner.commit(&frame, &scene, &blocked);
        assert!(placed.is_empty());
        assert_ne!(planner.samples(), before.as_slice());
    }

    #[test]
    fn test_outline_conforms_to_ground() {
        let planner = seeded(1);
        let scene = SceneColliders::new().with(Collider::ground(1.0));
        let frame = TangentFrame::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y, Vec3::Z);
        let ring = planner.outline(&frame, &scene);

        assert_eq!(ring.len(), DEFAULT_OUTLINE_DETAIL);
        for p in &ring {
            assert!((p.y - (1.0 + OUTLINE_SURFACE_LIFT)).abs() < 1e-4);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 2.0).abs() < 1e-3);
        }
        // Closed loop: first and last points coincide
        assert!((ring[0] - ring[ring.len() - 1]).length() < 1e-3);
    }

    #[test]
    fn test_outline_misses_use_probe_origin() {
        let never = |_o: Vec3, _d: Vec3| -> Option<SurfaceHit> { None };
        let frame = TangentFrame::new(Vec3::ZERO, Vec3::Y, Vec3::Z);
        let ring = brush_outline(&frame, 1.0, 8, 2.0, &never);
        assert_eq!(ring.len(), 8);
        assert!(ring.iter().all(|p| (p.y - 2.0).abs() < 1e-5));
    }

    #[test]
    fn test_pose_matrix() {
        let candidate = PlacementCandidate {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            normal: Vec3::Y,
            template: None,
            valid: true,
        };
        let m = candidate.to_matrix();
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(candidate.up(), Vec3::Y);
    }

    #[test]
    fn test_without_template_always_valid() {
        let mut planner = seeded(4);
        planner.set_pool(Vec::new());
        let scene = SceneColliders::new().with(Collider::ground(0.0));
        let frame = TangentFrame::new(Vec3::ZERO, Vec3::Y, Vec3::Z);
        let preview = planner.preview(&frame, &scene, &AlwaysClear);
        assert!(preview.iter().all(|c| c.valid && c.template.is_none()));
    }
}
