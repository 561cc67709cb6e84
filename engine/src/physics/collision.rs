//! Collision detection module
//!
//! Ray queries used by the placement tools. The scatter planner never talks
//! to a concrete scene; it consumes the two capabilities defined here:
//!
//! - [`SurfaceQuery`] - "where does this ray hit a surface, and what is the normal?"
//! - [`ClearanceQuery`] - "is the column of this height above a point free?"
//!
//! Both are implemented for plain closures so a host engine can hand in its
//! own raycast, and by [`SceneColliders`] which is a small analytic scene
//! (planes, boxes, spheres) used by the CLI and the tests.
//!
//! # Example
//!
//! ```ignore
//! use prop_cannon_engine::physics::collision::{Collider, SceneColliders, SurfaceQuery};
//! use glam::Vec3;
//!
//! let mut scene = SceneColliders::new();
//! scene.push(Collider::ground(0.0));
//!
//! if let Some(hit) = scene.cast(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y) {
//!     println!("Hit at distance {}: {:?}", hit.distance, hit.point);
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Rays shorter than this are treated as degenerate.
const DIRECTION_EPSILON: f32 = 1e-6;

/// Clearance probes start this far along the axis to avoid re-hitting the
/// surface they stand on.
pub const CLEARANCE_START_OFFSET: f32 = 0.01;

/// Result of a successful surface query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World-space position where the ray met the surface
    pub point: Vec3,
    /// Surface normal at the hit point (normalized, facing the ray origin)
    pub normal: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

impl SurfaceHit {
    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            point,
            normal,
            distance,
        }
    }
}

/// Ray-surface intersection capability supplied by the host.
pub trait SurfaceQuery {
    /// Cast a ray and return the nearest hit in front of `origin`, if any.
    fn cast(&self, origin: Vec3, direction: Vec3) -> Option<SurfaceHit>;
}

/// Vertical clearance capability supplied by the host.
pub trait ClearanceQuery {
    /// Returns true when nothing obstructs the column of `height` starting at
    /// `point` and extending along `axis`.
    fn is_clear(&self, point: Vec3, axis: Vec3, height: f32) -> bool;
}

impl<F> SurfaceQuery for F
where
    F: Fn(Vec3, Vec3) -> Option<SurfaceHit>,
{
    fn cast(&self, origin: Vec3, direction: Vec3) -> Option<SurfaceHit> {
        self(origin, direction)
    }
}

impl<F> ClearanceQuery for F
where
    F: Fn(Vec3, Vec3, f32) -> bool,
{
    fn is_clear(&self, point: Vec3, axis: Vec3, height: f32) -> bool {
        self(point, axis, height)
    }
}

/// Clearance query that reports every column as free.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysClear;

impl ClearanceQuery for AlwaysClear {
    fn is_clear(&self, _point: Vec3, _axis: Vec3, _height: f32) -> bool {
        true
    }
}

/// Ray-AABB intersection using the slab method.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point, or to the exit
///   point when the ray starts inside the box
/// * `None` - No intersection, or the box is entirely behind the origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        let (lo, hi) = (aabb_min[axis], aabb_max[axis]);

        if dir.abs() < 1e-10 {
            // Parallel to this slab: must already be between the planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (lo - origin) * inv;
        let t2 = (hi - origin) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max < t_min || t_max < 0.0 {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(DIRECTION_EPSILON));
    let local = (point - center) / half_extents;
    let abs_local = local.abs();

    if abs_local.x >= abs_local.y && abs_local.x >= abs_local.z {
        Vec3::new(local.x.signum(), 0.0, 0.0)
    } else if abs_local.y >= abs_local.z {
        Vec3::new(0.0, local.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, local.z.signum())
    }
}

/// Ray-plane intersection for the plane `dot(normal, p) == offset`.
///
/// Returns the distance along the ray, or `None` when the ray is parallel to
/// the plane or the plane is behind the origin.
pub fn ray_plane_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    normal: Vec3,
    offset: f32,
) -> Option<f32> {
    let denom = normal.dot(ray_dir);
    if denom.abs() < DIRECTION_EPSILON {
        return None;
    }
    let t = (offset - normal.dot(ray_origin)) / denom;
    (t >= 0.0).then_some(t)
}

/// Ray-sphere intersection, nearest positive root.
pub fn ray_sphere_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    // |o + t*d - c|² = r² with |d| = 1  =>  t² + 2bt + c = 0
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = -b - sqrt_disc;
    let t2 = -b + sqrt_disc;
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// A single analytic collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    /// Infinite plane `dot(normal, p) == offset`
    Plane { normal: Vec3, offset: f32 },
    /// Axis-aligned box
    Aabb { min: Vec3, max: Vec3 },
    /// Sphere
    Sphere { center: Vec3, radius: f32 },
}

impl Collider {
    /// Horizontal ground plane at the given height.
    pub fn ground(height: f32) -> Self {
        Collider::Plane {
            normal: Vec3::Y,
            offset: height,
        }
    }

    /// Axis-aligned box from a center and half extents.
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        Collider::Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Intersect a normalized ray with this collider.
    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<SurfaceHit> {
        match *self {
            Collider::Plane { normal, offset } => {
                let normal = normal.normalize_or_zero();
                if normal == Vec3::ZERO {
                    return None;
                }
                let t = ray_plane_intersect(origin, direction, normal, offset)?;
                // Two-sided: report the face the ray arrived from
                let facing = if normal.dot(direction) < 0.0 { normal } else { -normal };
                Some(SurfaceHit::new(origin + direction * t, facing, t))
            }
            Collider::Aabb { min, max } => {
                // Rays starting inside a solid ignore it
                if origin.cmpgt(min).all() && origin.cmplt(max).all() {
                    return None;
                }
                let t = ray_aabb_intersect(origin, direction, min, max)?;
                let point = origin + direction * t;
                Some(SurfaceHit::new(point, aabb_surface_normal(point, min, max), t))
            }
            Collider::Sphere { center, radius } => {
                if origin.distance_squared(center) < radius * radius {
                    return None;
                }
                let t = ray_sphere_intersect(origin, direction, center, radius)?;
                let point = origin + direction * t;
                let normal = (point - center).normalize_or(Vec3::Y);
                Some(SurfaceHit::new(point, normal, t))
            }
        }
    }
}

/// A flat list of colliders answering both surface and clearance queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneColliders {
    colliders: Vec<Collider>,
}

impl SceneColliders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn with(mut self, collider: Collider) -> Self {
        self.push(collider);
        self
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }
}

impl SurfaceQuery for SceneColliders {
    fn cast(&self, origin: Vec3, direction: Vec3) -> Option<SurfaceHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        self.colliders
            .iter()
            .filter_map(|c| c.intersect(origin, direction))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl ClearanceQuery for SceneColliders {
    fn is_clear(&self, point: Vec3, axis: Vec3, height: f32) -> bool {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO || height <= 0.0 {
            return true;
        }

        let start = point + axis * CLEARANCE_START_OFFSET;
        match self.cast(start, axis) {
            Some(hit) => hit.distance > height - CLEARANCE_START_OFFSET,
            None => true,
        }
    }
}
