//! Tangent space around a brush center.

use glam::{Mat3, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::physics::SurfaceHit;

/// Origin, surface normal and an up hint (usually the camera up vector).
///
/// The up hint only orients the tangent/bitangent pair; it must not be
/// parallel to the normal. If it is, an arbitrary perpendicular is used so
/// the basis stays finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentFrame {
    pub origin: Vec3,
    pub normal: Vec3,
    pub up: Vec3,
}

impl TangentFrame {
    pub fn new(origin: Vec3, normal: Vec3, up: Vec3) -> Self {
        Self { origin, normal, up }
    }

    /// Frame centered on a surface hit (e.g. the mouse ray hit).
    pub fn from_hit(hit: &SurfaceHit, up: Vec3) -> Self {
        Self::new(hit.point, hit.normal, up)
    }

    /// Orthonormal `(tangent, bitangent, normal)`.
    ///
    /// `tangent = normalize(normal × up)`, `bitangent = normal × tangent`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let normal = self.normal.normalize_or(Vec3::Y);
        let tangent = normal.cross(self.up).normalize_or_zero();
        let tangent = if tangent == Vec3::ZERO {
            normal.any_orthonormal_vector()
        } else {
            tangent
        };
        let bitangent = normal.cross(tangent);
        (tangent, bitangent, normal)
    }

    /// Map a tangent-space offset (unit disc coordinates) to world space.
    pub fn to_world(&self, local: Vec2, radius: f32) -> Vec3 {
        let (tangent, bitangent, _) = self.basis();
        self.origin + (tangent * local.x + bitangent * local.y) * radius
    }

    /// Probe ray for a tangent-space offset: lifted `probe_offset` along the
    /// normal and pointing back into the surface.
    pub fn probe_ray(&self, local: Vec2, radius: f32, probe_offset: f32) -> (Vec3, Vec3) {
        let (tangent, bitangent, normal) = self.basis();
        let origin = self.origin + (tangent * local.x + bitangent * local.y) * radius;
        (origin + normal * probe_offset, -normal)
    }
}

/// Rotation with +Z along `forward`, keeping +Y as close to `up_hint` as possible.
pub fn look_rotation(forward: Vec3, up_hint: Vec3) -> Quat {
    let forward = forward.normalize_or(Vec3::Z);
    let right = up_hint.cross(forward);
    let right = if right.length_squared() < 1e-8 {
        forward.any_orthonormal_vector()
    } else {
        right.normalize()
    };
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Orientation of a prop standing on a surface.
///
/// Looks along the surface normal, spins `angle_degrees` about it, then tips
/// the result +90° about X so the prop's local +Y points out of the surface.
pub fn surface_rotation(normal: Vec3, angle_degrees: f32) -> Quat {
    let look = look_rotation(normal, Vec3::Y);
    let spin = Quat::from_rotation_z(angle_degrees.to_radians());
    let correction = Quat::from_rotation_x(FRAC_PI_2);
    (look * spin * correction).normalize()
}
