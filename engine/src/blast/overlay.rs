//! Blast overlay geometry: rings around barrels and wires back to the manager.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::barrel::BarrelId;

/// Display settings for the blast overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastOverlaySettings {
    pub show_radius: bool,
    pub show_wires: bool,
    /// Draw through geometry instead of depth testing
    pub always_visible: bool,
    /// Wire width (0.01 ..= 10)
    pub wire_thickness: f32,
    /// Ring width (0.01 ..= 100)
    pub radius_thickness: f32,
    /// Wire color multiplier (0 ..= 1)
    pub wire_opacity: f32,
    /// Ring color multiplier (0 ..= 1)
    pub radius_opacity: f32,
}

impl Default for BlastOverlaySettings {
    fn default() -> Self {
        Self {
            show_radius: true,
            show_wires: true,
            always_visible: false,
            wire_thickness: 2.5,
            radius_thickness: 10.0,
            wire_opacity: 1.0,
            radius_opacity: 1.0,
        }
    }
}

impl BlastOverlaySettings {
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let clamp = |v: f32, lo: f32, hi: f32, fallback: f32| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        Self {
            wire_thickness: clamp(self.wire_thickness, 0.01, 10.0, defaults.wire_thickness),
            radius_thickness: clamp(self.radius_thickness, 0.01, 100.0, defaults.radius_thickness),
            wire_opacity: clamp(self.wire_opacity, 0.0, 1.0, defaults.wire_opacity),
            radius_opacity: clamp(self.radius_opacity, 0.0, 1.0, defaults.radius_opacity),
            ..self.clone()
        }
    }

    /// Nothing to draw at all.
    pub fn is_hidden(&self) -> bool {
        !self.show_radius && !self.show_wires
    }
}

/// A ring around a barrel showing its blast radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlastRing {
    pub barrel: BarrelId,
    pub center: Vec3,
    pub normal: Vec3,
    pub radius: f32,
    pub color: Vec4,
    pub thickness: f32,
}

/// Cubic Bézier wire hanging between the manager and a barrel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WireCurve {
    pub barrel: BarrelId,
    pub start: Vec3,
    pub end: Vec3,
    pub start_tangent: Vec3,
    pub end_tangent: Vec3,
    pub color: Vec4,
    pub thickness: f32,
}

impl WireCurve {
    /// Wire whose control points sag toward each other by half the height
    /// difference, so it leaves the manager downward and enters the barrel
    /// from above.
    pub fn between(barrel: BarrelId, start: Vec3, end: Vec3, color: Vec4, thickness: f32) -> Self {
        let half_height = (start.y - end.y) * 0.5;
        let offset = Vec3::Y * half_height;
        Self {
            barrel,
            start,
            end,
            start_tangent: start - offset,
            end_tangent: end + offset,
            color,
            thickness,
        }
    }

    /// Point on the curve at `t` in [0, 1].
    pub fn point_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.start_tangent * (3.0 * u * u * t)
            + self.end_tangent * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// `segments + 1` evenly spaced points from start to end.
    pub fn points(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Pack a linear RGBA color as 0xRRGGBBAA.
pub fn pack_rgba(color: Vec4) -> u32 {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    ((c.x as u32) << 24) | ((c.y as u32) << 16) | ((c.z as u32) << 8) | (c.w as u32)
}
