//! Grid Snapping Module
//!
//! Quantizes world positions to the nearest node of a cartesian or polar
//! grid lying in the XZ plane, and builds the line geometry a host draws as
//! the grid overlay.
//!
//! ## Conventions
//! - The grid is centered on the world origin.
//! - Only X and Z are snapped; Y (height) is always preserved.
//! - Polar angles are measured from +X toward +Z.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Half-size of the overlay drawn around the origin (meters).
pub const DEFAULT_OVERLAY_EXTENT: f32 = 16.0;

/// Grid layout used for snapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridKind {
    /// Square cells of `grid_size`
    #[default]
    Cartesian,
    /// Rings every `grid_size`, spokes every `360° / angular_divisions`
    Polar,
}

/// Grid snapping configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSnapper {
    /// Cartesian or polar layout
    pub kind: GridKind,
    /// Cell size for cartesian grids, ring spacing for polar grids. Must be > 0.
    pub grid_size: f32,
    /// Number of angular sectors for polar grids. Must be >= 1.
    pub angular_divisions: u32,
}

impl Default for GridSnapper {
    fn default() -> Self {
        Self {
            kind: GridKind::Cartesian,
            grid_size: 1.0,
            angular_divisions: 24,
        }
    }
}

impl GridSnapper {
    pub fn new(kind: GridKind, grid_size: f32, angular_divisions: u32) -> Self {
        Self {
            kind,
            grid_size,
            angular_divisions,
        }
    }

    /// Cartesian grid with the given cell size.
    pub fn cartesian(grid_size: f32) -> Self {
        Self {
            kind: GridKind::Cartesian,
            grid_size,
            ..Default::default()
        }
    }

    /// Polar grid with the given ring spacing and sector count.
    pub fn polar(grid_size: f32, angular_divisions: u32) -> Self {
        Self::new(GridKind::Polar, grid_size, angular_divisions)
    }

    /// Angle between neighbouring spokes, in radians.
    pub fn angular_step(&self) -> f32 {
        TAU / self.angular_divisions.max(1) as f32
    }

    /// Snap a position to the nearest grid node. Y is preserved.
    ///
    /// A non-positive grid size leaves the position unchanged.
    pub fn snap(&self, pos: Vec3) -> Vec3 {
        if self.grid_size <= 0.0 {
            return pos;
        }
        match self.kind {
            GridKind::Cartesian => snap_to_grid(pos, self.grid_size),
            GridKind::Polar => snap_to_polar(pos, self.grid_size, self.angular_divisions),
        }
    }

    /// Snap every position in place.
    pub fn snap_all(&self, positions: &mut [Vec3]) {
        for pos in positions.iter_mut() {
            *pos = self.snap(*pos);
        }
    }

    /// Build the overlay geometry for this grid out to `extent` meters.
    pub fn overlay(&self, extent: f32) -> GridOverlay {
        if self.grid_size <= 0.0 || extent <= 0.0 {
            return GridOverlay::default();
        }
        match self.kind {
            GridKind::Cartesian => cartesian_overlay(self.grid_size, extent),
            GridKind::Polar => polar_overlay(self.grid_size, self.angular_divisions, extent),
        }
    }
}

/// Overlay geometry in the XZ plane at Y = 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridOverlay {
    /// Straight segments (grid lines or polar spokes)
    pub lines: Vec<(Vec3, Vec3)>,
    /// Radii of concentric rings around the origin (polar only)
    pub rings: Vec<f32>,
}

/// Round `value` to the nearest multiple of `step`.
pub fn round_to(value: f32, step: f32) -> f32 {
    (value / step).round() * step
}

/// Snap X and Z to the nearest multiple of `grid_size`; Y is preserved.
pub fn snap_to_grid(pos: Vec3, grid_size: f32) -> Vec3 {
    Vec3::new(round_to(pos.x, grid_size), pos.y, round_to(pos.z, grid_size))
}

/// Snap the XZ components to the nearest ring/spoke intersection; Y is preserved.
pub fn snap_to_polar(pos: Vec3, grid_size: f32, angular_divisions: u32) -> Vec3 {
    let distance = (pos.x * pos.x + pos.z * pos.z).sqrt();
    let distance_snapped = round_to(distance, grid_size);

    let step = TAU / angular_divisions.max(1) as f32;
    let angle = pos.z.atan2(pos.x);
    let angle_snapped = round_to(angle, step);

    Vec3::new(
        angle_snapped.cos() * distance_snapped,
        pos.y,
        angle_snapped.sin() * distance_snapped,
    )
}

fn cartesian_overlay(grid_size: f32, extent: f32) -> GridOverlay {
    let mut line_count = ((extent * 2.0) / grid_size).round() as i32;
    // Odd count so a line always passes through the origin
    if line_count % 2 == 0 {
        line_count += 1;
    }
    let half = line_count / 2;
    let far = half as f32 * grid_size;

    let mut lines = Vec::with_capacity(line_count as usize * 2);
    for i in 0..line_count {
        let coord = (i - half) as f32 * grid_size;
        lines.push((Vec3::new(coord, 0.0, far), Vec3::new(coord, 0.0, -far)));
        lines.push((Vec3::new(far, 0.0, coord), Vec3::new(-far, 0.0, coord)));
    }

    GridOverlay {
        lines,
        rings: Vec::new(),
    }
}

fn polar_overlay(grid_size: f32, angular_divisions: u32, extent: f32) -> GridOverlay {
    let ring_count = (extent / grid_size).round() as i32;
    let outer = (ring_count - 1).max(0) as f32 * grid_size;

    let rings = (1..ring_count).map(|i| i as f32 * grid_size).collect();

    let divisions = angular_divisions.max(1);
    let lines = (0..divisions)
        .map(|i| {
            let angle = i as f32 / divisions as f32 * TAU;
            let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
            (Vec3::ZERO, dir * outer)
        })
        .collect();

    GridOverlay { lines, rings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapper() {
        let snapper = GridSnapper::default();
        assert_eq!(snapper.kind, GridKind::Cartesian);
        assert_eq!(snapper.grid_size, 1.0);
        assert_eq!(snapper.angular_divisions, 24);
    }

    #[test]
    fn test_snap_cartesian() {
        let snapper = GridSnapper::cartesian(1.0);
        let snapped = snapper.snap(Vec3::new(1.3, 5.0, 2.7));
        assert_eq!(snapped.x, 1.0);
        assert_eq!(snapped.y, 5.0); // Y unchanged
        assert_eq!(snapped.z, 3.0);
    }

    #[test]
    fn test_snap_cartesian_fractional_size() {
        let snapped = snap_to_grid(Vec3::new(0.74, -1.0, -0.26), 0.5);
        assert!((snapped.x - 0.5).abs() < 1e-6);
        assert_eq!(snapped.y, -1.0);
        assert!((snapped.z - (-0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_snap_polar_distance_and_angle() {
        let angle = 44.0_f32.to_radians();
        let pos = Vec3::new(angle.cos() * 5.1, 2.0, angle.sin() * 5.1);

        let snapped = GridSnapper::polar(1.0, 8).snap(pos);
        let dist = (snapped.x * snapped.x + snapped.z * snapped.z).sqrt();
        let deg = snapped.z.atan2(snapped.x).to_degrees();
        assert!((dist - 5.0).abs() < 1e-4);
        assert!((deg - 45.0).abs() < 1e-3);
        assert_eq!(snapped.y, 2.0);
    }

    #[test]
    fn test_snap_polar_quarter_turns() {
        // 90° sectors: 44° is closer to 0° than to 90°
        let angle = 44.0_f32.to_radians();
        let pos = Vec3::new(angle.cos() * 5.1, 0.0, angle.sin() * 5.1);
        let snapped = snap_to_polar(pos, 1.0, 4);
        assert!((snapped - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_snap_polar_origin_stays_put() {
        let snapped = snap_to_polar(Vec3::new(0.2, 1.0, -0.1), 1.0, 24);
        assert!(snapped.x.abs() < 1e-6 && snapped.z.abs() < 1e-6);
        assert_eq!(snapped.y, 1.0);
    }

    #[test]
    fn test_non_positive_size_is_noop() {
        let pos = Vec3::new(1.3, 0.0, 2.7);
        assert_eq!(GridSnapper::cartesian(0.0).snap(pos), pos);
        assert_eq!(GridSnapper::polar(-1.0, 4).snap(pos), pos);
    }

    #[test]
    fn test_snap_all() {
        let mut positions = [Vec3::new(0.4, 1.0, 0.6), Vec3::new(-1.6, 0.0, 2.2)];
        GridSnapper::cartesian(1.0).snap_all(&mut positions);
        assert_eq!(positions[0], Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(positions[1], Vec3::new(-2.0, 0.0, 2.0));
    }

    #[test]
    fn test_cartesian_overlay_line_count_is_odd() {
        let overlay = GridSnapper::cartesian(1.0).overlay(DEFAULT_OVERLAY_EXTENT);
        // round(32 / 1) = 32 -> 33 lines per axis
        assert_eq!(overlay.lines.len(), 66);
        assert!(overlay.rings.is_empty());
        assert!(
            overlay
                .lines
                .iter()
                .any(|(a, b)| a.x == 0.0 && b.x == 0.0)
        );
    }

    #[test]
    fn test_polar_overlay() {
        let overlay = GridSnapper::polar(2.0, 12).overlay(DEFAULT_OVERLAY_EXTENT);
        // ring_count = 8, rings at 2..=14
        assert_eq!(overlay.rings, vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
        assert_eq!(overlay.lines.len(), 12);
        for (start, end) in &overlay.lines {
            assert_eq!(*start, Vec3::ZERO);
            assert!((end.length() - 14.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_snapper_serde() {
        let snapper = GridSnapper::polar(0.5, 16);
        let json = serde_json::to_string(&snapper).unwrap();
        assert!(json.contains("\"polar\""));
        let back: GridSnapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapper);
    }
}
