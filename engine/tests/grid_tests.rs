//! Grid Tests - Cartesian and Polar Snapping
//!
//! Properties of the grid snapper as used by the snap-to-grid tool, plus
//! the overlay geometry drawn with it.

use glam::Vec3;
use prop_cannon_engine::config::ToolPrefs;
use prop_cannon_engine::world::{
    DEFAULT_OVERLAY_EXTENT, GridKind, GridSnapper, snap_to_grid, snap_to_polar,
};

fn is_multiple(value: f32, step: f32) -> bool {
    let ratio = value / step;
    (ratio - ratio.round()).abs() < 1e-4
}

fn polar_parts(pos: Vec3) -> (f32, f32) {
    ((pos.x * pos.x + pos.z * pos.z).sqrt(), pos.z.atan2(pos.x))
}

// ============================================================================
// Cartesian
// ============================================================================

#[test]
fn test_cartesian_example() {
    let snapped = GridSnapper::cartesian(1.0).snap(Vec3::new(1.3, 5.0, 2.7));
    assert_eq!(snapped, Vec3::new(1.0, 5.0, 3.0));
}

#[test]
fn test_cartesian_results_are_multiples_and_preserve_y() {
    let points = [
        Vec3::new(0.12, -3.0, 9.87),
        Vec3::new(-4.4, 0.5, -0.26),
        Vec3::new(123.456, 7.0, -98.765),
    ];
    for size in [0.25, 0.5, 1.0, 2.5] {
        let snapper = GridSnapper::cartesian(size);
        for p in points {
            let s = snapper.snap(p);
            assert!(is_multiple(s.x, size), "x {} not a multiple of {}", s.x, size);
            assert!(is_multiple(s.z, size), "z {} not a multiple of {}", s.z, size);
            assert_eq!(s.y, p.y);
            // Never moves more than half a cell per axis
            assert!((s.x - p.x).abs() <= size * 0.5 + 1e-4);
            assert!((s.z - p.z).abs() <= size * 0.5 + 1e-4);
        }
    }
}

#[test]
fn test_cartesian_idempotent() {
    let snapper = GridSnapper::cartesian(0.5);
    for p in [Vec3::new(1.3, 2.0, -2.7), Vec3::new(-0.74, 0.0, 0.26)] {
        let once = snapper.snap(p);
        assert_eq!(snapper.snap(once), once);
    }
}

#[test]
fn test_cartesian_free_function_matches_snapper() {
    let p = Vec3::new(3.3, 1.0, -1.6);
    assert_eq!(snap_to_grid(p, 2.0), GridSnapper::cartesian(2.0).snap(p));
}

// ============================================================================
// Polar
// ============================================================================

#[test]
fn test_polar_distance_rounds_to_ring() {
    let snapped = GridSnapper::polar(1.0, 24).snap(Vec3::new(5.1, 0.0, 0.0));
    let (distance, angle) = polar_parts(snapped);
    assert!((distance - 5.0).abs() < 1e-4);
    assert!(angle.abs() < 1e-4);
}

#[test]
fn test_polar_angle_rounds_to_spoke() {
    let angle = 44.0_f32.to_radians();
    let pos = Vec3::new(angle.cos() * 5.1, -1.5, angle.sin() * 5.1);

    // 8 spokes: 45° steps
    let (distance, snapped_angle) = polar_parts(snap_to_polar(pos, 1.0, 8));
    assert!((distance - 5.0).abs() < 1e-4);
    assert!((snapped_angle.to_degrees() - 45.0).abs() < 1e-3);

    // 4 spokes: 90° steps, 44° is nearer 0°
    let snapped = GridSnapper::polar(1.0, 4).snap(pos);
    let (_, snapped_angle) = polar_parts(snapped);
    assert!(snapped_angle.to_degrees().abs() < 1e-3);
    assert_eq!(snapped.y, -1.5);
}

#[test]
fn test_polar_results_on_rings_and_spokes() {
    let snapper = GridSnapper::polar(0.5, 12);
    let step = snapper.angular_step();
    for p in [
        Vec3::new(2.2, 0.0, 3.1),
        Vec3::new(-7.9, 1.0, 0.4),
        Vec3::new(0.3, 2.0, -6.6),
    ] {
        let s = snapper.snap(p);
        let (distance, angle) = polar_parts(s);
        assert!(is_multiple(distance, 0.5));
        assert!(is_multiple(angle, step), "angle {} not on a spoke", angle.to_degrees());
        assert_eq!(s.y, p.y);
    }
}

#[test]
fn test_prefs_snapper_drives_snapping() {
    let mut prefs = ToolPrefs::default();
    prefs.snapper.kind = GridKind::Polar;
    prefs.snapper.angular_divisions = 8;
    let snapped = prefs.snapper.snap(Vec3::new(0.0, 0.0, 2.9));
    assert!((snapped - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-4);
}

// ============================================================================
// Overlay
// ============================================================================

#[test]
fn test_cartesian_overlay_spans_extent() {
    let overlay = GridSnapper::cartesian(2.0).overlay(DEFAULT_OVERLAY_EXTENT);
    // round(32 / 2) = 16 -> 17 lines per axis
    assert_eq!(overlay.lines.len(), 34);
    for (a, b) in &overlay.lines {
        assert_eq!(a.y, 0.0);
        assert_eq!(b.y, 0.0);
        assert!(a.x.abs() <= 16.0 + 1e-4 && a.z.abs() <= 16.0 + 1e-4);
    }
}

#[test]
fn test_overlay_empty_for_bad_size() {
    assert!(GridSnapper::cartesian(0.0).overlay(16.0).lines.is_empty());
    assert!(GridSnapper::polar(1.0, 8).overlay(0.0).rings.is_empty());
}
