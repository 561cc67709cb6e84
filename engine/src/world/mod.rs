//! World Module
//!
//! World-space grid snapping and grid overlay geometry.

pub mod grid;

pub use grid::{
    DEFAULT_OVERLAY_EXTENT, GridKind, GridOverlay, GridSnapper, round_to, snap_to_grid,
    snap_to_polar,
};
