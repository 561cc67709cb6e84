//! Blast Radius Module
//!
//! Explosive barrels for level layout: shared barrel types, an explicit
//! registry of the barrels in a level, and the overlay geometry (blast
//! rings, wires to the manager) a host draws on top of the scene.

pub mod barrel;
pub mod overlay;

pub use barrel::{
    Barrel, BarrelId, BarrelRegistry, BarrelType, BarrelTypeId, UNTYPED_BARREL_COLOR,
};
pub use overlay::{BlastOverlaySettings, BlastRing, WireCurve, pack_rgba};
