//! Barrel types and the registry of active barrels.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::overlay::{BlastOverlaySettings, BlastRing, WireCurve};

/// Color used for barrels without a type.
pub const UNTYPED_BARREL_COLOR: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);

pub const MIN_BLAST_RADIUS: f32 = 1.0;
pub const MAX_BLAST_RADIUS: f32 = 8.0;

/// Shared description of a kind of barrel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarrelType {
    pub name: String,
    /// Blast radius in meters (1 ..= 8)
    pub radius: f32,
    /// Linear RGBA
    pub color: Vec4,
    pub damage: f32,
}

impl Default for BarrelType {
    fn default() -> Self {
        Self {
            name: String::from("barrel"),
            radius: 1.0,
            color: UNTYPED_BARREL_COLOR,
            damage: 10.0,
        }
    }
}

impl BarrelType {
    pub fn new(name: impl Into<String>, radius: f32, color: Vec4, damage: f32) -> Self {
        Self {
            name: name.into(),
            radius,
            color,
            damage,
        }
        .sanitized()
    }

    /// Copy with the radius clamped into range.
    pub fn sanitized(mut self) -> Self {
        self.radius = if self.radius.is_finite() {
            self.radius.clamp(MIN_BLAST_RADIUS, MAX_BLAST_RADIUS)
        } else {
            MIN_BLAST_RADIUS
        };
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarrelTypeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarrelId(pub u32);

/// A barrel placed in the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barrel {
    pub position: Vec3,
    pub barrel_type: Option<BarrelTypeId>,
}

/// Explicit registry of barrel types and active barrels.
///
/// Barrels are added and removed by whoever owns the level; iteration is in
/// insertion order. Editing a type immediately affects every barrel using it.
#[derive(Clone, Debug, Default)]
pub struct BarrelRegistry {
    types: Vec<BarrelType>,
    barrels: Vec<(BarrelId, Barrel)>,
    next_id: u32,
}

impl BarrelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, barrel_type: BarrelType) -> BarrelTypeId {
        let id = BarrelTypeId(self.types.len() as u32);
        debug!(id = id.0, name = %barrel_type.name, "Barrel type added");
        self.types.push(barrel_type.sanitized());
        id
    }

    pub fn barrel_type(&self, id: BarrelTypeId) -> Option<&BarrelType> {
        self.types.get(id.0 as usize)
    }

    /// Replace a type definition. Returns false for an unknown id.
    pub fn update_type(&mut self, id: BarrelTypeId, barrel_type: BarrelType) -> bool {
        match self.types.get_mut(id.0 as usize) {
            Some(slot) => {
                *slot = barrel_type.sanitized();
                true
            }
            None => {
                warn!(id = id.0, "Update of unknown barrel type ignored");
                false
            }
        }
    }

    pub fn types(&self) -> &[BarrelType] {
        &self.types
    }

    pub fn insert(&mut self, position: Vec3, barrel_type: Option<BarrelTypeId>) -> BarrelId {
        let id = BarrelId(self.next_id);
        self.next_id += 1;
        self.barrels.push((
            id,
            Barrel {
                position,
                barrel_type,
            },
        ));
        debug!(id = id.0, count = self.barrels.len(), "Barrel registered");
        id
    }

    pub fn remove(&mut self, id: BarrelId) -> Option<Barrel> {
        let index = self.barrels.iter().position(|(bid, _)| *bid == id)?;
        let (_, barrel) = self.barrels.remove(index);
        debug!(id = id.0, count = self.barrels.len(), "Barrel unregistered");
        Some(barrel)
    }

    pub fn get(&self, id: BarrelId) -> Option<&Barrel> {
        self.barrels.iter().find(|(bid, _)| *bid == id).map(|(_, b)| b)
    }

    fn get_mut(&mut self, id: BarrelId) -> Option<&mut Barrel> {
        self.barrels.iter_mut().find(|(bid, _)| *bid == id).map(|(_, b)| b)
    }

    pub fn set_type(&mut self, id: BarrelId, barrel_type: Option<BarrelTypeId>) -> bool {
        match self.get_mut(id) {
            Some(barrel) => {
                barrel.barrel_type = barrel_type;
                true
            }
            None => false,
        }
    }

    pub fn move_to(&mut self, id: BarrelId, position: Vec3) -> bool {
        match self.get_mut(id) {
            Some(barrel) => {
                barrel.position = position;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.barrels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barrels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BarrelId, &Barrel)> {
        self.barrels.iter().map(|(id, b)| (*id, b))
    }

    /// Barrels paired with their resolved type; untyped barrels are skipped.
    fn typed(&self) -> impl Iterator<Item = (BarrelId, &Barrel, &BarrelType)> {
        self.barrels.iter().filter_map(move |(id, barrel)| {
            let barrel_type = self.barrel_type(barrel.barrel_type?)?;
            Some((*id, barrel, barrel_type))
        })
    }

    /// Display color for a barrel: its type color, grey when untyped.
    pub fn tint(&self, id: BarrelId) -> Option<Vec4> {
        let barrel = self.get(id)?;
        let color = barrel
            .barrel_type
            .and_then(|t| self.barrel_type(t))
            .map_or(UNTYPED_BARREL_COLOR, |t| t.color);
        Some(color)
    }

    /// Typed barrels whose blast sphere contains `point`.
    pub fn barrels_in_blast(&self, point: Vec3) -> Vec<BarrelId> {
        self.typed()
            .filter(|(_, barrel, t)| barrel.position.distance_squared(point) <= t.radius * t.radius)
            .map(|(id, _, _)| id)
            .collect()
    }

    /// Total damage at `point` from every barrel in range.
    pub fn damage_at(&self, point: Vec3) -> f32 {
        self.typed()
            .filter(|(_, barrel, t)| barrel.position.distance_squared(point) <= t.radius * t.radius)
            .map(|(_, _, t)| t.damage)
            .sum()
    }

    /// Horizontal blast rings for every typed barrel.
    pub fn blast_rings(&self, settings: &BlastOverlaySettings) -> Vec<BlastRing> {
        if !settings.show_radius {
            return Vec::new();
        }
        self.typed()
            .map(|(id, barrel, t)| BlastRing {
                barrel: id,
                center: barrel.position,
                normal: Vec3::Y,
                radius: t.radius,
                color: t.color * settings.radius_opacity,
                thickness: settings.radius_thickness,
            })
            .collect()
    }

    /// Wires from the manager to every typed barrel.
    pub fn wires(&self, manager_position: Vec3, settings: &BlastOverlaySettings) -> Vec<WireCurve> {
        if !settings.show_wires {
            return Vec::new();
        }
        self.typed()
            .map(|(id, barrel, t)| {
                WireCurve::between(
                    id,
                    manager_position,
                    barrel.position,
                    t.color * settings.wire_opacity,
                    settings.wire_thickness,
                )
            })
            .collect()
    }
}
