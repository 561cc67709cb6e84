//! Prop Cannon Engine Library
//!
//! Geometry for level-design tools: scattering props over a surface,
//! snapping positions to a grid, and blast-radius overlays for explosive
//! barrels. Rendering, UI, undo and object lifecycles belong to the host;
//! this library consumes ray queries and produces poses and overlay geometry.
//!
//! # Modules
//!
//! - [`scatter`] - Disc sampling, tangent-space projection, placement candidates
//! - [`physics`] - Surface/clearance query traits and an analytic collider scene
//! - [`world`] - Cartesian and polar grid snapping, grid overlay lines
//! - [`blast`] - Barrel types, barrel registry, blast rings and wires
//! - [`config`] - Persisted tool preferences
//!
//! # Example
//!
//! ```ignore
//! use prop_cannon_engine::physics::{Collider, SceneColliders, SurfaceQuery};
//! use prop_cannon_engine::scatter::{ScatterPlanner, SelectionSet, PropTemplate, TangentFrame};
//! use prop_cannon_engine::config::ToolPrefs;
//! use glam::Vec3;
//!
//! let prefs = ToolPrefs::load(&prop_cannon_engine::config::default_prefs_path())?;
//! let scene = SceneColliders::new().with(Collider::ground(0.0));
//!
//! let mut selection = SelectionSet::new([PropTemplate::new("rock").with_clearance(1.0)]);
//! selection.toggle(0);
//!
//! let mut planner = ScatterPlanner::new(prefs.scatter.clone());
//! planner.set_selection(&selection);
//!
//! // Brush center from the mouse ray
//! if let Some(hit) = scene.cast(camera_pos, mouse_dir) {
//!     let frame = TangentFrame::from_hit(&hit, camera_up);
//!     let ghosts = planner.preview(&frame, &scene, &scene);
//!     let placed = planner.commit(&frame, &scene, &scene);
//! }
//!
//! let snapped = prefs.snapper.snap(Vec3::new(1.3, 0.0, 2.7));
//! ```

pub mod blast;
pub mod config;
pub mod physics;
pub mod scatter;
pub mod world;

pub use physics::{ClearanceQuery, SurfaceHit, SurfaceQuery};
pub use scatter::{PlacementCandidate, ScatterPlanner, TangentFrame};
pub use world::{GridKind, GridSnapper};
