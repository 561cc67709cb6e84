//! Physics module
//!
//! Ray queries for the placement tools. There is no simulation here; the
//! scatter planner only needs to ask "where is the surface?" and "is there
//! room above this point?".
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, matching the host scene.
//!
//! # Submodules
//!
//! - [`collision`] - Query traits, analytic ray intersections and a collider scene

pub mod collision;

pub use collision::{
    AlwaysClear, ClearanceQuery, Collider, SceneColliders, SurfaceHit, SurfaceQuery,
    aabb_surface_normal, ray_aabb_intersect, ray_plane_intersect, ray_sphere_intersect,
};
