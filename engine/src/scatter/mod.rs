//! Prop Scatter Module
//!
//! The "prop cannon": scatters template instances over whatever surface lies
//! under the brush. The host provides the ray queries (see
//! [`crate::physics`]); this module provides the sampling, the tangent-space
//! projection and the resulting poses.
//!
//! # Example
//!
//! ```ignore
//! use prop_cannon_engine::physics::{AlwaysClear, Collider, SceneColliders};
//! use prop_cannon_engine::scatter::{ScatterConfig, ScatterPlanner, TangentFrame};
//! use glam::Vec3;
//!
//! let scene = SceneColliders::new().with(Collider::ground(0.0));
//! let mut planner = ScatterPlanner::new(ScatterConfig::default());
//!
//! let frame = TangentFrame::new(Vec3::ZERO, Vec3::Y, Vec3::Z);
//! for candidate in planner.commit(&frame, &scene, &AlwaysClear) {
//!     host.spawn(candidate.template.as_deref(), candidate.pose());
//! }
//! ```

pub mod frame;
pub mod planner;
pub mod preview;
pub mod sampling;
pub mod selection;

pub use frame::{TangentFrame, look_rotation, surface_rotation};
pub use planner::{
    DEFAULT_OUTLINE_DETAIL, DEFAULT_PROBE_OFFSET, PlacementCandidate, Pose, ScatterConfig,
    ScatterPlanner, brush_outline, resolve, resolve_with_offset,
};
pub use preview::{PreviewInstance, instance_bytes, preview_instances};
pub use sampling::{DiscSample, PropTemplate, generate_samples, sample_unit_disc};
pub use selection::SelectionSet;
