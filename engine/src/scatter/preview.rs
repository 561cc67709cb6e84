//! GPU-ready preview records for scatter candidates.
//!
//! The host draws ghost props with instanced rendering; this module only
//! packs the data. Layout matches a WGSL struct of the same field order.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use super::planner::PlacementCandidate;
use super::sampling::PropTemplate;

/// Template index used when a candidate has no template (marker preview).
pub const NO_TEMPLATE: u32 = u32::MAX;

/// Tint for candidates that can be placed (0xRRGGBBAA).
pub const VALID_TINT: u32 = 0xFFFF_FFFF;

/// Tint for candidates whose clearance column is blocked (0xRRGGBBAA).
pub const BLOCKED_TINT: u32 = 0xFF40_40C0;

/// One preview instance.
///
/// Layout (48 bytes):
/// - position:       vec3<f32> (12 bytes)
/// - _pad0:          u32       (4 bytes)
/// - rotation:       vec4<f32> (16 bytes) quaternion x, y, z, w
/// - scale:          f32       (4 bytes)
/// - template_index: u32       (4 bytes) index into the pool or `NO_TEMPLATE`
/// - valid:          u32       (4 bytes) 1 = placeable, 0 = blocked
/// - tint_color:     u32       (4 bytes) packed RGBA
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PreviewInstance {
    pub position: [f32; 3],
    pub _pad0: u32,
    pub rotation: [f32; 4],
    pub scale: f32,
    pub template_index: u32,
    pub valid: u32,
    pub tint_color: u32,
}

static_assertions::assert_eq_size!(PreviewInstance, [u8; 48]);

impl Default for PreviewInstance {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            _pad0: 0,
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: 1.0,
            template_index: NO_TEMPLATE,
            valid: 1,
            tint_color: VALID_TINT,
        }
    }
}

impl PreviewInstance {
    /// Pack a candidate. `pool` resolves the template to an index by identity.
    pub fn from_candidate(candidate: &PlacementCandidate, pool: &[Arc<PropTemplate>]) -> Self {
        let template_index = candidate
            .template
            .as_ref()
            .and_then(|t| pool.iter().position(|p| Arc::ptr_eq(p, t)))
            .map_or(NO_TEMPLATE, |i| i as u32);

        Self {
            position: candidate.position.into(),
            rotation: candidate.rotation.into(),
            template_index,
            valid: candidate.valid as u32,
            tint_color: if candidate.valid { VALID_TINT } else { BLOCKED_TINT },
            ..Default::default()
        }
    }
}

/// Pack all candidates in order.
pub fn preview_instances(
    candidates: &[PlacementCandidate],
    pool: &[Arc<PropTemplate>],
) -> Vec<PreviewInstance> {
    candidates
        .iter()
        .map(|c| PreviewInstance::from_candidate(c, pool))
        .collect()
}

/// Raw bytes for uploading to an instance buffer.
pub fn instance_bytes(instances: &[PreviewInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
