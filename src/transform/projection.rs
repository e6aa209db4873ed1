//! Perspective divide from 4-D / 6-D down to 3-D.
//!
//! The viewpoint sits on the first axis (`w` or `t1`) at `viewpoint`. Points
//! are scaled by `1 / (viewpoint − first)`, so they shrink toward the origin as
//! they move away from the viewpoint. Anything within [`NEAR_PLANE_EPSILON`] of
//! the viewpoint, or behind it, is culled.

use glam::Vec3;

use crate::geometry::{Vector4, Vector6};

/// Minimum distance along the projection axis for a point to survive
pub const NEAR_PLANE_EPSILON: f32 = 0.001;

/// Stand-in position for culled geometry: far outside the view frustum
pub const CULLED_POSITION: [f32; 3] = [9999.0, 9999.0, 9999.0];

#[inline]
fn perspective_scale(first: f32, viewpoint: f32) -> Option<f32> {
    let denom = viewpoint - first;
    if denom <= NEAR_PLANE_EPSILON {
        return None;
    }
    Some(1.0 / denom)
}

/// Project a 4-D point onto (x, y, z). `None` means culled.
pub fn project4(v: Vector4, viewpoint_w: f32) -> Option<Vec3> {
    let scale = perspective_scale(v.w(), viewpoint_w)?;
    Some(Vec3::new(v.x(), v.y(), v.z()) * scale)
}

/// Project a 3-space + 3-time point onto its space coordinates. `None` means culled.
pub fn project6(v: Vector6, viewpoint_t1: f32) -> Option<Vec3> {
    let scale = perspective_scale(v.t1(), viewpoint_t1)?;
    Some(Vec3::from_array(v.space()) * scale)
}
