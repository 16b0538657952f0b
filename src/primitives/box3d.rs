//! Box primitive SDF
//!
//! Boxes are described by center, full size and an orientation quaternion.
//! Evaluation rotates the query point into box space and uses the classic
//! axis-aligned box distance there.

use crate::transforms::{from_box_space, to_box_space};
use glam::{DQuat, DVec3};

/// Signed distance to an axis-aligned box centered at origin
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `half_extents` - Half-size in each dimension
///
/// # Returns
/// Signed distance (negative inside, positive outside)
#[inline(always)]
pub fn sdf_box3d(point: DVec3, half_extents: DVec3) -> f64 {
    let q = point.abs() - half_extents;
    q.max(DVec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
}

/// Signed distance to an oriented box
///
/// `rotation` must be a unit quaternion.
#[inline(always)]
pub fn sdf_oriented_box(point: DVec3, center: DVec3, size: DVec3, rotation: DQuat) -> f64 {
    sdf_box3d(to_box_space(point, center, rotation), size.abs() * 0.5)
}

/// World-space corners of an oriented box
pub fn oriented_box_corners(center: DVec3, size: DVec3, rotation: DQuat) -> [DVec3; 8] {
    let half = size.abs() * 0.5;
    std::array::from_fn(|i| {
        let sign = DVec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        from_box_space(half * sign, center, rotation)
    })
}
