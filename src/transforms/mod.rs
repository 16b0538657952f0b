//! Point transforms for SDFs
//!
//! Transforms map a query point into the child's frame before the child is
//! evaluated. `Move` nodes and moved [`NodeRef`](crate::eval::NodeRef) views
//! translate; oriented boxes additionally rotate into box space.

use glam::{DQuat, DVec3};

/// Query point in the frame of a child moved by `offset`
#[inline(always)]
pub fn transform_translate(point: DVec3, offset: DVec3) -> DVec3 {
    point - offset
}

/// World point into the local frame of a box at `center` rotated by `rotation`
///
/// `rotation` must be a unit quaternion, so its inverse is the conjugate.
#[inline(always)]
pub fn to_box_space(point: DVec3, center: DVec3, rotation: DQuat) -> DVec3 {
    rotation.conjugate() * transform_translate(point, center)
}

/// Box-local point back into world space
#[inline(always)]
pub fn from_box_space(local: DVec3, center: DVec3, rotation: DQuat) -> DVec3 {
    center + rotation * local
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translate() {
        let offset = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(transform_translate(offset, offset), DVec3::ZERO);
        assert_eq!(transform_translate(DVec3::ZERO, offset), -offset);
    }

    #[test]
    fn test_box_space_identity() {
        let center = DVec3::new(4.0, -1.0, 0.5);
        let p = DVec3::new(5.0, 0.0, 0.5);
        assert_eq!(to_box_space(p, center, DQuat::IDENTITY), DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_box_space_quarter_turn() {
        // Box X axis points along world Y after a quarter turn about Z
        let rotation = DQuat::from_rotation_z(FRAC_PI_2);
        let local = to_box_space(DVec3::new(0.0, 2.0, 0.0), DVec3::ZERO, rotation);
        assert!((local - DVec3::new(2.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_box_space_roundtrip() {
        let rotation = DQuat::from_rotation_y(0.7).normalize();
        let center = DVec3::new(-3.0, 8.0, 2.0);
        let p = DVec3::new(1.0, -2.0, 0.5);
        let back = from_box_space(to_box_space(p, center, rotation), center, rotation);
        assert!((back - p).length() < 1e-12);
    }
}
