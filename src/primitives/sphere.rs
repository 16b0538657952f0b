//! Sphere primitive SDF

use glam::DVec3;

/// Signed distance to a sphere centered at origin
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `radius` - Sphere radius
///
/// # Returns
/// Signed distance (negative inside, positive outside)
#[inline(always)]
pub fn sdf_sphere(point: DVec3, radius: f64) -> f64 {
    point.length() - radius
}

/// Signed distance to a sphere at arbitrary center
#[inline(always)]
pub fn sdf_sphere_at(point: DVec3, center: DVec3, radius: f64) -> f64 {
    sdf_sphere(point - center, radius)
}

/// Radius of the largest sphere that fits in a box of the given size
#[inline]
pub fn inscribed_radius(size: DVec3) -> f64 {
    size.abs().min_element() * 0.5
}
