//! SDF Primitives
//!
//! Distance functions of the leaf shapes. All functions return signed
//! distance: negative inside, zero on the surface, positive outside.

mod box3d;
mod sphere;

pub use box3d::{oriented_box_corners, sdf_box3d, sdf_oriented_box};
pub use sphere::{inscribed_radius, sdf_sphere, sdf_sphere_at};
