//! CSG (Constructive Solid Geometry) Operations
//!
//! Boolean operations for combining SDFs, plus the matching "winner"
//! helpers that tell which operand defines the result at a point (used for
//! material attribution).

mod intersection;
mod subtraction;
mod union;

pub use intersection::{intersection_winner, sdf_intersection};
pub use subtraction::{sdf_subtraction, subtraction_base_wins};
pub use union::{sdf_union, union_winner};
