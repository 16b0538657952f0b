//! Core types for construct-sdf
//!
//! Vectors, bounds, box handles and the arena-backed SDF node graph.

mod bounds;
mod graph;
mod interpolate;
mod node;

pub use bounds::{block_center, block_of, BlockPos, Bounds, Float3, POSITION_EPSILON};
pub use graph::{GraphError, SdfGraph};
pub use interpolate::Interpolate;
pub use node::{BoxTransform, NodeId, ResizeFn, SdfCategory, SdfNode};
