//! # construct-sdf
//!
//! Signed distance shapes edited in place on a block lattice.
//!
//! A construction tool (a "ruler" item) carries a small SDF tree together
//! with a working bounding box. Dragging a corner of that box reshapes the
//! active primitive, and the tree is voxelized onto the integer lattice to
//! preview which cells it would fill.
//!
//! ## Features
//!
//! - **Primitives**: Sphere, oriented Box
//! - **Operations**: Union, Intersection, Subtraction
//! - **Transforms**: Move (by reference, never a copy)
//! - **Voxelization**: x-major lattice scan, sequential or rayon-parallel
//! - **Editing**: corner/center drag state machine with a reach check
//! - **Persistence**: write-through item tags with a validated SDF blob
//! - **Overlay**: per-frame outline/marker/label description
//!
//! ## Example
//!
//! ```rust
//! use construct_sdf::prelude::*;
//!
//! // Two overlapping spheres
//! let mut graph = SdfGraph::new();
//! let a = graph.sphere(Float3::ZERO, 3.0).unwrap();
//! let b = graph.sphere(Float3::new(0.0, 2.0, 0.0), 2.0).unwrap();
//! let u = graph.union(&[a, b]).unwrap();
//! graph.set_root(u).unwrap();
//!
//! // Voxelize over the block-aligned bounding box
//! let node = NodeRef::root_of(&graph);
//! let region = region_for(node).unwrap();
//! let voxels = collect_solid(node, &region);
//! assert!(voxels.iter().any(|v| v.pos == BlockPos::ZERO));
//!
//! // Store it on an item and drag the first sphere's max corner outward
//! let mut item = TagCompound::new();
//! let mut data = ConstructionData::of(&mut item);
//! data.set_graph(Some(graph));
//! data.set_active_node(Some(a));
//! data.apply_edit(&EditInput::at(BlockPos::splat(3), Float3::ZERO, EditAction::Select));
//! data.apply_edit(&EditInput::at(BlockPos::splat(5), Float3::ZERO, EditAction::Hover));
//! assert_eq!(data.working_bounds().unwrap().max, Float3::splat(5.0));
//! ```

#![warn(missing_docs)]

pub mod types;
pub mod primitives;
pub mod operations;
pub mod transforms;
pub mod eval;
pub mod tag;
pub mod construction;
pub mod overlay;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::types::{
        block_center, block_of, BlockPos, Bounds, BoxTransform, Float3, GraphError, Interpolate,
        NodeId, SdfGraph, SdfNode,
    };
    pub use crate::eval::{
        collect_solid, collect_solid_parallel, eval, eval_material, evaluate, region_for,
        DebugSample, EvalStats, NodeRef, Voxel,
    };
    pub use crate::tag::{CachedValue, TagCodec, TagCompound, TagValue};
    pub use crate::construction::{
        ConstructionConfig, ConstructionData, EditAction, EditInput, EditOutcome, EditState,
    };
    pub use crate::overlay::{build_overlay, FrameInput, Overlay, OverlayConfig};
    pub use glam::{DQuat, DVec3, IVec3};
}

// Re-exports for convenience
pub use types::{Bounds, SdfGraph, SdfNode};
pub use eval::{collect_solid, evaluate, NodeRef};
pub use construction::ConstructionData;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::VERSION;

    fn two_spheres() -> SdfGraph {
        let mut graph = SdfGraph::new();
        let a = graph.sphere(Float3::ZERO, 3.0).unwrap();
        let b = graph.sphere(Float3::new(0.0, 2.0, 0.0), 2.0).unwrap();
        let u = graph.union(&[a, b]).unwrap();
        graph.set_root(u).unwrap();
        graph
    }

    #[test]
    fn test_basic_workflow() {
        let graph = two_spheres();

        // Origin is inside both spheres
        let d = eval(&graph, graph.root(), Float3::ZERO);
        assert!((d + 3.0).abs() < 1e-9);

        // Surface of the upper sphere
        let d_surface = eval(&graph, graph.root(), Float3::new(0.0, 4.0, 0.0));
        assert!(d_surface.abs() < 1e-9);

        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_world_placement() {
        let graph = two_spheres();
        let placed = NodeRef::root_of(&graph).moved(Float3::new(100.0, 64.0, -30.0));
        let region = region_for(placed).unwrap();
        assert_eq!(region.min, Float3::new(97.0, 61.0, -33.0));
        assert_eq!(region.max, Float3::new(103.0, 68.0, -27.0));

        let voxels = collect_solid(placed, &region);
        assert!(voxels.iter().any(|v| v.pos == IVec3::new(100, 64, -30)));
        assert_eq!(voxels, collect_solid_parallel(placed, &region));
    }

    #[test]
    fn test_edit_and_overlay() {
        let mut item = TagCompound::new();
        let mut data = ConstructionData::of(&mut item);
        data.set_graph(Some(
            SdfGraph::with_root(SdfNode::cuboid(Float3::ZERO, Float3::splat(4.0))).unwrap(),
        ));

        let camera = Float3::new(0.0, 0.0, 10.0);
        let select = EditInput::at(BlockPos::splat(2), camera, EditAction::Select);
        assert_eq!(
            data.apply_edit(&select),
            EditOutcome::Selected(Interpolate::MaxMaxMax)
        );

        let hover = EditInput::at(BlockPos::splat(4), camera, EditAction::Hover);
        assert!(matches!(
            data.apply_edit(&hover),
            EditOutcome::Dragged { reshaped: true, .. }
        ));

        let frame = FrameInput {
            camera,
            target: Some(BlockPos::splat(4)),
            phase: 0.5,
        };
        let overlay = build_overlay(&data, &frame, &OverlayConfig::default());
        assert!(overlay.in_reach);
        assert!(!overlay.markers.is_empty());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
