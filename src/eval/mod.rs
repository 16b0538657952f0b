//! SDF Evaluation
//!
//! Point queries over an [`SdfGraph`] through the borrowed [`NodeRef`] view,
//! and the lattice voxelizer built on top of them.

pub mod parallel;
pub mod voxel;

pub use parallel::{collect_solid_parallel, eval_batch, eval_batch_parallel};
pub use voxel::{collect_solid, evaluate, region_for, round_quarter, DebugSample, EvalStats, Voxel};

use crate::operations::*;
use crate::primitives::*;
use crate::transforms::*;
use crate::types::{Bounds, Float3, NodeId, SdfGraph, SdfNode};

/// Borrowed view of one node of a graph, optionally moved in space
///
/// `moved` wraps the node in a translation without touching the graph,
/// which is how a local-space tree is placed at its world position.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    graph: &'a SdfGraph,
    id: NodeId,
    offset: Float3,
}

impl<'a> NodeRef<'a> {
    /// View of `id` without offset
    pub fn new(graph: &'a SdfGraph, id: NodeId) -> Self {
        NodeRef {
            graph,
            id,
            offset: Float3::ZERO,
        }
    }

    /// View of the graph root
    pub fn root_of(graph: &'a SdfGraph) -> Self {
        Self::new(graph, graph.root())
    }

    /// Same node translated by an additional `offset`
    pub fn moved(self, offset: Float3) -> Self {
        NodeRef {
            offset: self.offset + offset,
            ..self
        }
    }

    /// The top-level node of the same graph, with the same offset
    pub fn root(self) -> Self {
        NodeRef {
            id: self.graph.root(),
            ..self
        }
    }

    /// Viewed node id
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Accumulated translation
    #[inline]
    pub fn offset(&self) -> Float3 {
        self.offset
    }

    /// Backing graph
    #[inline]
    pub fn graph(&self) -> &'a SdfGraph {
        self.graph
    }

    /// Viewed node, `None` for dangling ids
    #[inline]
    pub fn node(&self) -> Option<&'a SdfNode> {
        self.graph.get(self.id)
    }

    /// Whether the view evaluates to nothing (Empty or dangling)
    pub fn is_empty(&self) -> bool {
        self.node().map_or(true, SdfNode::is_empty)
    }

    /// Signed distance at a world point
    #[inline]
    pub fn distance(&self, point: Float3) -> f64 {
        eval(self.graph, self.id, transform_translate(point, self.offset))
    }

    /// Material of the primitive that defines the surface at a world point
    #[inline]
    pub fn material_at(&self, point: Float3) -> u32 {
        eval_material(self.graph, self.id, transform_translate(point, self.offset))
    }

    /// World-space bounding box, `None` for shapes without extent
    pub fn bounding_box(&self) -> Option<Bounds> {
        bounding_box(self.graph, self.id).map(|b| b.translate(self.offset))
    }
}

/// Evaluate the subtree at `id` at a single point
///
/// Dangling ids and `Empty` are infinitely far away.
pub fn eval(graph: &SdfGraph, id: NodeId, point: Float3) -> f64 {
    let Some(node) = graph.get(id) else {
        return f64::INFINITY;
    };
    match node {
        // === Primitives ===
        SdfNode::Sphere { center, radius, .. } => sdf_sphere_at(point, *center, *radius),
        SdfNode::Box3d { transform, .. } => {
            sdf_oriented_box(point, transform.center, transform.size, transform.rotation)
        }

        // === Operations ===
        SdfNode::Union { children } => children
            .iter()
            .map(|c| eval(graph, *c, point))
            .fold(f64::INFINITY, sdf_union),
        SdfNode::Intersection { children } => {
            if children.is_empty() {
                return f64::INFINITY;
            }
            children
                .iter()
                .map(|c| eval(graph, *c, point))
                .fold(f64::NEG_INFINITY, sdf_intersection)
        }
        SdfNode::Subtraction { base, cut } => {
            sdf_subtraction(eval(graph, *base, point), eval(graph, *cut, point))
        }

        // === Transforms ===
        SdfNode::Move { child, offset } => eval(graph, *child, transform_translate(point, *offset)),

        SdfNode::Empty => f64::INFINITY,
    }
}

/// Material index at a point
///
/// Combinators forward to the child that produced the combined distance;
/// ties go to the child listed first. Returns 0 where no primitive applies.
pub fn eval_material(graph: &SdfGraph, id: NodeId, point: Float3) -> u32 {
    let Some(node) = graph.get(id) else {
        return 0;
    };
    match node {
        SdfNode::Sphere { material, .. } | SdfNode::Box3d { material, .. } => *material,

        SdfNode::Union { children } => {
            union_winner(children.iter().map(|c| eval(graph, *c, point)))
                .map_or(0, |(i, _)| eval_material(graph, children[i], point))
        }
        SdfNode::Intersection { children } => {
            intersection_winner(children.iter().map(|c| eval(graph, *c, point)))
                .map_or(0, |(i, _)| eval_material(graph, children[i], point))
        }
        SdfNode::Subtraction { base, cut } => {
            let d_base = eval(graph, *base, point);
            let d_cut = eval(graph, *cut, point);
            if subtraction_base_wins(d_base, d_cut) {
                eval_material(graph, *base, point)
            } else {
                eval_material(graph, *cut, point)
            }
        }

        SdfNode::Move { child, offset } => {
            eval_material(graph, *child, transform_translate(point, *offset))
        }

        SdfNode::Empty => 0,
    }
}

/// Local-space bounding box of the subtree at `id`
///
/// Union and subtraction take the union of their children's boxes,
/// intersection the overlap. Empty shapes have no box.
pub fn bounding_box(graph: &SdfGraph, id: NodeId) -> Option<Bounds> {
    let node = graph.get(id)?;
    match node {
        SdfNode::Sphere { .. } | SdfNode::Box3d { .. } => node.primitive_bounds(),

        SdfNode::Union { children } => children
            .iter()
            .filter_map(|c| bounding_box(graph, *c))
            .reduce(|a, b| a.union(&b)),
        SdfNode::Intersection { children } => {
            let mut boxes = children.iter().map(|c| bounding_box(graph, *c));
            let first = boxes.next()??;
            boxes.try_fold(first, |acc, b| acc.intersection(&b?))
        }
        SdfNode::Subtraction { base, cut } => {
            match (bounding_box(graph, *base), bounding_box(graph, *cut)) {
                (Some(a), Some(b)) => Some(a.union(&b)),
                (a, b) => a.or(b),
            }
        }

        SdfNode::Move { child, offset } => {
            bounding_box(graph, *child).map(|b| b.translate(*offset))
        }

        SdfNode::Empty => None,
    }
}
