//! SDF node variants
//!
//! Nodes live in an [`SdfGraph`](super::SdfGraph) arena and refer to their
//! children by [`NodeId`]. A node never owns a child; combinators and the
//! `Move` wrapper only hold indices.

use glam::DQuat;
use serde::{Deserialize, Serialize};

use super::{Bounds, Float3};
use crate::primitives::{inscribed_radius, oriented_box_corners};

/// Index of a node inside its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Arena slot
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category of an SDF node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdfCategory {
    /// Leaf geometry nodes
    Primitive,
    /// Boolean combinators
    Operation,
    /// Spatial transform wrappers
    Transform,
    /// The empty shape
    Empty,
}

/// Placement of a box primitive: center, full size, orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxTransform {
    /// Box center
    pub center: Float3,
    /// Full edge lengths
    pub size: Float3,
    /// Orientation (unit quaternion)
    pub rotation: DQuat,
}

impl BoxTransform {
    /// Axis-aligned placement
    pub fn new(center: Float3, size: Float3) -> Self {
        BoxTransform {
            center,
            size: size.abs(),
            rotation: DQuat::IDENTITY,
        }
    }

    /// Same placement with a different orientation
    pub fn with_rotation(mut self, rotation: DQuat) -> Self {
        self.rotation = rotation.normalize();
        self
    }

    /// The 8 corners in world space
    pub fn corners(&self) -> [Float3; 8] {
        oriented_box_corners(self.center, self.size, self.rotation)
    }

    /// Axis-aligned envelope of the (possibly rotated) box
    pub fn bounding_box(&self) -> Bounds {
        let corners = self.corners();
        let mut bounds = Bounds::from_point(corners[0]);
        for c in &corners[1..] {
            bounds = bounds.encapsulate(*c);
        }
        bounds
    }

    /// Move by `offset`
    pub fn translate(&self, offset: Float3) -> Self {
        BoxTransform {
            center: self.center + offset,
            ..*self
        }
    }
}

/// Reshapes a node from a dragged bounding box
pub type ResizeFn = fn(&SdfNode, &Bounds) -> SdfNode;

/// Signed Distance Function Node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SdfNode {
    // === Primitives ===
    /// Sphere with center and radius
    Sphere {
        /// Sphere center
        center: Float3,
        /// Sphere radius
        radius: f64,
        /// Material index
        material: u32,
    },

    /// Oriented box
    Box3d {
        /// Placement
        transform: BoxTransform,
        /// Material index
        material: u32,
    },

    // === Operations ===
    /// Union of all children (minimum distance)
    Union {
        /// Children in declaration order
        children: Vec<NodeId>,
    },

    /// Intersection of all children (maximum distance)
    Intersection {
        /// Children in declaration order
        children: Vec<NodeId>,
    },

    /// `base` with `cut` carved out
    Subtraction {
        /// Shape to carve from
        base: NodeId,
        /// Carving shape
        cut: NodeId,
    },

    // === Transforms ===
    /// Child translated by `offset`
    Move {
        /// Wrapped node
        child: NodeId,
        /// Translation
        offset: Float3,
    },

    /// Nothing at all
    Empty,
}

impl SdfNode {
    /// Sphere with the default material
    pub fn sphere(center: Float3, radius: f64) -> Self {
        SdfNode::Sphere {
            center,
            radius: radius.abs(),
            material: 0,
        }
    }

    /// Axis-aligned box with the default material
    pub fn cuboid(center: Float3, size: Float3) -> Self {
        SdfNode::Box3d {
            transform: BoxTransform::new(center, size),
            material: 0,
        }
    }

    /// Axis-aligned box covering `bounds`
    pub fn cuboid_from_bounds(bounds: &Bounds) -> Self {
        Self::cuboid(bounds.center(), bounds.size())
    }

    /// Same primitive with another material; other variants are unchanged
    pub fn with_material(mut self, index: u32) -> Self {
        match &mut self {
            SdfNode::Sphere { material, .. } | SdfNode::Box3d { material, .. } => {
                *material = index;
            }
            _ => {}
        }
        self
    }

    /// Returns the category of this node variant
    pub fn category(&self) -> SdfCategory {
        match self {
            SdfNode::Sphere { .. } | SdfNode::Box3d { .. } => SdfCategory::Primitive,
            SdfNode::Union { .. } | SdfNode::Intersection { .. } | SdfNode::Subtraction { .. } => {
                SdfCategory::Operation
            }
            SdfNode::Move { .. } => SdfCategory::Transform,
            SdfNode::Empty => SdfCategory::Empty,
        }
    }

    /// Direct children in declaration order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            SdfNode::Union { children } | SdfNode::Intersection { children } => children.clone(),
            SdfNode::Subtraction { base, cut } => vec![*base, *cut],
            SdfNode::Move { child, .. } => vec![*child],
            SdfNode::Sphere { .. } | SdfNode::Box3d { .. } | SdfNode::Empty => Vec::new(),
        }
    }

    /// Material index of a primitive
    pub fn material(&self) -> Option<u32> {
        match self {
            SdfNode::Sphere { material, .. } | SdfNode::Box3d { material, .. } => Some(*material),
            _ => None,
        }
    }

    /// Whether this is the empty shape
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, SdfNode::Empty)
    }

    /// The resize capability, if this variant can be reshaped from a box
    pub fn resize_capability(&self) -> Option<ResizeFn> {
        match self {
            SdfNode::Sphere { .. } => Some(resize_sphere as ResizeFn),
            SdfNode::Box3d { .. } => Some(resize_box as ResizeFn),
            _ => None,
        }
    }

    /// Local-space bounding box of a primitive
    ///
    /// Combinators need the graph to resolve children, see
    /// [`NodeRef::bounding_box`](crate::eval::NodeRef::bounding_box).
    pub fn primitive_bounds(&self) -> Option<Bounds> {
        match self {
            SdfNode::Sphere { center, radius, .. } => Some(Bounds::new(
                *center - Float3::splat(*radius),
                *center + Float3::splat(*radius),
            )),
            SdfNode::Box3d { transform, .. } => Some(transform.bounding_box()),
            _ => None,
        }
    }
}

/// Sphere centered in the box, inscribed in its smallest extent
fn resize_sphere(node: &SdfNode, bounds: &Bounds) -> SdfNode {
    let material = node.material().unwrap_or(0);
    SdfNode::Sphere {
        center: bounds.center(),
        radius: inscribed_radius(bounds.size()),
        material,
    }
}

/// Box filling the bounds; orientation is kept
fn resize_box(node: &SdfNode, bounds: &Bounds) -> SdfNode {
    match node {
        SdfNode::Box3d {
            transform,
            material,
        } => SdfNode::Box3d {
            transform: BoxTransform {
                center: bounds.center(),
                size: bounds.size(),
                rotation: transform.rotation,
            },
            material: *material,
        },
        _ => SdfNode::cuboid_from_bounds(bounds),
    }
}
