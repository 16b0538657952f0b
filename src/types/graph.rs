//! Arena holding an SDF tree
//!
//! All nodes of one tree live in a flat `Vec`; edges are [`NodeId`]
//! indices. A child always has a smaller index than its parent and belongs
//! to at most one parent, so the arena holds a tree. Nesting is capped at
//! [`MAX_DEPTH`] to keep the recursive evaluator off the end of the stack.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Bounds, Float3, NodeId, SdfNode};

/// Deepest accepted nesting, a lone leaf counting as 1
pub const MAX_DEPTH: usize = 256;

/// Structural errors of an [`SdfGraph`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Referenced node does not exist
    #[error("node {0} is out of range (graph has {1} nodes)")]
    OutOfRange(NodeId, usize),

    /// A child is not older than its parent
    #[error("node {parent} references {child}, which is not an earlier node")]
    ForwardReference {
        /// Referencing node
        parent: NodeId,
        /// Referenced node
        child: NodeId,
    },

    /// A node is the child of more than one parent
    #[error("node {child} is referenced by both {first} and {second}")]
    SharedChild {
        /// Referenced node
        child: NodeId,
        /// Earlier parent
        first: NodeId,
        /// Later parent
        second: NodeId,
    },

    /// Nesting exceeds [`MAX_DEPTH`]
    #[error("node {0} nests {1} levels deep")]
    TooDeep(NodeId, usize),

    /// Graph exceeds the addressable node count
    #[error("graph is full")]
    Full,
}

/// SDF tree stored as an arena with a designated root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdfGraph {
    nodes: Vec<SdfNode>,
    root: NodeId,
    #[serde(default)]
    revision: u64,
}

impl Default for SdfGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SdfGraph {
    /// Graph with a single `Empty` root
    pub fn new() -> Self {
        SdfGraph {
            nodes: vec![SdfNode::Empty],
            root: NodeId(0),
            revision: 0,
        }
    }

    /// Graph holding one leaf node as root
    pub fn with_root(node: SdfNode) -> Result<Self, GraphError> {
        let mut graph = SdfGraph {
            nodes: Vec::new(),
            root: NodeId(0),
            revision: 0,
        };
        let id = graph.push(node)?;
        graph.root = id;
        Ok(graph)
    }

    /// Append a node whose children already exist and have no parent yet
    pub fn push(&mut self, node: SdfNode) -> Result<NodeId, GraphError> {
        let id = NodeId(u32::try_from(self.nodes.len()).map_err(|_| GraphError::Full)?);
        self.nodes.push(node);
        if let Err(err) = self.check_structure() {
            self.nodes.pop();
            return Err(err);
        }
        self.revision += 1;
        Ok(id)
    }

    /// Replace the node at `id`; the graph is left untouched on error
    pub fn replace(&mut self, id: NodeId, node: SdfNode) -> Result<(), GraphError> {
        let Some(slot) = self.nodes.get_mut(id.index()) else {
            return Err(GraphError::OutOfRange(id, self.nodes.len()));
        };
        let old = std::mem::replace(slot, node);
        if let Err(err) = self.check_structure() {
            self.nodes[id.index()] = old;
            return Err(err);
        }
        self.revision += 1;
        Ok(())
    }

    /// Make `id` the top-level node
    pub fn set_root(&mut self, id: NodeId) -> Result<(), GraphError> {
        if id.index() >= self.nodes.len() {
            return Err(GraphError::OutOfRange(id, self.nodes.len()));
        }
        self.root = id;
        self.revision += 1;
        Ok(())
    }

    /// Top-level node
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`, if it exists
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SdfNode> {
        self.nodes.get(id.index())
    }

    /// Whether `id` names a node
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Direct children of `id` (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(SdfNode::children).unwrap_or_default()
    }

    /// Node that lists `id` as a child
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .skip(id.index() + 1)
            .find(|(_, node)| node.children().contains(&id))
            .map(|(i, _)| NodeId(i as u32))
    }

    /// Nodes reachable from the root, including it
    pub fn node_count(&self) -> usize {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        let mut count = 0;
        while let Some(id) = stack.pop() {
            match seen.get_mut(id.index()) {
                Some(flag) if !*flag => {
                    *flag = true;
                    count += 1;
                    stack.extend(self.children(id));
                }
                _ => {}
            }
        }
        count
    }

    /// Total arena slots, reachable or not
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: a graph always has a root slot
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Counter bumped by every mutation
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Reshape the node at `id` from a box using its resize capability
    ///
    /// Returns `false` (and changes nothing) for variants without one.
    pub fn set_from_bounding_box(&mut self, id: NodeId, bounds: &Bounds) -> bool {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return false;
        };
        let Some(resize) = node.resize_capability() else {
            return false;
        };
        *node = resize(node, bounds);
        self.revision += 1;
        true
    }

    /// Check the root and the tree shape of a graph from outside, such as
    /// one decoded from an item tag
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.nodes.is_empty() || self.root.index() >= self.nodes.len() {
            return Err(GraphError::OutOfRange(self.root, self.nodes.len()));
        }
        self.check_structure()
    }

    /// Every reference points to an earlier node, no node has two parents
    /// and no chain is deeper than [`MAX_DEPTH`]
    fn check_structure(&self) -> Result<(), GraphError> {
        let mut parent_of: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        let mut depth = vec![1usize; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            let parent = NodeId(i as u32);
            for child in node.children() {
                if child >= parent {
                    return Err(GraphError::ForwardReference { parent, child });
                }
                if let Some(first) = parent_of[child.index()] {
                    return Err(GraphError::SharedChild {
                        child,
                        first,
                        second: parent,
                    });
                }
                parent_of[child.index()] = Some(parent);
                depth[i] = depth[i].max(depth[child.index()] + 1);
            }
            if depth[i] > MAX_DEPTH {
                return Err(GraphError::TooDeep(parent, depth[i]));
            }
        }
        Ok(())
    }

    // === Builders ===

    /// Append a sphere
    pub fn sphere(&mut self, center: Float3, radius: f64) -> Result<NodeId, GraphError> {
        self.push(SdfNode::sphere(center, radius))
    }

    /// Append an axis-aligned box
    pub fn cuboid(&mut self, center: Float3, size: Float3) -> Result<NodeId, GraphError> {
        self.push(SdfNode::cuboid(center, size))
    }

    /// Append a union of existing nodes
    pub fn union(&mut self, children: &[NodeId]) -> Result<NodeId, GraphError> {
        self.push(SdfNode::Union {
            children: children.to_vec(),
        })
    }

    /// Append an intersection of existing nodes
    pub fn intersection(&mut self, children: &[NodeId]) -> Result<NodeId, GraphError> {
        self.push(SdfNode::Intersection {
            children: children.to_vec(),
        })
    }

    /// Append `base` minus `cut`
    pub fn subtract(&mut self, base: NodeId, cut: NodeId) -> Result<NodeId, GraphError> {
        self.push(SdfNode::Subtraction { base, cut })
    }

    /// Append a translated reference to `child`
    pub fn translate(&mut self, child: NodeId, offset: Float3) -> Result<NodeId, GraphError> {
        self.push(SdfNode::Move { child, offset })
    }
}
