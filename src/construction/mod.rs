//! Construction state stored on an item
//!
//! [`ConstructionData`] is a write-through view over the `"construction"`
//! compound of an item tag: the working bounding box, the selected handle,
//! the SDF tree being edited, which node of it is active and where the tree
//! sits in the world. Edits go through [`ConstructionData::apply_edit`].

mod edit;

pub use edit::{EditAction, EditInput, EditOutcome, EditState};

use log::debug;

use crate::eval::NodeRef;
use crate::tag::{CachedValue, TagCompound};
use crate::types::{block_center, BlockPos, Bounds, Float3, Interpolate, NodeId, SdfGraph};

/// Key of the construction compound inside the item tag
pub const CONSTRUCTION_TAG: &str = "construction";
/// Working bounding box
pub const BOUNDING_BOX_TAG: &str = "bb";
/// Selected handle
pub const SELECTED_CORNER_TAG: &str = "sc";
/// Encoded SDF tree
pub const SDF_TAG: &str = "sdf";
/// Active node of the tree
pub const ACTIVE_NODE_TAG: &str = "an";
/// World offset of the tree
pub const CENTER_TAG: &str = "ct";

/// Default reach: 64 blocks, squared
pub const DEFAULT_REACH_RADIUS_SQ: f64 = 64.0 * 64.0;

/// Edit configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructionConfig {
    /// Edits are accepted while the squared distance between requester and
    /// box center is strictly below this
    pub reach_radius_sq: f64,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        ConstructionConfig {
            reach_radius_sq: DEFAULT_REACH_RADIUS_SQ,
        }
    }
}

/// Write-through view over one item's construction state
#[derive(Debug)]
pub struct ConstructionData<'a> {
    tag: &'a mut TagCompound,
    config: ConstructionConfig,
    bounding_box: CachedValue<Bounds>,
    selected_corner: CachedValue<Interpolate>,
    graph: CachedValue<SdfGraph>,
    active_node: CachedValue<NodeId>,
    center: CachedValue<Float3>,
}

impl<'a> ConstructionData<'a> {
    /// View over the construction compound of `item_tag`, creating it when
    /// missing
    pub fn of(item_tag: &'a mut TagCompound) -> Self {
        Self::new(item_tag.get_compound_or_create(CONSTRUCTION_TAG))
    }

    /// View over an already extracted construction compound
    pub fn new(tag: &'a mut TagCompound) -> Self {
        ConstructionData {
            tag,
            config: ConstructionConfig::default(),
            bounding_box: CachedValue::new(BOUNDING_BOX_TAG),
            selected_corner: CachedValue::new(SELECTED_CORNER_TAG),
            graph: CachedValue::new(SDF_TAG),
            active_node: CachedValue::new(ACTIVE_NODE_TAG),
            center: CachedValue::new(CENTER_TAG),
        }
    }

    /// Replace the edit configuration
    pub fn with_config(mut self, config: ConstructionConfig) -> Self {
        self.config = config;
        self
    }

    /// Edit configuration
    #[inline]
    pub fn config(&self) -> &ConstructionConfig {
        &self.config
    }

    /// Underlying construction compound
    #[inline]
    pub fn tag(&self) -> &TagCompound {
        self.tag
    }

    // === Stored fields ===

    /// Stored bounding box
    pub fn bounding_box(&self) -> Option<Bounds> {
        self.bounding_box.get(self.tag).copied()
    }

    /// Store (or clear) the bounding box
    pub fn set_bounding_box(&mut self, bounds: Option<Bounds>) {
        self.bounding_box.set(self.tag, bounds);
    }

    /// Selected handle
    pub fn selected_corner(&self) -> Option<Interpolate> {
        self.selected_corner.get(self.tag).copied()
    }

    /// Store (or clear) the selected handle
    pub fn set_selected_corner(&mut self, corner: Option<Interpolate>) {
        self.selected_corner.set(self.tag, corner);
    }

    /// Stored SDF tree
    pub fn graph(&self) -> Option<&SdfGraph> {
        self.graph.get(self.tag)
    }

    /// Store (or clear) the SDF tree
    pub fn set_graph(&mut self, graph: Option<SdfGraph>) {
        self.graph.set(self.tag, graph);
    }

    /// Active node: the stored one if the tree has it, otherwise the root
    pub fn active_node(&self) -> Option<NodeId> {
        let graph = self.graph()?;
        match self.active_node.get(self.tag) {
            Some(&id) if graph.contains(id) => Some(id),
            _ => Some(graph.root()),
        }
    }

    /// Store (or clear) the active node
    pub fn set_active_node(&mut self, id: Option<NodeId>) {
        self.active_node.set(self.tag, id);
    }

    /// World offset of the tree
    pub fn center(&self) -> Option<Float3> {
        self.center.get(self.tag).copied()
    }

    /// Store (or clear) the world offset
    pub fn set_center(&mut self, center: Option<Float3>) {
        self.center.set(self.tag, center);
    }

    // === Derived views ===

    /// Active node placed in world space
    pub fn active_ref(&self) -> Option<NodeRef<'_>> {
        let graph = self.graph()?;
        let id = self.active_node()?;
        Some(NodeRef::new(graph, id).moved(self.center().unwrap_or(Float3::ZERO)))
    }

    /// Tree root placed in world space
    pub fn root_ref(&self) -> Option<NodeRef<'_>> {
        self.active_ref().map(NodeRef::root)
    }

    /// Box the edits operate on
    ///
    /// The active node's world-space bounding box while there is a tree to
    /// edit. The stored box only stands in when there is none, as during a
    /// freehand definition, so switching node or moving the tree never
    /// leaves a stale box behind.
    pub fn working_bounds(&self) -> Option<Bounds> {
        match self.active_ref() {
            Some(node) if !node.is_empty() => node.bounding_box(),
            _ => self.bounding_box(),
        }
    }

    /// Squared distance from the working box center, `f64::MAX` without one
    pub fn distance_to_center_squared(&self, point: Float3) -> f64 {
        self.working_bounds()
            .map_or(f64::MAX, |b| b.distance_squared_to_center(point))
    }

    /// Whether `point` is close enough to edit
    pub fn in_reach(&self, point: Float3) -> bool {
        self.distance_to_center_squared(point) < self.config.reach_radius_sq
    }

    /// Current edit state
    pub fn state(&self) -> EditState {
        match self.selected_corner() {
            Some(corner) => EditState::CornerSelected(corner),
            None => EditState::NoSelection,
        }
    }

    // === Freehand box definition ===

    /// Grow the stored box to cover `pos`, starting a new box if none
    pub fn add_to_bounds(&mut self, pos: BlockPos) -> Bounds {
        let p = block_center(pos);
        let bounds = match self.bounding_box() {
            Some(b) => b.encapsulate(p),
            None => Bounds::from_point(p),
        };
        debug!("bounding box grown to {}", bounds);
        self.set_bounding_box(Some(bounds));
        bounds
    }

    /// Shrink the stored box so it no longer covers `pos`
    ///
    /// Clears the box when nothing is left; a missing box stays missing.
    pub fn shrink(&mut self, pos: BlockPos) -> Option<Bounds> {
        let current = self.bounding_box()?;
        let shrunk = current.shrink(block_center(pos));
        match &shrunk {
            Some(b) => debug!("bounding box shrunk to {}", b),
            None => debug!("bounding box shrunk away at {}", pos),
        }
        self.set_bounding_box(shrunk);
        shrunk
    }
}
