//! Per-frame overlay description
//!
//! [`build_overlay`] turns the construction state and the camera into a flat
//! list of outlines, filled markers and text labels. Drawing them is up to
//! the host renderer; nothing here touches a graphics API.

pub mod palette;

pub use palette::blend_colors;

use log::warn;

use crate::construction::ConstructionData;
use crate::eval::{evaluate, region_for, round_quarter, DebugSample, NodeRef, Voxel};
use crate::types::{
    block_center, block_of, BlockPos, Bounds, BoxTransform, Float3, Interpolate, SdfNode,
};
use palette::*;

/// Deflate of the handle markers
const HANDLE_DEFLATE: f32 = 0.1;
/// Deflate and alpha of the faint whole-tree voxels
const ROOT_DEFLATE: f32 = 0.3;
const ROOT_ALPHA: f32 = 0.15;
/// Outline alpha of the active-node voxels
const ACTIVE_OUTLINE_ALPHA: f32 = 0.6;
/// Quantum for the far-to-near ordering of markers
const SORT_QUANTUM: f64 = 0.001;
/// Default cap on lattice cells sampled per region, a 64-block cube
pub const DEFAULT_MAX_VOXEL_CELLS: usize = 64 * 64 * 64;

/// Overlay configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    /// Inset of the active-node voxel markers
    pub deflate: f32,
    /// Fill alpha of the active-node voxel markers
    pub alpha: f32,
    /// Emit distance labels around the target and on every sampled cell
    pub debug_distances: bool,
    /// Regions with more lattice cells than this are not voxelized
    pub max_voxel_cells: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            deflate: 0.2,
            alpha: 0.95,
            debug_distances: true,
            max_voxel_cells: DEFAULT_MAX_VOXEL_CELLS,
        }
    }
}

/// Per-frame input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Camera position in world space
    pub camera: Float3,
    /// Pointed-at lattice cell
    pub target: Option<BlockPos>,
    /// Pulse phase in `0..=1` for the idle handles
    pub phase: f32,
}

/// Pulse phase for an animation clock in ticks
pub fn pulse_phase(time: f64) -> f32 {
    let scaled = time * 0.02;
    let frac = scaled - scaled.floor();
    (((std::f64::consts::TAU * frac).sin() + 1.0) / 2.0) as f32
}

/// What an outline shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineKind {
    /// Pointed-at cell
    Target,
    /// Selected handle while dragging
    DraggedHandle,
    /// Idle handle
    Handle,
    /// Working box snapped to the lattice
    AlignedBox,
    /// Working box as stored
    ExactBox,
    /// Oriented box primitive
    OrientedBox,
    /// Working box while the camera is out of reach
    OutOfReach,
}

/// Geometry of an outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineShape {
    /// One lattice cell
    Block(BlockPos),
    /// Axis-aligned box
    Aabb(Bounds),
    /// Possibly rotated box
    Oriented(BoxTransform),
}

/// Line drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    /// Purpose
    pub kind: OutlineKind,
    /// Geometry
    pub shape: OutlineShape,
    /// Inset
    pub deflate: f32,
    /// ARGB colour
    pub color: u32,
    /// Opacity
    pub alpha: f32,
}

/// What a filled marker shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Grab handle; `highlighted` when the target is on it
    Handle {
        /// Which handle
        corner: Interpolate,
        /// Target is on this handle
        highlighted: bool,
    },
    /// Cell of the whole tree
    RootVoxel,
    /// Cell of the active node
    ActiveVoxel,
}

/// Filled cell with an outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Purpose
    pub kind: MarkerKind,
    /// Cell position
    pub pos: Float3,
    /// Squared distance to the camera
    pub camera_distance_sq: f64,
    /// Inset
    pub deflate: f32,
    /// Fill colour
    pub color: u32,
    /// Fill opacity
    pub alpha: f32,
    /// Outline colour
    pub outline_color: u32,
    /// Outline opacity
    pub outline_alpha: f32,
}

/// Floating text
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Anchor
    pub pos: Float3,
    /// Text
    pub text: String,
    /// ARGB colour
    pub color: u32,
}

/// Everything to draw for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Line drawings
    pub outlines: Vec<Outline>,
    /// Filled cells, far to near
    pub markers: Vec<Marker>,
    /// Text
    pub labels: Vec<Label>,
    /// Whether the camera was close enough to edit
    pub in_reach: bool,
}

impl Overlay {
    fn outline(&mut self, kind: OutlineKind, shape: OutlineShape, deflate: f32, color: u32) {
        self.outlines.push(Outline {
            kind,
            shape,
            deflate,
            color,
            alpha: 1.0,
        });
    }

    fn label(&mut self, pos: Float3, text: String, color: u32) {
        self.labels.push(Label { pos, text, color });
    }

    /// Outlines of one kind
    pub fn outlines_of(&self, kind: OutlineKind) -> impl Iterator<Item = &Outline> {
        self.outlines.iter().filter(move |o| o.kind == kind)
    }

    /// Sort markers far to near; ties keep insertion order
    fn sort_markers(&mut self) {
        self.markers.sort_by_key(|m| {
            std::cmp::Reverse((m.camera_distance_sq / SORT_QUANTUM).round() as i64)
        });
    }
}

/// Describe the overlay for the current frame
pub fn build_overlay(
    data: &ConstructionData<'_>,
    frame: &FrameInput,
    config: &OverlayConfig,
) -> Overlay {
    let mut overlay = Overlay::default();

    if let Some(target) = frame.target {
        overlay.outline(OutlineKind::Target, OutlineShape::Block(target), 0.01, COLOR_SELECTION);
        overlay.label(block_center(target), target.to_string(), COLOR_SELECTION);
    }

    let Some(active) = data.active_ref().filter(|node| !node.is_empty()) else {
        return overlay;
    };
    let Some(world_box) = data.working_bounds() else {
        return overlay;
    };

    if config.debug_distances {
        if let Some(target) = frame.target {
            target_distance_labels(&mut overlay, active, target);
        }
    }

    overlay.in_reach = data.in_reach(frame.camera);
    if !overlay.in_reach {
        overlay.outline(
            OutlineKind::OutOfReach,
            OutlineShape::Aabb(world_box),
            0.0,
            COLOR_OUT_OF_REACH,
        );
        return overlay;
    }

    let aligned = world_box.block_aligned();
    let selected = data.selected_corner();

    if let Some(corner) = selected {
        overlay.outline(
            OutlineKind::DraggedHandle,
            OutlineShape::Block(block_of(world_box.get(corner))),
            HANDLE_DEFLATE,
            COLOR_PURPLE,
        );
    }

    overlay.outline(
        OutlineKind::AlignedBox,
        OutlineShape::Aabb(aligned),
        0.0,
        COLOR_BOUNDING_BOX,
    );
    overlay.outline(OutlineKind::ExactBox, OutlineShape::Aabb(world_box), 0.0, COLOR_MAUVE);
    overlay.label(world_box.min - Float3::Y * 0.4, world_box.to_string(), COLOR_MAUVE);
    overlay.label(world_box.min - Float3::Y * 0.6, aligned.to_string(), COLOR_BOUNDING_BOX);

    if let Some(SdfNode::Box3d { transform, .. }) = active.node() {
        let placed = transform.translate(active.offset());
        overlay.outline(
            OutlineKind::OrientedBox,
            OutlineShape::Oriented(placed),
            0.0,
            COLOR_FIERY_ROSE,
        );
        overlay.outline(
            OutlineKind::OrientedBox,
            OutlineShape::Oriented(BoxTransform::new(placed.center, placed.size)),
            0.0,
            COLOR_FIERY_ROSE,
        );
        overlay.label(
            world_box.min - Float3::Y * 0.8,
            placed.bounding_box().to_string(),
            COLOR_FIERY_ROSE,
        );
    }

    if selected.is_none() {
        handle_markers(&mut overlay, &aligned, frame);
    }

    if let Some(root) = data.root_ref() {
        if let Some(root_box) = region_for(root) {
            voxel_markers(
                &mut overlay,
                root,
                &root_box,
                frame.camera,
                VoxelStyle::root(),
                false,
                config.max_voxel_cells,
            );
        }
    }
    voxel_markers(
        &mut overlay,
        active,
        &world_box,
        frame.camera,
        VoxelStyle::active(config),
        config.debug_distances,
        config.max_voxel_cells,
    );

    overlay.sort_markers();
    overlay
}

/// Distance labels at the 9 handle offsets around the target cell
fn target_distance_labels(overlay: &mut Overlay, node: NodeRef<'_>, target: BlockPos) {
    let origin = block_center(target);
    for handle in Interpolate::CORNERS_AND_CENTER {
        let offset = handle.t() - Float3::splat(0.5);
        let d = round_quarter(node.distance(origin + offset));
        let color = if d < 0.0 {
            FILL_COLORS[0]
        } else {
            FILL_COLORS[FILL_COLORS.len() - 1]
        };
        overlay.label(origin + offset * 1.3 - Float3::splat(0.15), d.to_string(), color);
    }
}

/// The 9 grab handles of the aligned box
fn handle_markers(overlay: &mut Overlay, aligned: &Bounds, frame: &FrameInput) {
    let targeted = frame.target.and_then(|t| aligned.corner_at_block(t));
    let pulse = blend_colors(frame.phase, COLOR_BOUNDING_BOX, COLOR_SELECTION);

    for corner in Interpolate::CORNERS_AND_CENTER {
        let at = aligned.get(corner);
        let pos = at.floor();
        let highlighted = targeted == Some(corner);
        let (color, alpha, line_color, line_alpha) = if highlighted {
            (COLOR_FIERY_ROSE, 0.5, COLOR_FIERY_ROSE, 0.8)
        } else {
            overlay.outline(
                OutlineKind::Handle,
                OutlineShape::Block(block_of(at)),
                HANDLE_DEFLATE,
                pulse,
            );
            (pulse, 0.8, COLOR_SELECTION, frame.phase)
        };
        overlay.markers.push(Marker {
            kind: MarkerKind::Handle {
                corner,
                highlighted,
            },
            pos,
            camera_distance_sq: pos.distance_squared(frame.camera),
            deflate: HANDLE_DEFLATE,
            color,
            alpha,
            outline_color: line_color,
            outline_alpha: line_alpha,
        });
        overlay.label(at, format!("[{:.2}, {:.2}, {:.2}]", at.x, at.y, at.z), COLOR_SELECTION);
    }
}

#[derive(Debug, Clone, Copy)]
struct VoxelStyle {
    kind: MarkerKind,
    deflate: f32,
    alpha: f32,
    outline_alpha: f32,
}

impl VoxelStyle {
    fn root() -> Self {
        VoxelStyle {
            kind: MarkerKind::RootVoxel,
            deflate: ROOT_DEFLATE,
            alpha: ROOT_ALPHA,
            outline_alpha: 0.0,
        }
    }

    fn active(config: &OverlayConfig) -> Self {
        VoxelStyle {
            kind: MarkerKind::ActiveVoxel,
            deflate: config.deflate,
            alpha: config.alpha,
            outline_alpha: ACTIVE_OUTLINE_ALPHA,
        }
    }
}

/// One marker per solid cell, plus distance labels when asked
fn voxel_markers(
    overlay: &mut Overlay,
    node: NodeRef<'_>,
    region: &Bounds,
    camera: Float3,
    style: VoxelStyle,
    debug_distances: bool,
    max_cells: usize,
) {
    let cells = region.lattice_cell_count();
    if cells > max_cells {
        warn!(
            "skipping {:?} voxels: {} cells in {} exceeds limit {}",
            style.kind, cells, region, max_cells
        );
        return;
    }

    let mut markers = Vec::new();
    let mut labels = Vec::new();
    let on_solid = |v: Voxel| {
        let pos = block_center(v.pos);
        markers.push(Marker {
            kind: style.kind,
            pos,
            camera_distance_sq: pos.distance_squared(camera),
            deflate: style.deflate,
            color: fill_color(v.material),
            alpha: style.alpha,
            outline_color: outline_color(v.material),
            outline_alpha: style.outline_alpha,
        });
    };
    let mut on_debug = |s: DebugSample| {
        let color = if s.distance < 0.0 {
            COLOR_FIERY_ROSE
        } else {
            COLOR_BLUE_JEANS
        };
        labels.push(Label {
            pos: block_center(s.pos),
            text: s.distance.to_string(),
            color,
        });
    };
    let debug: Option<&mut dyn FnMut(DebugSample)> = if debug_distances {
        Some(&mut on_debug)
    } else {
        None
    };
    evaluate(node, region, on_solid, debug);

    overlay.markers.extend(markers);
    overlay.labels.extend(labels);
}
