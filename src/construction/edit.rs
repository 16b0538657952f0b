//! Handle selection and drag state machine
//!
//! Two states: nothing selected, or one handle (8 corners or the center)
//! selected. A selected handle follows the target cell on every hover or
//! select tick until released.

use log::debug;

use super::ConstructionData;
use crate::types::{block_center, BlockPos, Bounds, Float3, Interpolate};

/// What the user is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    /// Pointing, no button
    Hover,
    /// Use button pressed or held
    Select,
    /// Use button released
    Release,
}

/// One tick of edit input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditInput {
    /// Pointed-at lattice cell in world space
    pub target: Option<BlockPos>,
    /// Position of whoever edits, used for the reach check
    pub requester: Float3,
    /// Button state
    pub action: EditAction,
}

impl EditInput {
    /// Input with a target
    pub fn at(target: BlockPos, requester: Float3, action: EditAction) -> Self {
        EditInput {
            target: Some(target),
            requester,
            action,
        }
    }
}

/// Selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditState {
    /// No handle selected
    NoSelection,
    /// Handle being dragged
    CornerSelected(Interpolate),
}

/// Result of [`ConstructionData::apply_edit`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// No box to edit
    NoShape,
    /// Requester too far away, nothing changed
    OutOfReach,
    /// A handle was picked up
    Selected(Interpolate),
    /// Nothing to do this tick
    Idle(EditState),
    /// Selection cleared
    Released,
    /// The box followed the selected handle
    Dragged {
        /// New working box
        bounds: Bounds,
        /// Handle now under the target
        corner: Interpolate,
        /// Whether the active node was reshaped to the box
        reshaped: bool,
    },
}

impl ConstructionData<'_> {
    /// Advance the edit state machine by one tick
    pub fn apply_edit(&mut self, input: &EditInput) -> EditOutcome {
        let Some(bounds) = self.working_bounds() else {
            return EditOutcome::NoShape;
        };

        if !self.in_reach(input.requester) {
            debug!(
                "edit rejected: requester {} is {:.1} blocks from {}",
                input.requester,
                bounds.distance_squared_to_center(input.requester).sqrt(),
                bounds.center()
            );
            return EditOutcome::OutOfReach;
        }

        match (self.state(), input.action, input.target) {
            (_, EditAction::Release, _) => {
                if self.selected_corner().is_some() {
                    debug!("handle released");
                    self.set_selected_corner(None);
                }
                EditOutcome::Released
            }
            (EditState::NoSelection, EditAction::Select, Some(target)) => {
                match bounds.block_aligned().corner_at_block(target) {
                    Some(corner) => {
                        debug!("selected handle {} at {}", corner, target);
                        self.set_selected_corner(Some(corner));
                        EditOutcome::Selected(corner)
                    }
                    None => EditOutcome::Idle(EditState::NoSelection),
                }
            }
            (EditState::CornerSelected(corner), _, Some(target)) => {
                self.drag(bounds, corner, block_center(target))
            }
            (state, _, _) => EditOutcome::Idle(state),
        }
    }

    fn drag(&mut self, bounds: Bounds, corner: Interpolate, target: Float3) -> EditOutcome {
        let candidate = bounds.dragged(corner, target);
        self.set_bounding_box(Some(candidate));
        let reshaped = self.reshape_active(&candidate);

        // After crossing the fixed corner the target sits on a different
        // corner of the box the next tick starts from; keep following it
        // from there. A box that did not change keeps its labels.
        let next = self.working_bounds().filter(|b| *b != bounds);
        let followed = match next {
            Some(next) if !corner.is_center() => next
                .is_corner_or_center(target)
                .filter(|c| !c.is_center())
                .unwrap_or(corner),
            _ => corner,
        };
        if followed != corner {
            debug!("handle {} became {}", corner, followed);
            self.set_selected_corner(Some(followed));
        }

        debug!("dragged {} to {}, box {}", followed, target, candidate);
        EditOutcome::Dragged {
            bounds: candidate,
            corner: followed,
            reshaped,
        }
    }

    /// Fit the active node to a world-space box, if it can be resized
    fn reshape_active(&mut self, world: &Bounds) -> bool {
        let Some(id) = self.active_node() else {
            return false;
        };
        let Some(mut graph) = self.graph().cloned() else {
            return false;
        };
        let local = world.translate(-self.center().unwrap_or(Float3::ZERO));
        if !graph.set_from_bounding_box(id, &local) {
            return false;
        }
        self.set_graph(Some(graph));
        true
    }
}
