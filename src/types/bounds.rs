//! Axis-aligned bounds in world (block) space
//!
//! Coordinates are `f64` so that half-block offsets stay exact far from the
//! world origin. Lattice cells are integer positions; a box `min..=max`
//! covers every cell whose coordinates lie inside it.

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use super::Interpolate;

/// 3-component world-space vector
pub type Float3 = DVec3;

/// Integer lattice cell (block position)
pub type BlockPos = IVec3;

/// Tolerance for treating two positions as the same handle
pub const POSITION_EPSILON: f64 = 1e-6;

/// Lattice cell containing `p`
#[inline]
pub fn block_of(p: Float3) -> BlockPos {
    p.floor().as_ivec3()
}

/// World position of a lattice cell
#[inline]
pub fn block_center(b: BlockPos) -> Float3 {
    b.as_dvec3()
}

/// Axis-aligned bounding box
///
/// Always normalized: `min <= max` on every axis. Constructors that take two
/// arbitrary points sort them per axis instead of rejecting inverted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: Float3,
    /// Maximum corner
    pub max: Float3,
}

impl Bounds {
    /// Box spanned by two arbitrary points
    #[inline]
    pub fn new(a: Float3, b: Float3) -> Self {
        Bounds {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Zero-size box at a single point
    #[inline]
    pub fn from_point(p: Float3) -> Self {
        Bounds { min: p, max: p }
    }

    /// Zero-size box at a lattice cell
    #[inline]
    pub fn from_block(b: BlockPos) -> Self {
        Self::from_point(block_center(b))
    }

    /// Create from center and full size
    pub fn from_center_size(center: Float3, size: Float3) -> Self {
        let half = size.abs() * 0.5;
        Bounds {
            min: center - half,
            max: center + half,
        }
    }

    /// Get center point
    #[inline]
    pub fn center(&self) -> Float3 {
        (self.min + self.max) * 0.5
    }

    /// Get size
    #[inline]
    pub fn size(&self) -> Float3 {
        self.max - self.min
    }

    /// Get half-extents
    #[inline]
    pub fn half_extents(&self) -> Float3 {
        self.size() * 0.5
    }

    /// Check if point is inside (inclusive)
    pub fn contains(&self, point: Float3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Grow to include a point
    pub fn encapsulate(&self, point: Float3) -> Bounds {
        Bounds {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Overlap of both boxes, `None` if they are disjoint
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.cmple(max).all() {
            Some(Bounds { min, max })
        } else {
            None
        }
    }

    /// Shrink so that the lattice point `point` is no longer covered
    ///
    /// The face nearest to the point moves to one block past it. Ties prefer
    /// the min side, then x over y over z. A point outside the box leaves it
    /// unchanged. Returns `None` when the box has nothing left.
    pub fn shrink(&self, point: Float3) -> Option<Bounds> {
        if !self.contains(point) {
            return Some(*self);
        }

        let to_min = point - self.min;
        let to_max = self.max - point;

        let mut best_axis = 0;
        let mut best_max_side = false;
        let mut best = f64::INFINITY;
        for axis in 0..3 {
            if to_min[axis] < best {
                best = to_min[axis];
                best_axis = axis;
                best_max_side = false;
            }
            if to_max[axis] < best {
                best = to_max[axis];
                best_axis = axis;
                best_max_side = true;
            }
        }

        let mut result = *self;
        if best_max_side {
            result.max[best_axis] = point[best_axis] - 1.0;
        } else {
            result.min[best_axis] = point[best_axis] + 1.0;
        }

        if result.min[best_axis] > result.max[best_axis] {
            None
        } else {
            Some(result)
        }
    }

    /// Snap outward to the integer lattice
    ///
    /// Idempotent: aligned boxes are returned unchanged.
    pub fn block_aligned(&self) -> Bounds {
        Bounds {
            min: self.min.floor(),
            max: self.max.ceil(),
        }
    }

    /// Position of a corner or the center
    #[inline]
    pub fn get(&self, position: Interpolate) -> Float3 {
        self.min + self.size() * position.t()
    }

    /// All 9 handle positions in [`Interpolate::CORNERS_AND_CENTER`] order
    pub fn corners(&self) -> [Float3; 9] {
        Interpolate::CORNERS_AND_CENTER.map(|i| self.get(i))
    }

    /// Which handle (if any) sits exactly at `point`
    ///
    /// For degenerate boxes several handles coincide; the lowest index wins.
    pub fn is_corner_or_center(&self, point: Float3) -> Option<Interpolate> {
        Interpolate::CORNERS_AND_CENTER.into_iter().find(|&i| {
            (self.get(i) - point)
                .abs()
                .cmple(Float3::splat(POSITION_EPSILON))
                .all()
        })
    }

    /// Which handle (if any) falls into the lattice cell `block`
    pub fn corner_at_block(&self, block: BlockPos) -> Option<Interpolate> {
        Interpolate::CORNERS_AND_CENTER
            .into_iter()
            .find(|&i| block_of(self.get(i)) == block)
    }

    /// Translate by `offset`
    #[inline]
    pub fn translate(&self, offset: Float3) -> Bounds {
        Bounds {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Translate so the center lands on `target`
    pub fn move_to_center(&self, target: Float3) -> Bounds {
        self.translate(target - self.center())
    }

    /// Box after dragging one handle to `target`
    ///
    /// Dragging the center moves the whole box. Dragging a corner keeps the
    /// opposite corner fixed; the result is re-normalized when the drag
    /// crosses the fixed corner on some axis.
    pub fn dragged(&self, handle: Interpolate, target: Float3) -> Bounds {
        match handle.opposite() {
            None => self.move_to_center(target),
            Some(opposite) => Bounds::new(self.get(opposite), target),
        }
    }

    /// Squared distance from the box center to `point`
    #[inline]
    pub fn distance_squared_to_center(&self, point: Float3) -> f64 {
        self.center().distance_squared(point)
    }

    /// Number of lattice cells covered (inclusive on both ends)
    pub fn lattice_cell_count(&self) -> usize {
        let lo = self.min.ceil();
        let hi = self.max.floor();
        let n = (hi - lo + Float3::ONE).max(Float3::ZERO);
        (n.x * n.y * n.z) as usize
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}] - [{:.2}, {:.2}, {:.2}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Bounds {
        Bounds::new(Float3::ZERO, Float3::splat(2.0))
    }

    #[test]
    fn test_new_normalizes() {
        let b = Bounds::new(Float3::new(3.0, -1.0, 5.0), Float3::new(1.0, 2.0, -5.0));
        assert_eq!(b.min, Float3::new(1.0, -1.0, -5.0));
        assert_eq!(b.max, Float3::new(3.0, 2.0, 5.0));
    }

    #[test]
    fn test_encapsulate() {
        let b = Bounds::from_point(Float3::ZERO).encapsulate(Float3::new(2.0, -1.0, 3.0));
        assert_eq!(b.min, Float3::new(0.0, -1.0, 0.0));
        assert_eq!(b.max, Float3::new(2.0, 0.0, 3.0));
        assert!(b.contains(Float3::new(1.0, -0.5, 1.0)));
    }

    #[test]
    fn test_intersection() {
        let a = unit_box();
        let b = Bounds::new(Float3::splat(1.0), Float3::splat(4.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, Float3::splat(1.0));
        assert_eq!(i.max, Float3::splat(2.0));

        let far = Bounds::new(Float3::splat(10.0), Float3::splat(11.0));
        assert!(a.intersection(&far).is_none());
    }

    #[test]
    fn test_block_aligned_idempotent() {
        let b = Bounds::new(Float3::new(-0.3, 1.2, 4.0), Float3::new(2.5, 1.7, 6.01));
        let once = b.block_aligned();
        assert_eq!(once.min, Float3::new(-1.0, 1.0, 4.0));
        assert_eq!(once.max, Float3::new(3.0, 2.0, 7.0));
        assert_eq!(once.block_aligned(), once);
    }

    #[test]
    fn test_get_and_is_corner_roundtrip() {
        let b = Bounds::new(Float3::new(-1.0, 2.0, 0.5), Float3::new(3.0, 5.0, 4.0));
        for pos in Interpolate::CORNERS_AND_CENTER {
            assert_eq!(b.is_corner_or_center(b.get(pos)), Some(pos));
        }
        assert_eq!(b.is_corner_or_center(Float3::new(0.0, 3.0, 1.0)), None);
    }

    #[test]
    fn test_corner_at_block() {
        let b = Bounds::new(Float3::ZERO, Float3::splat(4.0));
        assert_eq!(
            b.corner_at_block(IVec3::new(4, 4, 4)),
            Some(Interpolate::MaxMaxMax)
        );
        assert_eq!(
            b.corner_at_block(IVec3::new(2, 2, 2)),
            Some(Interpolate::Center)
        );
        assert_eq!(b.corner_at_block(IVec3::new(1, 2, 3)), None);
    }

    #[test]
    fn test_dragged_corner() {
        let b = unit_box();
        let d = b.dragged(Interpolate::MaxMaxMax, Float3::splat(5.0));
        assert_eq!(d.min, Float3::ZERO);
        assert_eq!(d.max, Float3::splat(5.0));
    }

    #[test]
    fn test_dragged_across_fixed_corner() {
        let b = unit_box();
        let d = b.dragged(Interpolate::MaxMaxMax, Float3::new(-3.0, 5.0, 1.0));
        assert_eq!(d.min, Float3::new(-3.0, 0.0, 0.0));
        assert_eq!(d.max, Float3::new(0.0, 5.0, 1.0));
    }

    #[test]
    fn test_dragged_center_moves() {
        let b = unit_box();
        let d = b.dragged(Interpolate::Center, Float3::new(10.0, 0.0, 0.0));
        assert_eq!(d.center(), Float3::new(10.0, 0.0, 0.0));
        assert_eq!(d.size(), b.size());
    }

    #[test]
    fn test_shrink_removes_face() {
        let b = Bounds::new(Float3::ZERO, Float3::new(4.0, 2.0, 2.0));
        let s = b.shrink(Float3::new(4.0, 1.0, 1.0)).unwrap();
        assert_eq!(s.max.x, 3.0);
        assert_eq!(s.min, b.min);
        assert!(!s.contains(Float3::new(4.0, 1.0, 1.0)));
    }

    #[test]
    fn test_shrink_prefers_min_side_on_tie() {
        let b = Bounds::new(Float3::ZERO, Float3::splat(2.0));
        let s = b.shrink(Float3::splat(1.0)).unwrap();
        assert_eq!(s.min.x, 2.0);
        assert_eq!(s.max, b.max);
    }

    #[test]
    fn test_shrink_outside_is_noop() {
        let b = unit_box();
        assert_eq!(b.shrink(Float3::splat(9.0)), Some(b));
    }

    #[test]
    fn test_shrink_last_cell_vanishes() {
        let b = Bounds::from_point(Float3::splat(3.0));
        assert!(b.shrink(Float3::splat(3.0)).is_none());
    }

    #[test]
    fn test_lattice_cell_count() {
        assert_eq!(unit_box().lattice_cell_count(), 27);
        let b = Bounds::new(Float3::splat(0.2), Float3::splat(0.8));
        assert_eq!(b.lattice_cell_count(), 0);
    }
}
