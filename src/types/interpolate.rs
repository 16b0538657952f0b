//! Named reference positions on a box: 8 corners plus the center

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One of the 9 canonical handles of a [`Bounds`](super::Bounds).
///
/// Corner names read `X_Y_Z`, each axis either at the box minimum or maximum.
/// The index packs the axes as bits (`x + 2*y + 4*z`, bit set = MAX), so the
/// diagonal opposite of a corner is `index ^ 7`. CENTER has index 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolate {
    /// (min.x, min.y, min.z)
    MinMinMin,
    /// (max.x, min.y, min.z)
    MaxMinMin,
    /// (min.x, max.y, min.z)
    MinMaxMin,
    /// (max.x, max.y, min.z)
    MaxMaxMin,
    /// (min.x, min.y, max.z)
    MinMinMax,
    /// (max.x, min.y, max.z)
    MaxMinMax,
    /// (min.x, max.y, max.z)
    MinMaxMax,
    /// (max.x, max.y, max.z)
    MaxMaxMax,
    /// Box center
    Center,
}

impl Interpolate {
    /// The 8 corners in index order
    pub const CORNERS: [Interpolate; 8] = [
        Interpolate::MinMinMin,
        Interpolate::MaxMinMin,
        Interpolate::MinMaxMin,
        Interpolate::MaxMaxMin,
        Interpolate::MinMinMax,
        Interpolate::MaxMinMax,
        Interpolate::MinMaxMax,
        Interpolate::MaxMaxMax,
    ];

    /// The 8 corners followed by the center, in index order
    pub const CORNERS_AND_CENTER: [Interpolate; 9] = [
        Interpolate::MinMinMin,
        Interpolate::MaxMinMin,
        Interpolate::MinMaxMin,
        Interpolate::MaxMaxMin,
        Interpolate::MinMinMax,
        Interpolate::MaxMinMax,
        Interpolate::MinMaxMax,
        Interpolate::MaxMaxMax,
        Interpolate::Center,
    ];

    /// Stable index (0..=7 corners, 8 center)
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Interpolate::MinMinMin => 0,
            Interpolate::MaxMinMin => 1,
            Interpolate::MinMaxMin => 2,
            Interpolate::MaxMaxMin => 3,
            Interpolate::MinMinMax => 4,
            Interpolate::MaxMinMax => 5,
            Interpolate::MinMaxMax => 6,
            Interpolate::MaxMaxMax => 7,
            Interpolate::Center => 8,
        }
    }

    /// Inverse of [`index`](Self::index)
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::CORNERS_AND_CENTER.get(index as usize).copied()
    }

    /// Per-axis blend factor between `min` (0) and `max` (1)
    #[inline]
    pub fn t(self) -> DVec3 {
        match self {
            Interpolate::Center => DVec3::splat(0.5),
            corner => {
                let i = corner.index();
                DVec3::new(
                    (i & 1) as f64,
                    ((i >> 1) & 1) as f64,
                    ((i >> 2) & 1) as f64,
                )
            }
        }
    }

    /// Diagonally opposite corner, `None` for the center
    #[inline]
    pub fn opposite(self) -> Option<Self> {
        match self {
            Interpolate::Center => None,
            corner => Self::from_index(corner.index() ^ 7),
        }
    }

    /// Whether this is the center handle
    #[inline]
    pub fn is_center(self) -> bool {
        self == Interpolate::Center
    }

    /// Corner whose per-axis side matches `max_side` (true = MAX)
    pub fn corner_from_sides(max_side: [bool; 3]) -> Self {
        let index = max_side[0] as u8 | (max_side[1] as u8) << 1 | (max_side[2] as u8) << 2;
        Self::CORNERS[index as usize]
    }
}

impl std::fmt::Display for Interpolate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Interpolate::MinMinMin => "MIN_MIN_MIN",
            Interpolate::MaxMinMin => "MAX_MIN_MIN",
            Interpolate::MinMaxMin => "MIN_MAX_MIN",
            Interpolate::MaxMaxMin => "MAX_MAX_MIN",
            Interpolate::MinMinMax => "MIN_MIN_MAX",
            Interpolate::MaxMinMax => "MAX_MIN_MAX",
            Interpolate::MinMaxMax => "MIN_MAX_MAX",
            Interpolate::MaxMaxMax => "MAX_MAX_MAX",
            Interpolate::Center => "CENTER",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for pos in Interpolate::CORNERS_AND_CENTER {
            assert_eq!(Interpolate::from_index(pos.index()), Some(pos));
        }
        assert_eq!(Interpolate::from_index(9), None);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(
            Interpolate::MinMinMin.opposite(),
            Some(Interpolate::MaxMaxMax)
        );
        assert_eq!(
            Interpolate::MaxMinMax.opposite(),
            Some(Interpolate::MinMaxMin)
        );
        assert_eq!(Interpolate::Center.opposite(), None);
        for corner in Interpolate::CORNERS {
            assert_eq!(corner.opposite().and_then(Interpolate::opposite), Some(corner));
        }
    }

    #[test]
    fn test_t_values() {
        assert_eq!(Interpolate::MinMinMin.t(), DVec3::ZERO);
        assert_eq!(Interpolate::MaxMaxMax.t(), DVec3::ONE);
        assert_eq!(Interpolate::MaxMinMax.t(), DVec3::new(1.0, 0.0, 1.0));
        assert_eq!(Interpolate::Center.t(), DVec3::splat(0.5));
    }

    #[test]
    fn test_corner_from_sides() {
        assert_eq!(
            Interpolate::corner_from_sides([true, false, true]),
            Interpolate::MaxMinMax
        );
        assert_eq!(
            Interpolate::corner_from_sides([false, false, false]),
            Interpolate::MinMinMin
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Interpolate::MaxMaxMin.to_string(), "MAX_MAX_MIN");
        assert_eq!(Interpolate::Center.to_string(), "CENTER");
    }
}
