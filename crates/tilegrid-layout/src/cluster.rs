#![forbid(unsafe_code)]

//! Six-slot cluster geometry.
//!
//! Items are laid out in repeating blocks of six: one big square tile in the
//! top-left and five small square tiles wrapping around its right and bottom
//! edges.
//!
//! ```text
//! +-----------+ +---+
//! |           | | 1 |
//! |     0     | +---+
//! |           | +---+
//! |           | | 2 |
//! +-----------+ +---+
//! +---+ +---+   +---+
//! | 5 | | 4 |   | 3 |
//! +---+ +---+   +---+
//! ```
//!
//! # Invariants
//!
//! 1. `item % 6` alone selects the slot; frames are a pure function of the
//!    item number and the [`ClusterGeometry`].
//! 2. Block `k = item / 6` is the block-0 frame shifted down by
//!    `k * cluster_pitch`, so every block has identical shapes.
//! 3. A remainder outside `0..6` is an internal fault and panics.

use serde::{Deserialize, Serialize};
use tilegrid_core::geometry::{Point, Rect};

use crate::LayoutError;

/// Items per repeating block.
pub const SLOTS_PER_CLUSTER: usize = 6;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunable proportions of the cluster grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Gap between tiles and around the block (default: 15.0).
    pub spacing: f64,
    /// Small tile side as a fraction of the container width (default: 0.28).
    pub small_ratio: f64,
    /// Big tile side as a fraction of the container width (default: 0.6).
    pub big_ratio: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            spacing: 15.0,
            small_ratio: 0.28,
            big_ratio: 0.6,
        }
    }
}

impl ClusterConfig {
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_small_ratio(mut self, ratio: f64) -> Self {
        self.small_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_big_ratio(mut self, ratio: f64) -> Self {
        self.big_ratio = ratio;
        self
    }

    /// Check every field is finite and in range.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(LayoutError::InvalidConfig {
                field: "spacing",
                value: self.spacing,
            });
        }
        for (field, value) in [
            ("small_ratio", self.small_ratio),
            ("big_ratio", self.big_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Position of an item inside its six-item block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Slot 0: the big tile.
    Big,
    /// Slot 1: right column, top.
    RightTop,
    /// Slot 2: right column, middle.
    RightMiddle,
    /// Slot 3: bottom row, right.
    BottomRight,
    /// Slot 4: bottom row, centre.
    BottomCenter,
    /// Slot 5: bottom row, left.
    BottomLeft,
}

impl Slot {
    /// All slots in item order.
    pub const ALL: [Slot; SLOTS_PER_CLUSTER] = [
        Slot::Big,
        Slot::RightTop,
        Slot::RightMiddle,
        Slot::BottomRight,
        Slot::BottomCenter,
        Slot::BottomLeft,
    ];

    /// Slot for a flat item number.
    #[inline]
    #[must_use]
    pub fn of(item: usize) -> Slot {
        Self::from_remainder(item % SLOTS_PER_CLUSTER)
    }

    /// Slot for a remainder in `0..6`.
    ///
    /// # Panics
    ///
    /// Panics for any other remainder. Callers derive the remainder with
    /// `% 6`, so reaching the panic means the slot table is corrupt.
    #[must_use]
    pub fn from_remainder(remainder: usize) -> Slot {
        match remainder {
            0 => Slot::Big,
            1 => Slot::RightTop,
            2 => Slot::RightMiddle,
            3 => Slot::BottomRight,
            4 => Slot::BottomCenter,
            5 => Slot::BottomLeft,
            _ => panic!("cluster slot remainder {remainder} is outside 0..{SLOTS_PER_CLUSTER}"),
        }
    }

    /// Position within the block, `0..6`.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_big(self) -> bool {
        matches!(self, Slot::Big)
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Tile sizes derived from one container width.
///
/// Recompute it whenever the width changes (rotation, resize).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterGeometry {
    pub width: f64,
    pub spacing: f64,
    pub small_side: f64,
    pub big_side: f64,
}

impl ClusterGeometry {
    /// Derive tile sizes for `width`.
    pub fn new(width: f64, config: &ClusterConfig) -> Result<Self, LayoutError> {
        if !width.is_finite() || width < 0.0 {
            return Err(LayoutError::InvalidWidth(width));
        }
        Ok(Self::for_width(width, config))
    }

    /// Geometry for a zero-width container. Every tile collapses to a point
    /// on the spacing grid.
    #[must_use]
    pub fn empty(config: &ClusterConfig) -> Self {
        Self::for_width(0.0, config)
    }

    fn for_width(width: f64, config: &ClusterConfig) -> Self {
        Self {
            width,
            spacing: config.spacing,
            small_side: config.small_ratio * width,
            big_side: config.big_ratio * width,
        }
    }

    /// Vertical distance between consecutive blocks: the bottom edge of the
    /// small-tile row.
    #[must_use]
    pub fn cluster_pitch(&self) -> f64 {
        3.0 * self.small_side + 3.0 * self.spacing
    }

    /// Frame of `slot` in block 0.
    #[must_use]
    pub fn slot_frame(&self, slot: Slot) -> Rect {
        let s = self.spacing;
        let small = self.small_side;
        let big = self.big_side;
        let right_column = big + 2.0 * s;
        let bottom_row = 2.0 * small + 3.0 * s;

        match slot {
            Slot::Big => Rect::new(s, s, big, big),
            Slot::RightTop => Rect::new(right_column, s, small, small),
            Slot::RightMiddle => Rect::new(right_column, small + 2.0 * s, small, small),
            Slot::BottomRight => Rect::new(right_column, bottom_row, small, small),
            Slot::BottomCenter => Rect::new(small + 2.0 * s, bottom_row, small, small),
            Slot::BottomLeft => Rect::new(s, bottom_row, small, small),
        }
    }

    /// Frame for a flat item number.
    #[must_use]
    pub fn frame_for(&self, item: usize) -> Rect {
        let block = item / SLOTS_PER_CLUSTER;
        let offset = Point::new(0.0, block as f64 * self.cluster_pitch());
        self.slot_frame(Slot::of(item)).translate(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(width: f64) -> ClusterGeometry {
        ClusterGeometry::new(width, &ClusterConfig::default()).expect("valid width")
    }

    #[test]
    fn default_config_values() {
        let cfg = ClusterConfig::default();
        assert_eq!(cfg.spacing, 15.0);
        assert_eq!(cfg.small_ratio, 0.28);
        assert_eq!(cfg.big_ratio, 0.6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_rejects_bad_fields() {
        let bad_spacing = ClusterConfig::default().with_spacing(-1.0);
        assert_eq!(
            bad_spacing.validate(),
            Err(LayoutError::InvalidConfig {
                field: "spacing",
                value: -1.0
            })
        );
        assert!(ClusterConfig::default().with_small_ratio(0.0).validate().is_err());
        assert!(ClusterConfig::default().with_big_ratio(1.5).validate().is_err());
        assert!(ClusterConfig::default().with_big_ratio(f64::NAN).validate().is_err());
    }

    #[test]
    fn geometry_sizes_track_width() {
        let g = geometry(250.0);
        assert_eq!(g.small_side, 0.28 * 250.0);
        assert_eq!(g.big_side, 0.6 * 250.0);
        assert_eq!(g.spacing, 15.0);
    }

    #[test]
    fn geometry_rejects_invalid_width() {
        let cfg = ClusterConfig::default();
        assert_eq!(
            ClusterGeometry::new(-1.0, &cfg),
            Err(LayoutError::InvalidWidth(-1.0))
        );
        assert!(ClusterGeometry::new(f64::NAN, &cfg).is_err());
        assert_eq!(ClusterGeometry::empty(&cfg).big_side, 0.0);
    }

    #[test]
    fn slot_table_matches_ordinals() {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(Slot::from_remainder(i), *slot);
            assert_eq!(slot.ordinal(), i);
        }
        assert!(Slot::Big.is_big());
        assert!(!Slot::BottomLeft.is_big());
    }

    #[test]
    #[should_panic(expected = "cluster slot remainder 6")]
    fn out_of_range_remainder_panics() {
        let _ = Slot::from_remainder(6);
    }

    #[test]
    fn slot_of_wraps_every_six() {
        assert_eq!(Slot::of(0), Slot::Big);
        assert_eq!(Slot::of(5), Slot::BottomLeft);
        assert_eq!(Slot::of(6), Slot::Big);
        assert_eq!(Slot::of(13), Slot::RightTop);
    }

    #[test]
    fn small_tiles_share_size() {
        let g = geometry(320.0);
        for slot in &Slot::ALL[1..] {
            let frame = g.slot_frame(*slot);
            assert_eq!(frame.width, g.small_side);
            assert_eq!(frame.height, g.small_side);
        }
    }

    #[test]
    fn block_zero_tiles_do_not_overlap() {
        let g = geometry(375.0);
        for (i, a) in Slot::ALL.iter().enumerate() {
            for b in &Slot::ALL[i + 1..] {
                assert!(
                    !g.slot_frame(*a).intersects(&g.slot_frame(*b)),
                    "{a:?} overlaps {b:?}"
                );
            }
        }
    }

    #[test]
    fn pitch_is_bottom_of_small_row() {
        let g = geometry(250.0);
        assert_eq!(g.cluster_pitch(), g.slot_frame(Slot::BottomRight).max_y());
    }

    #[test]
    fn frame_for_shifts_whole_blocks() {
        let g = geometry(250.0);
        let first = g.frame_for(2);
        let second = g.frame_for(8);
        assert_eq!(second.x, first.x);
        assert_eq!(second.size(), first.size());
        assert_eq!(second.y, first.y + g.cluster_pitch());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: ClusterConfig = serde_json::from_str(r#"{ "spacing": 8.0 }"#).expect("parse");
        assert_eq!(cfg.spacing, 8.0);
        assert_eq!(cfg.small_ratio, 0.28);
        assert_eq!(cfg.big_ratio, 0.6);
    }
}
