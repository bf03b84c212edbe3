#![forbid(unsafe_code)]

//! Layout primitives and the six-slot cluster engine.
//!
//! # Role in tilegrid
//! `tilegrid-layout` maps item indices to frames. It knows nothing about
//! gestures or drag state: the reorder controller queries it, and hosts plug
//! it into their container through [`LayoutStrategy`].
//!
//! # Modules
//! - [`cluster`]: configuration, slot table and per-width geometry.
//! - [`engine`]: [`ClusterLayout`], the cached engine.
//! - [`hit_regions`]: edge strips used for auto-scroll signalling.

pub mod cluster;
pub mod engine;
mod error;
pub mod hit_regions;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cluster::{ClusterConfig, ClusterGeometry, SLOTS_PER_CLUSTER, Slot};
pub use engine::ClusterLayout;
pub use error::LayoutError;
pub use hit_regions::{EDGE_THICKNESS, Edges, HitRegions};
pub use tilegrid_core::geometry::{Point, Rect, Size};

/// Position of an item in the container: `(section, item)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ItemIndex {
    pub section: usize,
    pub item: usize,
}

impl ItemIndex {
    #[inline]
    #[must_use]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Item in section 0.
    #[inline]
    #[must_use]
    pub const fn item(item: usize) -> Self {
        Self::new(0, item)
    }

    /// Slot this item occupies within its block.
    #[must_use]
    pub fn slot(self) -> Slot {
        Slot::of(self.item)
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// Geometry of one item. Produced fresh per query and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutAttributes {
    pub index: ItemIndex,
    pub frame: Rect,
}

impl LayoutAttributes {
    #[inline]
    #[must_use]
    pub const fn new(index: ItemIndex, frame: Rect) -> Self {
        Self { index, frame }
    }
}

/// The pluggable layout a container consults.
///
/// `prepare` runs once per layout pass, before any query. Rect and point
/// queries answer from whatever `prepare` last produced.
pub trait LayoutStrategy {
    /// Recompute everything for the container width and per-section counts.
    fn prepare(&mut self, container_width: f64, section_counts: &[usize]);

    /// Scrollable content size for a container of `container_width`.
    fn content_size(&self, container_width: f64) -> Size;

    /// Attributes for a single item.
    fn attributes_for(&self, index: ItemIndex) -> LayoutAttributes;

    /// Attributes of every item fully inside `rect`.
    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes>;

    /// Item whose frame contains `point`, if any.
    fn item_at_point(&self, point: Point) -> Option<ItemIndex>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_index_ordering_and_display() {
        assert!(ItemIndex::new(0, 9) < ItemIndex::new(1, 0));
        assert_eq!(ItemIndex::item(4), ItemIndex::new(0, 4));
        assert_eq!(ItemIndex::new(2, 7).to_string(), "[2, 7]");
    }

    #[test]
    fn item_index_slot() {
        assert_eq!(ItemIndex::item(6).slot(), Slot::Big);
        assert_eq!(ItemIndex::new(3, 11).slot(), Slot::BottomLeft);
    }

    #[test]
    fn attributes_serialize_as_plain_fields() {
        let attrs = LayoutAttributes::new(ItemIndex::item(1), Rect::new(1.0, 2.0, 3.0, 4.0));
        let json = serde_json::to_string(&attrs).expect("serialize");
        assert_eq!(
            json,
            r#"{"index":{"section":0,"item":1},"frame":{"x":1.0,"y":2.0,"width":3.0,"height":4.0}}"#
        );
    }
}
