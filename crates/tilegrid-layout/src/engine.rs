#![forbid(unsafe_code)]

//! Cached cluster layout engine.
//!
//! [`ClusterLayout`] answers per-index geometry directly from the
//! [`ClusterGeometry`], and answers spatial queries from a cached attribute
//! list.
//!
//! # Invalidation
//!
//! The cache is rebuilt wholesale by [`ClusterLayout::rebuild_all`] (or
//! [`ClusterLayout::rebuild_sections`]) and is read-only in between. Callers
//! must rebuild after any change to item count or container width before
//! serving rect or point queries; the engine never recomputes lazily.
//!
//! ```
//! use tilegrid_core::geometry::Rect;
//! use tilegrid_layout::{ClusterLayout, ItemIndex};
//!
//! let mut layout = ClusterLayout::new();
//! layout.rebuild_all(250.0, 12);
//!
//! let big = layout.attributes_for(ItemIndex::item(0));
//! assert_eq!(big.frame, Rect::new(15.0, 15.0, 150.0, 150.0));
//! assert_eq!(layout.attributes_in_rect(big.frame).len(), 1);
//! ```

use tilegrid_core::geometry::{Point, Rect, Size};

use crate::cluster::{ClusterConfig, ClusterGeometry, SLOTS_PER_CLUSTER, Slot};
use crate::{ItemIndex, LayoutAttributes, LayoutError, LayoutStrategy};

/// The six-slot cluster layout with an explicit attribute cache.
#[derive(Debug, Clone)]
pub struct ClusterLayout {
    config: ClusterConfig,
    geometry: ClusterGeometry,
    section_counts: Vec<usize>,
    cache: Vec<LayoutAttributes>,
    generation: u64,
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterLayout {
    /// Layout with the default proportions and an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let config = ClusterConfig::default();
        Self {
            config,
            geometry: ClusterGeometry::empty(&config),
            section_counts: Vec::new(),
            cache: Vec::new(),
            generation: 0,
        }
    }

    /// Layout with custom proportions.
    pub fn with_config(config: ClusterConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            config,
            geometry: ClusterGeometry::empty(&config),
            ..Self::new()
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Swap proportions and rebuild the cache for the current width and counts.
    pub fn set_config(&mut self, config: ClusterConfig) -> Result<(), LayoutError> {
        config.validate()?;
        self.config = config;
        let counts = std::mem::take(&mut self.section_counts);
        self.rebuild_sections(self.geometry.width, &counts);
        Ok(())
    }

    /// Geometry from the most recent rebuild.
    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &ClusterGeometry {
        &self.geometry
    }

    /// Bumped on every rebuild.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cached attributes in section-then-item order.
    #[inline]
    #[must_use]
    pub fn cached(&self) -> &[LayoutAttributes] {
        &self.cache
    }

    /// Item counts captured by the most recent rebuild.
    #[inline]
    #[must_use]
    pub fn section_counts(&self) -> &[usize] {
        &self.section_counts
    }

    /// Content size for a container of `container_width`.
    ///
    /// Always a square of the container width; the container height and the
    /// number of blocks do not enter into it.
    #[must_use]
    pub fn content_size(&self, container_width: f64) -> Size {
        Size::square(container_width)
    }

    /// Attributes for one item, computed from the current geometry.
    ///
    /// Pure: the cache is not consulted, and repeated calls return identical
    /// frames until the next rebuild changes the geometry.
    #[must_use]
    pub fn attributes_for(&self, index: ItemIndex) -> LayoutAttributes {
        LayoutAttributes::new(index, self.geometry.frame_for(index.item))
    }

    /// Every cached item whose frame lies fully inside `rect`.
    ///
    /// Items that only partially overlap `rect` are excluded.
    #[must_use]
    pub fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        self.cache
            .iter()
            .filter(|attrs| rect.contains_rect(&attrs.frame))
            .copied()
            .collect()
    }

    /// First cached item whose frame contains `point`.
    #[must_use]
    pub fn item_at_point(&self, point: Point) -> Option<ItemIndex> {
        self.cache
            .iter()
            .find(|attrs| attrs.frame.contains_point(point))
            .map(|attrs| attrs.index)
    }

    /// Frames of the first block, for hosts that paint slot placeholders
    /// behind the items.
    #[must_use]
    pub fn placeholder_frames(&self) -> [Rect; SLOTS_PER_CLUSTER] {
        Slot::ALL.map(|slot| self.geometry.slot_frame(slot))
    }

    /// Recompute geometry for `container_width` and cache `item_count` items
    /// in a single section.
    pub fn rebuild_all(&mut self, container_width: f64, item_count: usize) {
        self.rebuild_sections(container_width, &[item_count]);
    }

    /// Recompute geometry and cache every item of every section.
    ///
    /// Frames depend only on the item number, so items of different sections
    /// share positions; multi-section hosts get overlapping blocks.
    pub fn rebuild_sections(&mut self, container_width: f64, section_counts: &[usize]) {
        let total: usize = section_counts.iter().sum();
        let span = tilegrid_core::debug_span!(
            "tilegrid.layout.rebuild",
            width = container_width,
            sections = section_counts.len(),
            items = total
        );
        let _guard = span.enter();

        self.geometry = match ClusterGeometry::new(container_width, &self.config) {
            Ok(geometry) => geometry,
            Err(_) => {
                tilegrid_core::warn!(
                    width = container_width,
                    "invalid container width, collapsing layout to zero width"
                );
                ClusterGeometry::empty(&self.config)
            }
        };

        self.cache.clear();
        self.cache.reserve(total);
        for (section, &count) in section_counts.iter().enumerate() {
            for item in 0..count {
                let attrs = self.attributes_for(ItemIndex::new(section, item));
                self.cache.push(attrs);
            }
        }
        self.section_counts = section_counts.to_vec();
        self.generation = self.generation.wrapping_add(1);
    }
}

impl LayoutStrategy for ClusterLayout {
    fn prepare(&mut self, container_width: f64, section_counts: &[usize]) {
        self.rebuild_sections(container_width, section_counts);
    }

    fn content_size(&self, container_width: f64) -> Size {
        ClusterLayout::content_size(self, container_width)
    }

    fn attributes_for(&self, index: ItemIndex) -> LayoutAttributes {
        ClusterLayout::attributes_for(self, index)
    }

    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        ClusterLayout::attributes_in_rect(self, rect)
    }

    fn item_at_point(&self, point: Point) -> Option<ItemIndex> {
        ClusterLayout::item_at_point(self, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f64 = 250.0;

    fn layout(count: usize) -> ClusterLayout {
        let mut layout = ClusterLayout::new();
        layout.rebuild_all(WIDTH, count);
        layout
    }

    fn frame(index: usize, layout: &ClusterLayout) -> Rect {
        layout.attributes_for(ItemIndex::item(index)).frame
    }

    #[test]
    fn documented_slot_frames() {
        // width 250: small = 70, big = 150, spacing = 15
        let l = layout(6);
        assert_eq!(frame(0, &l), Rect::new(15.0, 15.0, 150.0, 150.0));
        assert_eq!(frame(1, &l), Rect::new(180.0, 15.0, 70.0, 70.0));
        assert_eq!(frame(2, &l), Rect::new(180.0, 100.0, 70.0, 70.0));
        assert_eq!(frame(3, &l), Rect::new(180.0, 185.0, 70.0, 70.0));
        assert_eq!(frame(4, &l), Rect::new(100.0, 185.0, 70.0, 70.0));
        assert_eq!(frame(5, &l), Rect::new(15.0, 185.0, 70.0, 70.0));
    }

    #[test]
    fn second_block_sits_one_pitch_lower() {
        let l = layout(12);
        assert_eq!(l.geometry().cluster_pitch(), 255.0);
        assert_eq!(frame(7, &l), Rect::new(180.0, 270.0, 70.0, 70.0));
        assert_eq!(frame(6, &l), Rect::new(15.0, 270.0, 150.0, 150.0));
    }

    #[test]
    fn content_size_is_square_of_width() {
        let l = layout(30);
        assert_eq!(l.content_size(WIDTH), Size::new(WIDTH, WIDTH));
        assert_eq!(l.content_size(0.0), Size::new(0.0, 0.0));
    }

    #[test]
    fn rebuild_caches_every_item_in_order() {
        let l = layout(9);
        assert_eq!(l.cached().len(), 9);
        for (i, attrs) in l.cached().iter().enumerate() {
            assert_eq!(attrs.index, ItemIndex::item(i));
            assert_eq!(attrs.frame, frame(i, &l));
        }
        assert_eq!(l.section_counts(), &[9]);
    }

    #[test]
    fn rebuild_replaces_cache_and_bumps_generation() {
        let mut l = layout(12);
        let before = l.generation();
        l.rebuild_all(WIDTH, 3);
        assert_eq!(l.cached().len(), 3);
        assert_eq!(l.generation(), before + 1);
    }

    #[test]
    fn queries_before_rebuild_see_empty_cache() {
        let l = ClusterLayout::new();
        assert!(l.attributes_in_rect(Rect::from_size(1000.0, 1000.0)).is_empty());
        assert_eq!(l.item_at_point(Point::new(20.0, 20.0)), None);
    }

    #[test]
    fn rect_query_requires_full_containment() {
        let l = layout(12);
        let target = frame(3, &l);
        let hits = l.attributes_in_rect(target);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, ItemIndex::item(3));

        let shrunk = Rect::new(target.x, target.y, target.width - 1.0, target.height);
        assert!(l.attributes_in_rect(shrunk).is_empty());
    }

    #[test]
    fn rect_query_over_first_block() {
        let l = layout(12);
        let block = Rect::from_size(WIDTH, l.geometry().cluster_pitch());
        let indices: Vec<usize> = l
            .attributes_in_rect(block)
            .iter()
            .map(|a| a.index.item)
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn item_at_point_hits_and_gaps() {
        let l = layout(12);
        assert_eq!(l.item_at_point(Point::new(20.0, 20.0)), Some(ItemIndex::item(0)));
        assert_eq!(l.item_at_point(Point::new(200.0, 300.0)), Some(ItemIndex::item(7)));
        // Gap between the big tile and the right column.
        assert_eq!(l.item_at_point(Point::new(170.0, 20.0)), None);
        // Beyond the last cached item.
        assert_eq!(l.item_at_point(Point::new(20.0, 600.0)), None);
    }

    #[test]
    fn width_change_recomputes_geometry() {
        let mut l = layout(6);
        l.rebuild_all(500.0, 6);
        assert_eq!(frame(0, &l).width, 0.6 * 500.0);
        assert_eq!(l.cached()[0].frame, frame(0, &l));
    }

    #[test]
    fn invalid_width_collapses_instead_of_failing() {
        let mut l = ClusterLayout::new();
        l.rebuild_all(f64::NAN, 6);
        assert_eq!(l.geometry().width, 0.0);
        assert_eq!(l.cached().len(), 6);
        assert_eq!(frame(0, &l), Rect::new(15.0, 15.0, 0.0, 0.0));
    }

    #[test]
    fn multi_section_rebuild() {
        let mut l = ClusterLayout::new();
        l.rebuild_sections(WIDTH, &[2, 3]);
        let indices: Vec<ItemIndex> = l.cached().iter().map(|a| a.index).collect();
        assert_eq!(
            indices,
            vec![
                ItemIndex::new(0, 0),
                ItemIndex::new(0, 1),
                ItemIndex::new(1, 0),
                ItemIndex::new(1, 1),
                ItemIndex::new(1, 2),
            ]
        );
        assert_eq!(l.cached()[2].frame, l.cached()[0].frame);
    }

    #[test]
    fn set_config_rebuilds_in_place() {
        let mut l = layout(6);
        l.set_config(ClusterConfig::default().with_spacing(5.0))
            .expect("valid config");
        assert_eq!(l.cached().len(), 6);
        assert_eq!(l.cached()[0].frame, Rect::new(5.0, 5.0, 150.0, 150.0));
        assert!(l.set_config(ClusterConfig::default().with_spacing(-3.0)).is_err());
        assert_eq!(l.config().spacing, 5.0);
    }

    #[test]
    fn with_config_validates() {
        assert!(ClusterLayout::with_config(ClusterConfig::default().with_small_ratio(2.0)).is_err());
        let l = ClusterLayout::with_config(ClusterConfig::default().with_spacing(0.0))
            .expect("zero spacing is valid");
        assert_eq!(l.config().spacing, 0.0);
    }

    #[test]
    fn placeholder_frames_are_block_zero() {
        let l = layout(0);
        let placeholders = l.placeholder_frames();
        for (i, rect) in placeholders.iter().enumerate() {
            assert_eq!(*rect, frame(i, &l));
        }
    }

    #[test]
    fn strategy_trait_delegates() {
        let mut l = ClusterLayout::new();
        let strategy: &mut dyn LayoutStrategy = &mut l;
        strategy.prepare(WIDTH, &[12]);
        assert_eq!(strategy.content_size(WIDTH), Size::square(WIDTH));
        assert_eq!(
            strategy.item_at_point(Point::new(200.0, 300.0)),
            Some(ItemIndex::item(7))
        );
        assert_eq!(strategy.attributes_in_rect(Rect::from_size(WIDTH, 255.0)).len(), 6);
        assert_eq!(
            strategy.attributes_for(ItemIndex::item(0)).frame,
            Rect::new(15.0, 15.0, 150.0, 150.0)
        );
    }
}
