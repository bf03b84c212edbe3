//! Property-based invariants for the cluster layout engine.
//!
//! 1. Shapes are periodic with period 6; blocks differ only by a vertical shift.
//! 2. `attributes_for` is idempotent.
//! 3. Content size is always a square of the container width.
//! 4. Rect queries return only fully-contained frames.
//! 5. Frames never overlap for widths up to 50x the spacing.
//! 6. Every cached item is found again by a point query at its centre.

use proptest::prelude::*;
use tilegrid_layout::{ClusterConfig, ClusterLayout, ItemIndex, Point, Rect, Size};

// ── Strategies ──────────────────────────────────────────────────────────

fn width_strategy() -> impl Strategy<Value = f64> {
    120.0f64..750.0
}

fn config_strategy() -> impl Strategy<Value = ClusterConfig> {
    (0.0f64..40.0).prop_map(|spacing| ClusterConfig::default().with_spacing(spacing))
}

fn prepared(width: f64, count: usize, config: ClusterConfig) -> ClusterLayout {
    let mut layout = ClusterLayout::with_config(config).expect("strategy yields valid configs");
    layout.rebuild_all(width, count);
    layout
}

fn centre(rect: Rect) -> Point {
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

// ═══════════════════════════════════════════════════════════════════════
// 1-3. Pure per-index geometry
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shapes_repeat_every_six(
        width in width_strategy(),
        config in config_strategy(),
        index in 0usize..600,
    ) {
        let layout = prepared(width, 0, config);
        let a = layout.attributes_for(ItemIndex::item(index)).frame;
        let b = layout.attributes_for(ItemIndex::item(index + 6)).frame;
        let pitch = layout.geometry().cluster_pitch();

        prop_assert_eq!(a.size(), b.size());
        prop_assert_eq!(a.x, b.x);
        prop_assert!((b.y - a.y - pitch).abs() < 1e-6);
    }

    #[test]
    fn attributes_for_is_idempotent(
        width in width_strategy(),
        index in 0usize..1000,
    ) {
        let layout = prepared(width, 12, ClusterConfig::default());
        let first = layout.attributes_for(ItemIndex::item(index));
        let second = layout.attributes_for(ItemIndex::item(index));
        prop_assert_eq!(first.frame.x.to_bits(), second.frame.x.to_bits());
        prop_assert_eq!(first.frame.y.to_bits(), second.frame.y.to_bits());
        prop_assert_eq!(first.frame.width.to_bits(), second.frame.width.to_bits());
        prop_assert_eq!(first.frame.height.to_bits(), second.frame.height.to_bits());
    }

    #[test]
    fn content_size_ignores_height(
        width in width_strategy(),
        count in 0usize..100,
    ) {
        let layout = prepared(width, count, ClusterConfig::default());
        prop_assert_eq!(layout.content_size(width), Size::new(width, width));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4-6. Cached queries
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rect_query_returns_only_contained_frames(
        width in width_strategy(),
        count in 0usize..48,
        x in -50.0f64..400.0,
        y in -50.0f64..1200.0,
        w in 0.0f64..800.0,
        h in 0.0f64..1200.0,
    ) {
        let layout = prepared(width, count, ClusterConfig::default());
        let rect = Rect::new(x, y, w, h);
        let hits = layout.attributes_in_rect(rect);

        for attrs in &hits {
            prop_assert!(rect.contains_rect(&attrs.frame));
        }
        let expected = layout
            .cached()
            .iter()
            .filter(|attrs| rect.contains_rect(&attrs.frame))
            .count();
        prop_assert_eq!(hits.len(), expected);
    }

    #[test]
    fn exact_frame_included_shrunk_frame_excluded(
        width in width_strategy(),
        index in 0usize..24,
    ) {
        let layout = prepared(width, 24, ClusterConfig::default());
        let frame = layout.attributes_for(ItemIndex::item(index)).frame;

        let hits = layout.attributes_in_rect(frame);
        prop_assert!(hits.iter().any(|a| a.index == ItemIndex::item(index)));

        let shrunk = Rect::new(frame.x, frame.y, frame.width, frame.height - 1.0);
        prop_assert!(layout
            .attributes_in_rect(shrunk)
            .iter()
            .all(|a| a.index != ItemIndex::item(index)));
    }

    #[test]
    fn block_frames_never_overlap(width in width_strategy()) {
        // The big tile clears the bottom row while width <= 50 * spacing.
        let layout = prepared(width, 12, ClusterConfig::default());
        let frames: Vec<Rect> = layout.cached().iter().map(|a| a.frame).collect();
        for (i, a) in frames.iter().enumerate() {
            for (j, b) in frames.iter().enumerate().skip(i + 1) {
                prop_assert!(!a.intersects(b), "items {} and {} overlap", i, j);
            }
        }
    }

    #[test]
    fn centre_point_finds_item(
        width in width_strategy(),
        count in 1usize..36,
        pick in any::<prop::sample::Index>(),
    ) {
        let layout = prepared(width, count, ClusterConfig::default());
        let index = pick.index(count);
        let frame = layout.attributes_for(ItemIndex::item(index)).frame;
        prop_assert_eq!(layout.item_at_point(centre(frame)), Some(ItemIndex::item(index)));
    }
}

#[test]
fn rebuild_is_deterministic() {
    let a = prepared(390.0, 30, ClusterConfig::default());
    let b = prepared(390.0, 30, ClusterConfig::default());
    assert_eq!(a.cached(), b.cached());
}
