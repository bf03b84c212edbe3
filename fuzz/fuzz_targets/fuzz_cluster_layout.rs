#![no_main]

use libfuzzer_sys::fuzz_target;
use tilegrid_core::geometry::{Point, Rect};
use tilegrid_layout::{ClusterLayout, ItemIndex};

fuzz_target!(|data: &[u8]| {
    // First byte picks the item count, the rest are f64 samples.
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let mut samples = rest
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]));

    let width = samples
        .next()
        .filter(|w| w.is_finite() && w.abs() < 1e6)
        .unwrap_or(390.0);
    let mut layout = ClusterLayout::new();
    layout.rebuild_all(width, usize::from(count));

    // Post-conditions that must always hold:
    assert_eq!(layout.cached().len(), usize::from(count));
    for attrs in layout.cached() {
        assert_eq!(layout.attributes_for(attrs.index), *attrs);
    }

    while let (Some(x), Some(y)) = (samples.next(), samples.next()) {
        if let Some(index) = layout.item_at_point(Point::new(x, y)) {
            assert!(index < ItemIndex::item(usize::from(count)));
        }
        let rect = Rect::new(x, y, 400.0, 400.0);
        for attrs in layout.attributes_in_rect(rect) {
            assert!(rect.contains_rect(&attrs.frame));
        }
    }
});
