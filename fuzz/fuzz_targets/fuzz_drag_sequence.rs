#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilegrid_core::geometry::Point;
use tilegrid_core::gesture::{PointerEvent, PointerKind};
use tilegrid_harness::{AREA, Fixture};
use tilegrid_reorder::DragEffect;
use web_time::Duration;

#[derive(Debug, Arbitrary)]
enum Kind {
    Down,
    Move,
    Up,
    Cancel,
    Scroll,
    Relayout,
    Detach,
    Abort,
}

#[derive(Debug, Arbitrary)]
struct Step {
    kind: Kind,
    x: i16,
    y: i16,
    wait_ms: u16,
}

#[derive(Debug, Arbitrary)]
struct Input {
    items: u8,
    delegate: bool,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let count = usize::from(input.items % 48);
    let mut f = if input.delegate {
        Fixture::new(count)
    } else {
        Fixture::without_delegate(count)
    };
    f.prepare();

    for step in input.steps.iter().take(256) {
        f.advance(Duration::from_millis(u64::from(step.wait_ms % 1_000)));
        let at = Point::new(f64::from(step.x), f64::from(step.y));
        match step.kind {
            Kind::Down => {
                f.pointer(PointerEvent::new(PointerKind::Down, at));
            }
            Kind::Move => {
                f.pointer(PointerEvent::new(PointerKind::Move, at));
            }
            Kind::Up => {
                f.pointer(PointerEvent::new(PointerKind::Up, at));
            }
            Kind::Cancel => {
                f.pointer(PointerEvent::new(PointerKind::Cancel, at));
            }
            Kind::Scroll => f.scroll_to(f64::from(step.y.unsigned_abs())),
            Kind::Relayout => {
                f.prepare();
            }
            Kind::Detach => {
                let parent = if f.layout.is_installed() { None } else { Some(AREA) };
                f.container.set_parent(parent);
                f.prepare();
            }
            Kind::Abort => {
                f.cancel_drag();
            }
        }
    }

    // Flush a drag orphaned by the last detach.
    f.cancel_drag();

    // Post-conditions that must always hold:
    assert!(!f.layout.has_orphaned_drag(), "orphaned drag survived cancel");
    let dragging = f.layout.controller().is_dragging();
    assert!(!dragging, "cancel left a drag running");
    let live = usize::from(dragging);
    assert_eq!(f.container.hidden().len(), live, "hidden items leaked");
    assert_eq!(f.canvas.previews().len(), live, "previews leaked");

    let reorders = f
        .transitions()
        .iter()
        .filter(|t| matches!(t.effect, DragEffect::Reordered { .. }))
        .count();
    assert_eq!(reorders, f.container.moves().len(), "move count mismatch");
    if let Some(log) = f.log() {
        assert_eq!(log.data(), f.container.order(), "data source out of step");
    }
});
