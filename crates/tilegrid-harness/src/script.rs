#![forbid(unsafe_code)]

//! Seeded pointer scripts for fault-injection style tests.
//!
//! A [`GestureScript`] is a deterministic mix of taps, long presses, drags,
//! stray moves, double presses and platform cancels. Running one through a
//! [`Fixture`] yields the full transition stream, which can be dumped as
//! JSONL:
//!
//! ```json
//! {"transition_id":2,"from":{"state":"idle"},"to":{"state":"dragging",...},"effect":{"effect":"started",...}}
//! ```

use tilegrid_core::geometry::{Point, Rect};
use tilegrid_core::gesture::{PointerEvent, PointerKind};
use tilegrid_reorder::DragTransition;
use web_time::Duration;

use crate::fixture::Fixture;

/// Xorshift64; same seed, same script.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, max: u64) -> u64 {
        if max == 0 { 0 } else { self.next() % max }
    }

    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn point_in(&mut self, extent: Rect) -> Point {
        Point::new(
            extent.x + self.unit() * extent.width,
            extent.y + self.unit() * extent.height,
        )
    }
}

/// One scripted pointer event, delivered after `wait`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub wait: Duration,
    pub event: PointerEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureScript {
    pub seed: u64,
    pub steps: Vec<ScriptStep>,
}

/// Generate `len` pointer events with positions inside `extent`.
#[must_use]
pub fn generate_script(seed: u64, len: usize, extent: Rect) -> GestureScript {
    let mut rng = Rng::new(seed);
    let mut last = rng.point_in(extent);
    let mut steps = Vec::with_capacity(len);

    for _ in 0..len {
        let kind = match rng.below(10) {
            0..=2 => PointerKind::Down,
            3..=6 => PointerKind::Move,
            7 | 8 => PointerKind::Up,
            _ => PointerKind::Cancel,
        };
        // Mostly jitter around the last point, sometimes a jump.
        let position = if kind == PointerKind::Down || rng.below(4) == 0 {
            rng.point_in(extent)
        } else {
            let dx = rng.unit() * 16.0 - 8.0;
            let dy = rng.unit() * 16.0 - 8.0;
            last + Point::new(dx, dy)
        };
        last = position;

        // Waits straddle the default 300ms hold threshold.
        let wait = Duration::from_millis(rng.below(600));
        steps.push(ScriptStep {
            wait,
            event: PointerEvent::new(kind, position),
        });
    }

    GestureScript { seed, steps }
}

impl GestureScript {
    /// Play the script, ticking before every event. Returns the transitions
    /// produced by this run.
    pub fn run(&self, fixture: &mut Fixture) -> Vec<DragTransition> {
        let start = fixture.transitions().len();
        for step in &self.steps {
            fixture.advance(step.wait);
            fixture.pointer(step.event);
        }
        fixture.transitions()[start..].to_vec()
    }
}

/// Serialize transitions as JSON lines.
pub fn transcript_jsonl(transitions: &[DragTransition]) -> Result<Vec<String>, serde_json::Error> {
    transitions.iter().map(serde_json::to_string).collect()
}
