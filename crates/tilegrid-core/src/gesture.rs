#![forbid(unsafe_code)]

//! Long-press gesture recognition: raw pointer events in, gesture phases out.
//!
//! [`LongPressRecognizer`] is a stateful processor that converts a stream of
//! [`PointerEvent`]s into [`GestureEvent`]s carrying a [`GesturePhase`].
//!
//! # State Machine
//!
//! ```text
//! Idle --down--> Pressed --held >= min_press_duration--> Active
//!  ^               |  up / cancel / moved too far            |
//!  |<--------------+                                         |
//!  |<-------------- up (Ended) / cancel (Cancelled) ---------+
//!  |<-------------- second down (Failed) --------------------+
//! ```
//!
//! # Invariants
//!
//! 1. Every recognised gesture is well-formed: exactly one `Began`, zero or
//!    more `Changed`, then exactly one of `Ended`, `Cancelled` or `Failed`.
//! 2. Nothing is emitted for presses released or abandoned before the hold
//!    threshold (taps and scrolls pass through untouched).
//! 3. After [`reset`](LongPressRecognizer::reset) the recognizer is idle and
//!    emits nothing until the next pointer-down.
//!
//! # Failure Modes
//!
//! - A second pointer-down while a gesture is active fails the gesture; the
//!   new press is not tracked (single-pointer recognizer).
//! - If the host never calls [`tick`](LongPressRecognizer::tick), `Began` is
//!   still emitted lazily by the next processed event once the threshold has
//!   passed.

use web_time::{Duration, Instant};

use crate::geometry::Point;
use crate::space::ViewId;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Kind of raw pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (focus loss, system gesture).
    Cancel,
}

/// A raw pointer event in the recognizer's view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    #[must_use]
    pub const fn down(position: Point) -> Self {
        Self::new(PointerKind::Down, position)
    }

    #[must_use]
    pub const fn moved(position: Point) -> Self {
        Self::new(PointerKind::Move, position)
    }

    #[must_use]
    pub const fn up(position: Point) -> Self {
        Self::new(PointerKind::Up, position)
    }

    #[must_use]
    pub const fn cancel(position: Point) -> Self {
        Self::new(PointerKind::Cancel, position)
    }
}

/// Lifecycle phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// Whether this phase ends the gesture.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// A recognised gesture step.
///
/// `location` is expressed in the coordinates of `space`, the view the
/// recognizer is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub location: Point,
    pub space: ViewId,
}

impl GestureEvent {
    #[must_use]
    pub const fn new(phase: GesturePhase, location: Point, space: ViewId) -> Self {
        Self {
            phase,
            location,
            space,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for long-press recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Hold duration before a press is recognised (default: 300ms).
    pub min_press_duration: Duration,
    /// Maximum travel (points) allowed before recognition (default: 10.0).
    pub allowable_movement: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_press_duration: Duration::from_millis(300),
            allowable_movement: 10.0,
        }
    }
}

impl GestureConfig {
    #[must_use]
    pub fn with_min_press_duration(mut self, duration: Duration) -> Self {
        self.min_press_duration = duration;
        self
    }

    #[must_use]
    pub fn with_allowable_movement(mut self, points: f64) -> Self {
        self.allowable_movement = points;
        self
    }
}

// ---------------------------------------------------------------------------
// Recognizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum PressState {
    Idle,
    Pressed {
        origin: Point,
        last: Point,
        since: Instant,
    },
    Active {
        last: Point,
    },
}

/// Single-pointer long-press recognizer.
///
/// Call [`process`](Self::process) for every pointer event and
/// [`tick`](Self::tick) periodically so `Began` fires while the pointer is
/// held still.
#[derive(Debug, Clone)]
pub struct LongPressRecognizer {
    config: GestureConfig,
    space: ViewId,
    state: PressState,
}

impl LongPressRecognizer {
    /// Create a recognizer attached to the view `space`.
    #[must_use]
    pub fn new(config: GestureConfig, space: ViewId) -> Self {
        Self {
            config,
            space,
            state: PressState::Idle,
        }
    }

    /// Process a raw pointer event, returning any gesture steps produced.
    ///
    /// At most two steps are produced: a lazily-fired `Began` followed by the
    /// step for the event itself.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);

        if event.kind != PointerKind::Down
            && let Some(began) = self.tick(now)
        {
            out.push(began);
        }

        let pos = event.position;
        match (event.kind, self.state) {
            (PointerKind::Down, PressState::Active { .. }) => {
                self.state = PressState::Idle;
                out.push(self.emit(GesturePhase::Failed, pos));
            }
            (PointerKind::Down, _) => {
                self.state = PressState::Pressed {
                    origin: pos,
                    last: pos,
                    since: now,
                };
            }
            (PointerKind::Move, PressState::Pressed { origin, since, .. }) => {
                if origin.distance(pos) > self.config.allowable_movement {
                    self.state = PressState::Idle;
                } else {
                    self.state = PressState::Pressed {
                        origin,
                        last: pos,
                        since,
                    };
                }
            }
            (PointerKind::Move, PressState::Active { .. }) => {
                self.state = PressState::Active { last: pos };
                out.push(self.emit(GesturePhase::Changed, pos));
            }
            (PointerKind::Up, PressState::Active { .. }) => {
                self.state = PressState::Idle;
                out.push(self.emit(GesturePhase::Ended, pos));
            }
            (PointerKind::Cancel, PressState::Active { last }) => {
                self.state = PressState::Idle;
                out.push(self.emit(GesturePhase::Cancelled, last));
            }
            (PointerKind::Up | PointerKind::Cancel, PressState::Pressed { .. }) => {
                self.state = PressState::Idle;
            }
            (PointerKind::Move | PointerKind::Up | PointerKind::Cancel, PressState::Idle) => {}
        }

        out
    }

    /// Check the hold timer. Call periodically (e.g., on frame tick).
    ///
    /// Returns `Some(Began)` exactly once per press, when the pointer has been
    /// held within the allowable movement for `min_press_duration`.
    pub fn tick(&mut self, now: Instant) -> Option<GestureEvent> {
        let PressState::Pressed { last, since, .. } = self.state else {
            return None;
        };
        if now.saturating_duration_since(since) < self.config.min_press_duration {
            return None;
        }
        self.state = PressState::Active { last };
        Some(self.emit(GesturePhase::Began, last))
    }

    /// Whether a long press has been recognised and not yet finished.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, PressState::Active { .. })
    }

    /// Whether a press is being timed but has not been recognised yet.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, PressState::Pressed { .. })
    }

    /// Drop all state without emitting anything.
    pub fn reset(&mut self) {
        self.state = PressState::Idle;
    }

    /// The view whose coordinates the recognizer reports in.
    #[inline]
    #[must_use]
    pub fn space(&self) -> ViewId {
        self.space
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. An in-flight press keeps its start time.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    fn emit(&self, phase: GesturePhase, location: Point) -> GestureEvent {
        GestureEvent::new(phase, location, self.space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACE: ViewId = ViewId(7);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_299: Duration = Duration::from_millis(299);
    const MS_300: Duration = Duration::from_millis(300);
    const MS_400: Duration = Duration::from_millis(400);

    fn recognizer() -> LongPressRecognizer {
        LongPressRecognizer::new(GestureConfig::default(), SPACE)
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn phases(events: &[GestureEvent]) -> Vec<GesturePhase> {
        events.iter().map(|e| e.phase).collect()
    }

    #[test]
    fn default_threshold_is_300ms() {
        assert_eq!(GestureConfig::default().min_press_duration, MS_300);
    }

    #[test]
    fn tap_emits_nothing() {
        let mut gr = recognizer();
        let t = Instant::now();
        assert!(gr.process(&PointerEvent::down(p(5.0, 5.0)), t).is_empty());
        assert!(gr.process(&PointerEvent::up(p(5.0, 5.0)), t + MS_100).is_empty());
        assert!(!gr.is_active());
    }

    #[test]
    fn tick_before_threshold_does_not_begin() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(5.0, 5.0)), t);
        assert!(gr.tick(t + MS_299).is_none());
        assert!(gr.is_pending());
    }

    #[test]
    fn hold_then_tick_begins_once() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(5.0, 6.0)), t);

        let began = gr.tick(t + MS_300).expect("long press should be recognised");
        assert_eq!(began, GestureEvent::new(GesturePhase::Began, p(5.0, 6.0), SPACE));
        assert!(gr.tick(t + MS_400).is_none());
        assert!(gr.is_active());
    }

    #[test]
    fn full_gesture_sequence() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(0.0, 0.0)), t);
        gr.tick(t + MS_300);

        let moved = gr.process(&PointerEvent::moved(p(40.0, 0.0)), t + MS_400);
        assert_eq!(phases(&moved), vec![GesturePhase::Changed]);
        assert_eq!(moved[0].location, p(40.0, 0.0));

        let ended = gr.process(&PointerEvent::up(p(42.0, 1.0)), t + MS_400);
        assert_eq!(phases(&ended), vec![GesturePhase::Ended]);
        assert!(!gr.is_active());
    }

    #[test]
    fn lazy_began_before_first_move() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(0.0, 0.0)), t);
        let events = gr.process(&PointerEvent::moved(p(30.0, 0.0)), t + MS_400);
        assert_eq!(phases(&events), vec![GesturePhase::Began, GesturePhase::Changed]);
        assert_eq!(events[0].location, p(0.0, 0.0));
    }

    #[test]
    fn early_movement_abandons_press() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(0.0, 0.0)), t);
        assert!(gr.process(&PointerEvent::moved(p(11.0, 0.0)), t + MS_100).is_empty());
        assert!(gr.tick(t + MS_400).is_none());
        assert!(!gr.is_pending());
    }

    #[test]
    fn small_jitter_keeps_press() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(0.0, 0.0)), t);
        gr.process(&PointerEvent::moved(p(3.0, 4.0)), t + MS_100);
        let began = gr.tick(t + MS_300).expect("jitter within tolerance");
        assert_eq!(began.location, p(3.0, 4.0));
    }

    #[test]
    fn cancel_while_active_reports_last_location() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(0.0, 0.0)), t);
        gr.tick(t + MS_300);
        gr.process(&PointerEvent::moved(p(20.0, 20.0)), t + MS_400);
        let events = gr.process(&PointerEvent::cancel(p(99.0, 99.0)), t + MS_400);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, GesturePhase::Cancelled);
        assert_eq!(events[0].location, p(20.0, 20.0));
    }

    #[test]
    fn second_press_fails_active_gesture() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(0.0, 0.0)), t);
        gr.tick(t + MS_300);
        let events = gr.process(&PointerEvent::down(p(50.0, 50.0)), t + MS_400);
        assert_eq!(phases(&events), vec![GesturePhase::Failed]);
        assert!(!gr.is_active());
        assert!(!gr.is_pending());
    }

    #[test]
    fn reset_clears_state() {
        let mut gr = recognizer();
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(0.0, 0.0)), t);
        gr.reset();
        assert!(gr.tick(t + MS_400).is_none());
        assert!(gr.process(&PointerEvent::up(p(0.0, 0.0)), t + MS_400).is_empty());
    }

    #[test]
    fn terminal_phases() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
        assert!(GesturePhase::Failed.is_terminal());
    }

    #[test]
    fn events_carry_attached_space() {
        let mut gr = recognizer();
        assert_eq!(gr.space(), SPACE);
        let t = Instant::now();
        gr.process(&PointerEvent::down(p(1.0, 1.0)), t);
        assert_eq!(gr.tick(t + MS_300).map(|e| e.space), Some(SPACE));
    }
}
