#![forbid(unsafe_code)]

//! A wired scene with a manual clock.
//!
//! ```text
//! WINDOW (root)
//! └── AREA at (0, 88)            draggable area, container's parent
//!     └── GRID at (10, 20)       250 x 600 container, scrollable
//! ```
//!
//! Pointer positions passed to the fixture are in GRID's content coordinates.

use tilegrid_core::geometry::{Point, Rect};
use tilegrid_core::gesture::PointerEvent;
use tilegrid_core::space::ViewId;
use tilegrid_reorder::{DragTransition, Installation, ReorderConfig, ReorderLayout};
use web_time::{Duration, Instant};

use crate::canvas::Canvas;
use crate::container::HeadlessContainer;
use crate::delegate::{MoveLog, RecordingDelegate};

pub const WINDOW: ViewId = ViewId(1);
pub const AREA: ViewId = ViewId(2);
pub const GRID: ViewId = ViewId(3);

/// Container width used by every fixture.
pub const GRID_WIDTH: f64 = 250.0;
pub const GRID_HEIGHT: f64 = 600.0;

pub struct Fixture {
    pub canvas: Canvas,
    pub container: HeadlessContainer,
    pub layout: ReorderLayout,
    log: Option<MoveLog>,
    now: Instant,
    transitions: Vec<DragTransition>,
}

impl Fixture {
    /// `count` items with a recording delegate installed.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let delegate = RecordingDelegate::new(count);
        let log = delegate.log();
        let mut fixture = Self::without_delegate(count);
        fixture.layout.set_delegate(Some(Box::new(delegate)));
        fixture.log = Some(log);
        fixture
    }

    /// `count` items and no delegate.
    #[must_use]
    pub fn without_delegate(count: usize) -> Self {
        let mut canvas = Canvas::new();
        canvas.add_view(WINDOW, None, Point::ZERO);
        canvas.add_view(AREA, Some(WINDOW), Point::new(0.0, 88.0));
        canvas.add_view(GRID, Some(AREA), Point::new(10.0, 20.0));

        let container = HeadlessContainer::new(
            GRID,
            Some(AREA),
            Rect::from_size(GRID_WIDTH, GRID_HEIGHT),
            count,
        );

        Self {
            canvas,
            container,
            layout: ReorderLayout::new(),
            log: None,
            now: Instant::now(),
            transitions: Vec::new(),
        }
    }

    /// Replace the interaction settings.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid.
    #[must_use]
    pub fn with_config(mut self, config: ReorderConfig) -> Self {
        self.layout
            .set_reorder_config(config)
            .expect("fixture config must be valid");
        self
    }

    /// Run a layout pass and hand the frames to the container.
    pub fn prepare(&mut self) -> Installation {
        let installation = self.layout.prepare(&self.container, &self.canvas);
        self.container.apply_layout(&self.layout);
        installation
    }

    /// Scroll the container and keep the canvas in sync.
    pub fn scroll_to(&mut self, y: f64) {
        self.container.scroll_to(y);
        self.canvas.set_bounds_origin(GRID, Point::new(0.0, y));
    }

    /// Delegate log, if a delegate was installed.
    #[must_use]
    pub fn log(&self) -> Option<&MoveLog> {
        self.log.as_ref()
    }

    /// Every transition produced so far.
    #[must_use]
    pub fn transitions(&self) -> &[DragTransition] {
        &self.transitions
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Vec<DragTransition> {
        let out =
            self.layout
                .handle_pointer(&event, self.now, &mut self.container, &mut self.canvas);
        self.transitions.extend_from_slice(&out);
        out
    }

    /// Move the clock forward and tick the recognizer.
    pub fn advance(&mut self, by: Duration) -> Option<DragTransition> {
        self.now += by;
        let out = self
            .layout
            .tick(self.now, &mut self.container, &mut self.canvas);
        self.transitions.extend(out);
        out
    }

    /// Press at `at` and hold past the recognition threshold.
    pub fn long_press(&mut self, at: Point) -> Option<DragTransition> {
        self.pointer(PointerEvent::down(at));
        let hold = self.layout.reorder_config().min_press_duration + Duration::from_millis(1);
        self.advance(hold)
    }

    pub fn drag_to(&mut self, at: Point) -> Vec<DragTransition> {
        self.now += Duration::from_millis(16);
        self.pointer(PointerEvent::moved(at))
    }

    pub fn release(&mut self, at: Point) -> Vec<DragTransition> {
        self.now += Duration::from_millis(16);
        self.pointer(PointerEvent::up(at))
    }

    pub fn cancel_drag(&mut self) -> Option<DragTransition> {
        let out = self
            .layout
            .cancel_drag(&mut self.container, &mut self.canvas);
        self.transitions.extend(out);
        out
    }
}
