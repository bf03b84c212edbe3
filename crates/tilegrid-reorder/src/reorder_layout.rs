#![forbid(unsafe_code)]

//! The cluster layout with drag-to-reorder attached.
//!
//! [`ReorderLayout`] is what a host installs on its container. It owns the
//! [`ClusterLayout`], a [`LongPressRecognizer`] bound to the container, the
//! [`DragController`], and the edge [`HitRegions`] of the draggable area.
//!
//! # Installation
//!
//! The layout is inert until it has both a container and a draggable area.
//! The draggable area is whatever was set explicitly, otherwise the
//! container's parent view. While inert, pointer input is swallowed and no
//! collaborator is ever called.
//!
//! # Event flow
//!
//! Pointer events must be in the container's coordinates. They feed the
//! recognizer; each recognised gesture step is handed to the controller
//! together with the current layout and hit regions.
//!
//! # Detaching mid-drag
//!
//! Losing the recognizer while a drag is live (detach, no draggable area, or
//! a switch to another container) orphans the session. Neither `attach` nor
//! `prepare` can reach the preview host, so the orphan is cancelled by the
//! next call that can: [`handle_pointer`](ReorderLayout::handle_pointer),
//! [`tick`](ReorderLayout::tick),
//! [`handle_gesture`](ReorderLayout::handle_gesture) or
//! [`cancel_drag`](ReorderLayout::cancel_drag).

use tilegrid_core::geometry::{Point, Rect, Size};
use tilegrid_core::gesture::{GestureEvent, LongPressRecognizer, PointerEvent};
use tilegrid_core::space::{CoordinateSpace, ViewId};
use tilegrid_layout::{
    ClusterConfig, ClusterLayout, HitRegions, ItemIndex, LayoutAttributes, LayoutError,
    LayoutStrategy,
};
use web_time::Instant;

use crate::config::{ReorderConfig, ReorderConfigError};
use crate::controller::{DragController, DragNoopReason, DragScene, DragTransition};
use crate::host::{Container, PreviewHost, ReorderDelegate};

/// Why a layout is not accepting drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InertReason {
    NoContainer,
    /// No explicit draggable area and the container has no parent view.
    NoDraggableArea,
}

/// Outcome of [`ReorderLayout::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
    Active {
        container: ViewId,
        draggable_area: ViewId,
    },
    Inert(InertReason),
}

impl Installation {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// A live drag whose recognizer was dropped before the gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Orphan {
    container: ViewId,
    area: ViewId,
}

/// Cluster layout plus long-press drag-to-reorder.
#[derive(Debug, Default)]
pub struct ReorderLayout {
    layout: ClusterLayout,
    controller: DragController,
    recognizer: Option<LongPressRecognizer>,
    explicit_area: Option<ViewId>,
    draggable_area: Option<ViewId>,
    hit_regions: HitRegions,
    orphan: Option<Orphan>,
}

impl ReorderLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReorderConfig) -> Result<Self, ReorderConfigError> {
        Ok(Self {
            controller: DragController::new(config)?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_delegate(mut self, delegate: impl ReorderDelegate + 'static) -> Self {
        self.controller.set_delegate(Some(Box::new(delegate)));
        self
    }

    /// Install or clear the delegate. Without one, moves still happen in the
    /// container but nothing is reloaded when the drag ends.
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn ReorderDelegate>>) {
        self.controller.set_delegate(delegate);
    }

    /// Change the cluster proportions. The attribute cache is rebuilt
    /// immediately for the last prepared width and counts.
    pub fn set_cluster_config(&mut self, config: ClusterConfig) -> Result<(), LayoutError> {
        self.layout.set_config(config)
    }

    pub fn set_reorder_config(&mut self, config: ReorderConfig) -> Result<(), ReorderConfigError> {
        self.controller.set_config(config)?;
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.set_config(self.controller.config().gesture_config());
        }
        Ok(())
    }

    #[must_use]
    pub fn reorder_config(&self) -> &ReorderConfig {
        self.controller.config()
    }

    #[must_use]
    pub fn layout(&self) -> &ClusterLayout {
        &self.layout
    }

    #[must_use]
    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Edge strips in the draggable area's coordinates, as of the last
    /// [`prepare`](Self::prepare) or draggable-area change.
    #[must_use]
    pub fn hit_regions(&self) -> &HitRegions {
        &self.hit_regions
    }

    /// The draggable area in effect, if installed.
    #[must_use]
    pub fn draggable_area(&self) -> Option<ViewId> {
        self.draggable_area
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.recognizer.is_some() && self.draggable_area.is_some()
    }

    /// Whether a drag lost its recognizer and still awaits teardown.
    #[must_use]
    pub fn has_orphaned_drag(&self) -> bool {
        self.orphan.is_some()
    }

    /// Bind to `container`, or detach when `None`.
    ///
    /// Idempotent for the same container. Attaching to a different container
    /// replaces the recognizer. A drag in flight when the recognizer goes away
    /// is torn down by the next call that supplies the container and host.
    pub fn attach<C>(&mut self, container: Option<&C>) -> Installation
    where
        C: Container + ?Sized,
    {
        let Some(container) = container else {
            self.detach();
            return Installation::Inert(InertReason::NoContainer);
        };

        let Some(area) = self.explicit_area.or_else(|| container.parent_view()) else {
            tilegrid_core::debug!("no draggable area, reorder stays inert");
            self.detach();
            return Installation::Inert(InertReason::NoDraggableArea);
        };

        let id = container.view_id();
        if self.recognizer.as_ref().map(LongPressRecognizer::space) != Some(id) {
            self.orphan_session();
            self.recognizer = Some(LongPressRecognizer::new(
                self.controller.config().gesture_config(),
                id,
            ));
            tilegrid_core::debug!(container = id.get(), area = area.get(), "reorder attached");
        }
        self.draggable_area = Some(area);

        Installation::Active {
            container: id,
            draggable_area: area,
        }
    }

    fn detach(&mut self) {
        self.orphan_session();
        self.recognizer = None;
        self.draggable_area = None;
    }

    /// Remember a live session before its recognizer is dropped.
    fn orphan_session(&mut self) {
        if self.orphan.is_some() || !self.controller.is_dragging() {
            return;
        }
        if let (Some(recognizer), Some(area)) = (self.recognizer.as_ref(), self.draggable_area) {
            let container = recognizer.space();
            tilegrid_core::debug!(container = container.get(), "recognizer dropped mid-drag");
            self.orphan = Some(Orphan { container, area });
        }
    }

    /// Cancel an orphaned session. Its source item is restored only when
    /// `container` is the one the drag started in; otherwise only the preview
    /// is removed.
    fn reap_orphan<C, H>(&mut self, container: &mut C, host: &mut H) -> Option<DragTransition>
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        let orphan = self.orphan.take()?;
        if container.view_id() != orphan.container {
            tilegrid_core::warn!(
                container = orphan.container.get(),
                "orphaned drag belongs to a detached container"
            );
            return self.controller.abandon(host);
        }

        let mut scene = DragScene {
            layout: &self.layout,
            hit_regions: &self.hit_regions,
            draggable_area: orphan.area,
            container,
            host,
        };
        self.controller.force_cancel(&mut scene)
    }

    /// Set the view previews float in and recompute the edge strips.
    pub fn set_draggable_area<C, S>(&mut self, area: ViewId, container: &C, space: &S)
    where
        C: Container + ?Sized,
        S: CoordinateSpace + ?Sized,
    {
        self.explicit_area = Some(area);
        if self.attach(Some(container)).is_active() {
            self.recompute_hit_regions(container, space);
        }
    }

    fn recompute_hit_regions<C, S>(&mut self, container: &C, space: &S)
    where
        C: Container + ?Sized,
        S: CoordinateSpace + ?Sized,
    {
        let Some(area) = self.draggable_area else {
            return;
        };
        let frame = space.convert_rect(container.bounds(), container.view_id(), area);
        self.hit_regions = HitRegions::from_frame(frame, self.controller.config().edge_inset);
    }

    /// Layout pass: install if possible, refresh the edge strips and rebuild
    /// the attribute cache for the container's current width and counts.
    ///
    /// The cache is rebuilt even when drag support is inert.
    pub fn prepare<C, S>(&mut self, container: &C, space: &S) -> Installation
    where
        C: Container + ?Sized,
        S: CoordinateSpace + ?Sized,
    {
        let installation = self.attach(Some(container));
        if installation.is_active() {
            self.recompute_hit_regions(container, space);
        }

        let counts: Vec<usize> = (0..container.section_count())
            .map(|section| container.item_count(section))
            .collect();
        self.layout
            .rebuild_sections(container.bounds().width, &counts);
        installation
    }

    /// Feed a raw pointer event in the container's coordinates.
    ///
    /// Returns one transition per recognised gesture step, preceded by the
    /// teardown of an orphaned drag if there was one; empty while inert or
    /// while a press is still being timed.
    pub fn handle_pointer<C, H>(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        container: &mut C,
        host: &mut H,
    ) -> Vec<DragTransition>
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        let mut out: Vec<DragTransition> = self.reap_orphan(container, host).into_iter().collect();
        let (Some(recognizer), Some(area)) = (self.recognizer.as_mut(), self.draggable_area) else {
            return out;
        };
        let steps = recognizer.process(event, now);

        let mut scene = DragScene {
            layout: &self.layout,
            hit_regions: &self.hit_regions,
            draggable_area: area,
            container,
            host,
        };
        out.extend(steps.iter().map(|step| self.controller.handle(step, &mut scene)));
        out
    }

    /// Advance the hold timer; starts the drag once the press is long enough.
    ///
    /// An orphaned drag is torn down first and its transition returned; the
    /// timer is then polled on the next tick.
    pub fn tick<C, H>(&mut self, now: Instant, container: &mut C, host: &mut H) -> Option<DragTransition>
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        if let Some(transition) = self.reap_orphan(container, host) {
            return Some(transition);
        }
        let area = self.draggable_area?;
        let step = self.recognizer.as_mut()?.tick(now)?;

        let mut scene = DragScene {
            layout: &self.layout,
            hit_regions: &self.hit_regions,
            draggable_area: area,
            container,
            host,
        };
        Some(self.controller.handle(&step, &mut scene))
    }

    /// Dispatch an already-recognised gesture step, bypassing the built-in
    /// recognizer.
    ///
    /// The last transition is always the step's own; an orphaned drag's
    /// teardown may precede it.
    pub fn handle_gesture<C, H>(
        &mut self,
        event: &GestureEvent,
        container: &mut C,
        host: &mut H,
    ) -> Vec<DragTransition>
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        let mut out: Vec<DragTransition> = self.reap_orphan(container, host).into_iter().collect();
        let Some(area) = self.draggable_area.filter(|_| self.recognizer.is_some()) else {
            out.push(self.controller.ignore(DragNoopReason::Inert));
            return out;
        };

        let mut scene = DragScene {
            layout: &self.layout,
            hit_regions: &self.hit_regions,
            draggable_area: area,
            container,
            host,
        };
        out.push(self.controller.handle(event, &mut scene));
        out
    }

    /// Abort any in-flight press or drag, restoring the container.
    pub fn cancel_drag<C, H>(&mut self, container: &mut C, host: &mut H) -> Option<DragTransition>
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.reset();
        }
        if let Some(transition) = self.reap_orphan(container, host) {
            return Some(transition);
        }
        let area = self.draggable_area?;

        let mut scene = DragScene {
            layout: &self.layout,
            hit_regions: &self.hit_regions,
            draggable_area: area,
            container,
            host,
        };
        self.controller.force_cancel(&mut scene)
    }
}

impl LayoutStrategy for ReorderLayout {
    fn prepare(&mut self, container_width: f64, section_counts: &[usize]) {
        self.layout.rebuild_sections(container_width, section_counts);
    }

    fn content_size(&self, container_width: f64) -> Size {
        self.layout.content_size(container_width)
    }

    fn attributes_for(&self, index: ItemIndex) -> LayoutAttributes {
        self.layout.attributes_for(index)
    }

    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        self.layout.attributes_in_rect(rect)
    }

    fn item_at_point(&self, point: Point) -> Option<ItemIndex> {
        self.layout.item_at_point(point)
    }
}
