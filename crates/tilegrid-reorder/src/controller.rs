#![forbid(unsafe_code)]

//! Drag-to-reorder lifecycle.
//!
//! [`DragController`] consumes recognised long-press [`GestureEvent`]s and
//! drives the host collaborators: it lifts the pressed item into a floating
//! preview, keeps the preview under the pointer, moves the item whenever the
//! pointer crosses into another item's frame, and tears everything down when
//! the gesture ends.
//!
//! # State Machine
//!
//! ```text
//! Idle --Began on an item--> Dragging --Changed--> Dragging
//!  ^                             |
//!  +---- Ended / Cancelled / Failed (unhide, remove preview, reload) ----+
//! ```
//!
//! # Invariants
//!
//! 1. At most one [`DragSession`] exists at a time.
//! 2. The delegate and [`Container::move_item`] are notified exactly once per
//!    change of the dragged item's index, always in that order; hovering the
//!    item's own slot notifies nobody.
//! 3. A terminal phase always restores the hidden item and removes the
//!    preview, whether or not a delegate is installed.
//! 4. Every call returns a [`DragTransition`]; ignored events carry a
//!    [`DragNoopReason`] instead of failing.

use std::fmt;

use tilegrid_core::gesture::{GestureEvent, GesturePhase};
use tilegrid_core::geometry::{Point, Rect};
use tilegrid_core::space::ViewId;
use tilegrid_layout::{Edges, HitRegions, ItemIndex, LayoutStrategy};

use crate::config::{ReorderConfig, ReorderConfigError};
use crate::host::{Container, ItemRef, PreviewHost, ReorderDelegate};
use crate::session::DragSession;

/// Coarse controller state reported in transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum DragPhase {
    Idle,
    Dragging {
        origin: ItemIndex,
        current: ItemIndex,
    },
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragNoopReason {
    /// The layout is not installed on a container with a draggable area.
    Inert,
    /// `Changed` or a terminal phase arrived with no drag in progress.
    IdleWithoutSession,
    /// `Began` arrived while a drag was already in progress.
    SessionAlreadyActive,
    /// The press did not land on a visible item.
    NoItemAtPoint,
    /// The pressed item view has no index in the container.
    UnindexedItem,
}

/// Side effect of one controller step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum DragEffect {
    /// An item was lifted into a preview.
    Started {
        index: ItemIndex,
        preview_frame: Rect,
    },
    /// The preview followed the pointer without changing the item's index.
    Moved { preview_frame: Rect, edges: Edges },
    /// The dragged item moved to a new index.
    Reordered {
        from: ItemIndex,
        to: ItemIndex,
        preview_frame: Rect,
        edges: Edges,
    },
    /// The drag finished. `reloaded` is true when the container was asked to
    /// reload its data.
    Dropped {
        phase: GesturePhase,
        index: ItemIndex,
        reloaded: bool,
    },
    Noop { reason: DragNoopReason },
}

/// One controller step with diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragTransition {
    /// Monotonic per-controller id, starting at 1.
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

/// Everything a controller step needs from outside.
///
/// `layout` answers in container coordinates; `hit_regions` is expressed in
/// the draggable area's coordinates.
pub struct DragScene<'a, C: ?Sized, H: ?Sized> {
    pub layout: &'a dyn LayoutStrategy,
    pub hit_regions: &'a HitRegions,
    pub draggable_area: ViewId,
    pub container: &'a mut C,
    pub host: &'a mut H,
}

/// The drag-to-reorder state machine.
pub struct DragController {
    config: ReorderConfig,
    delegate: Option<Box<dyn ReorderDelegate>>,
    session: Option<DragSession>,
    transition_counter: u64,
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("config", &self.config)
            .field("has_delegate", &self.delegate.is_some())
            .field("session", &self.session)
            .field("transition_counter", &self.transition_counter)
            .finish()
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            config: ReorderConfig::default(),
            delegate: None,
            session: None,
            transition_counter: 0,
        }
    }
}

impl DragController {
    /// Controller with an explicit configuration.
    pub fn new(config: ReorderConfig) -> Result<Self, ReorderConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_delegate(mut self, delegate: impl ReorderDelegate + 'static) -> Self {
        self.delegate = Some(Box::new(delegate));
        self
    }

    /// Install or clear the delegate. Takes effect on the next event.
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn ReorderDelegate>>) {
        self.delegate = delegate;
    }

    #[must_use]
    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ReorderConfig) -> Result<(), ReorderConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(session) => DragPhase::Dragging {
                origin: session.origin_index(),
                current: session.current_index(),
            },
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Transition for an event the caller refuses to dispatch.
    pub fn ignore(&mut self, reason: DragNoopReason) -> DragTransition {
        let from = self.phase();
        self.record(from, DragEffect::Noop { reason })
    }

    /// Apply one gesture step.
    pub fn handle<C, H>(
        &mut self,
        event: &GestureEvent,
        scene: &mut DragScene<'_, C, H>,
    ) -> DragTransition
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        let span = tilegrid_core::debug_span!("tilegrid.reorder.gesture", phase = ?event.phase);
        let _guard = span.enter();

        let from = self.phase();
        let effect = match (event.phase, self.session.is_some()) {
            (GesturePhase::Began, false) => self.begin(event, scene),
            (GesturePhase::Began, true) => DragEffect::Noop {
                reason: DragNoopReason::SessionAlreadyActive,
            },
            (GesturePhase::Changed, true) => self.track(event, scene),
            (phase, true) => self.finish(phase, scene),
            (_, false) => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutSession,
            },
        };
        self.record(from, effect)
    }

    /// Tear down an in-flight drag as if it had been cancelled.
    ///
    /// Returns `None` when idle.
    pub fn force_cancel<C, H>(&mut self, scene: &mut DragScene<'_, C, H>) -> Option<DragTransition>
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        if self.session.is_none() {
            return None;
        }
        let from = self.phase();
        let effect = self.finish(GesturePhase::Cancelled, scene);
        Some(self.record(from, effect))
    }

    /// End the session when its container is out of reach: the preview is
    /// removed, the container is neither restored nor reloaded.
    pub(crate) fn abandon<H>(&mut self, host: &mut H) -> Option<DragTransition>
    where
        H: PreviewHost + ?Sized,
    {
        let from = self.phase();
        let session = self.session.take()?;
        host.remove_preview(session.preview());

        let index = session.current_index();
        tilegrid_core::debug!(%index, "drag abandoned");
        let effect = DragEffect::Dropped {
            phase: GesturePhase::Cancelled,
            index,
            reloaded: false,
        };
        Some(self.record(from, effect))
    }

    fn record(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect,
        }
    }

    fn begin<C, H>(&mut self, event: &GestureEvent, scene: &mut DragScene<'_, C, H>) -> DragEffect
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        let area = scene.draggable_area;
        let press = scene.host.convert_point(event.location, event.space, area);

        let Some((item, frame)) = hit_item(scene, press) else {
            tilegrid_core::trace!(x = press.x, y = press.y, "press missed every item");
            return DragEffect::Noop {
                reason: DragNoopReason::NoItemAtPoint,
            };
        };
        let Some(index) = scene.container.index_of_item(item) else {
            tilegrid_core::warn!(item = item.0, "pressed item has no index");
            return DragEffect::Noop {
                reason: DragNoopReason::UnindexedItem,
            };
        };

        scene.container.set_item_hidden(item, true);
        let preview = scene.host.insert_preview(area, item, frame);
        scene
            .host
            .fade_preview(preview, self.config.preview_alpha, self.config.fade_duration);
        self.session = Some(DragSession::new(press, item, preview, frame, index));

        tilegrid_core::debug!(%index, "drag started");
        DragEffect::Started {
            index,
            preview_frame: frame,
        }
    }

    fn track<C, H>(&mut self, event: &GestureEvent, scene: &mut DragScene<'_, C, H>) -> DragEffect
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutSession,
            };
        };

        let pointer = scene
            .host
            .convert_point(event.location, event.space, scene.draggable_area);
        let preview_frame = session.follow(pointer);
        scene.host.set_preview_frame(session.preview(), preview_frame);
        let edges = scene.hit_regions.edges_at(pointer);

        let in_container =
            scene
                .host
                .convert_point(event.location, event.space, scene.container.view_id());
        let from = session.current_index();
        match scene.layout.item_at_point(in_container) {
            Some(to) if to != from => {
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.item_moved(from, to);
                }
                scene.container.move_item(from, to);
                session.retarget(to);
                tilegrid_core::debug!(%from, %to, edges = edges.bits(), "item reordered");
                DragEffect::Reordered {
                    from,
                    to,
                    preview_frame,
                    edges,
                }
            }
            _ => {
                tilegrid_core::trace!(x = pointer.x, y = pointer.y, "preview moved");
                DragEffect::Moved {
                    preview_frame,
                    edges,
                }
            }
        }
    }

    fn finish<C, H>(&mut self, phase: GesturePhase, scene: &mut DragScene<'_, C, H>) -> DragEffect
    where
        C: Container + ?Sized,
        H: PreviewHost + ?Sized,
    {
        let Some(session) = self.session.take() else {
            return DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutSession,
            };
        };

        scene.container.set_item_hidden(session.source_item(), false);
        scene.host.remove_preview(session.preview());

        let reloaded = self.delegate.is_some();
        if reloaded {
            scene.container.reload_all_data();
        }

        let index = session.current_index();
        tilegrid_core::debug!(?phase, %index, reloaded, "drag finished");
        DragEffect::Dropped {
            phase,
            index,
            reloaded,
        }
    }
}

/// First visible item whose frame, converted into the draggable area,
/// contains `press`.
fn hit_item<C, H>(scene: &DragScene<'_, C, H>, press: Point) -> Option<(ItemRef, Rect)>
where
    C: Container + ?Sized,
    H: PreviewHost + ?Sized,
{
    let container = scene.container.view_id();
    scene.container.visible_items().into_iter().find_map(|item| {
        let frame = scene.container.item_frame(item)?;
        let frame = scene
            .host
            .convert_rect(frame, container, scene.draggable_area);
        frame.contains_point(press).then_some((item, frame))
    })
}
