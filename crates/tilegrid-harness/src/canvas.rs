#![forbid(unsafe_code)]

//! A view tree that converts coordinates and hosts previews.

use std::collections::{BTreeMap, HashMap};

use tilegrid_core::geometry::{Point, Rect};
use tilegrid_core::space::{CoordinateSpace, ViewId};
use tilegrid_reorder::{ItemRef, PreviewHost, PreviewId};
use web_time::Duration;

/// Placement of one view inside its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewNode {
    parent: Option<ViewId>,
    /// Frame origin in the parent's coordinates.
    origin: Point,
    /// Bounds origin (scroll offset) of this view's own coordinates.
    bounds_origin: Point,
}

/// A floating preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    pub parent: ViewId,
    pub item: ItemRef,
    pub frame: Rect,
    pub alpha: f64,
    /// Duration of the last requested fade, if any.
    pub fade: Option<Duration>,
}

/// Preview operations in the order they were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasOp {
    Inserted(PreviewId),
    Moved(PreviewId),
    Faded(PreviewId),
    Removed(PreviewId),
}

/// Translation-only view hierarchy.
///
/// Views not registered with [`add_view`](Self::add_view) behave as roots at
/// the origin.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    views: HashMap<ViewId, ViewNode>,
    previews: BTreeMap<PreviewId, Preview>,
    next_preview: u64,
    ops: Vec<CanvasOp>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `view` at `origin` inside `parent`.
    pub fn add_view(&mut self, view: ViewId, parent: Option<ViewId>, origin: Point) {
        self.views.insert(
            view,
            ViewNode {
                parent,
                origin,
                bounds_origin: Point::ZERO,
            },
        );
    }

    /// Set the scroll offset of a registered view.
    pub fn set_bounds_origin(&mut self, view: ViewId, bounds_origin: Point) {
        if let Some(node) = self.views.get_mut(&view) {
            node.bounds_origin = bounds_origin;
        }
    }

    /// Live previews.
    #[must_use]
    pub fn previews(&self) -> &BTreeMap<PreviewId, Preview> {
        &self.previews
    }

    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// `view` followed by its ancestors. Stops on unknown views and cycles.
    fn chain(&self, view: ViewId) -> Vec<ViewNode> {
        let mut chain = Vec::new();
        let mut next = Some(view);
        while let Some(id) = next {
            if chain.len() > self.views.len() {
                break;
            }
            let Some(node) = self.views.get(&id) else {
                break;
            };
            chain.push(*node);
            next = node.parent;
        }
        chain
    }

    fn to_root(&self, point: Point, view: ViewId) -> Point {
        self.chain(view)
            .iter()
            .fold(point, |p, node| p - node.bounds_origin + node.origin)
    }

    fn from_root(&self, point: Point, view: ViewId) -> Point {
        self.chain(view)
            .iter()
            .rev()
            .fold(point, |p, node| p - node.origin + node.bounds_origin)
    }
}

impl CoordinateSpace for Canvas {
    fn convert_point(&self, point: Point, from: ViewId, to: ViewId) -> Point {
        if from == to {
            return point;
        }
        self.from_root(self.to_root(point, from), to)
    }
}

impl PreviewHost for Canvas {
    fn insert_preview(&mut self, parent: ViewId, item: ItemRef, frame: Rect) -> PreviewId {
        self.next_preview += 1;
        let id = PreviewId(self.next_preview);
        self.previews.insert(
            id,
            Preview {
                parent,
                item,
                frame,
                alpha: 1.0,
                fade: None,
            },
        );
        self.ops.push(CanvasOp::Inserted(id));
        id
    }

    fn set_preview_frame(&mut self, preview: PreviewId, frame: Rect) {
        if let Some(p) = self.previews.get_mut(&preview) {
            p.frame = frame;
            self.ops.push(CanvasOp::Moved(preview));
        }
    }

    fn fade_preview(&mut self, preview: PreviewId, alpha: f64, duration: Duration) {
        if let Some(p) = self.previews.get_mut(&preview) {
            p.alpha = alpha;
            p.fade = Some(duration);
            self.ops.push(CanvasOp::Faded(preview));
        }
    }

    fn remove_preview(&mut self, preview: PreviewId) {
        if self.previews.remove(&preview).is_some() {
            self.ops.push(CanvasOp::Removed(preview));
        }
    }
}
