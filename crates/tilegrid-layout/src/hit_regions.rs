#![forbid(unsafe_code)]

//! Edge hit regions for auto-scroll.
//!
//! [`HitRegions`] holds four strips along the edges of the container, expressed
//! in the draggable area's coordinates. A drag that enters a strip is a signal
//! for the host to scroll in that direction; tilegrid reports the signal but
//! does not scroll.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tilegrid_core::geometry::{Point, Rect};

/// Default strip thickness in points.
pub const EDGE_THICKNESS: f64 = 20.0;

bitflags! {
    /// Container edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Edges: u8 {
        const LEFT   = 0b0001;
        const TOP    = 0b0010;
        const RIGHT  = 0b0100;
        const BOTTOM = 0b1000;
    }
}

/// Four edge strips of a container frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitRegions {
    pub left: Rect,
    pub top: Rect,
    pub right: Rect,
    pub bottom: Rect,
}

impl HitRegions {
    /// Build strips of `thickness` along each edge of `frame`.
    #[must_use]
    pub fn from_frame(frame: Rect, thickness: f64) -> Self {
        Self {
            left: Rect::new(frame.x, frame.y, thickness, frame.height),
            top: Rect::new(frame.x, frame.y, frame.width, thickness),
            right: Rect::new(frame.max_x() - thickness, frame.y, thickness, frame.height),
            bottom: Rect::new(frame.x, frame.max_y() - thickness, frame.width, thickness),
        }
    }

    /// The strip for a single edge, or `None` if `edge` names zero or several.
    #[must_use]
    pub fn region(&self, edge: Edges) -> Option<Rect> {
        self.iter()
            .find(|(candidate, _)| *candidate == edge)
            .map(|(_, rect)| rect)
    }

    /// Iterate `(edge, strip)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Edges, Rect)> + '_ {
        [
            (Edges::LEFT, self.left),
            (Edges::TOP, self.top),
            (Edges::RIGHT, self.right),
            (Edges::BOTTOM, self.bottom),
        ]
        .into_iter()
    }

    /// Every edge whose strip contains `point`. Corners report two edges.
    #[must_use]
    pub fn edges_at(&self, point: Point) -> Edges {
        self.iter()
            .filter(|(_, rect)| rect.contains_point(point))
            .fold(Edges::empty(), |acc, (edge, _)| acc | edge)
    }
}
