#![forbid(unsafe_code)]

//! Coordinate spaces.
//!
//! tilegrid never walks a view hierarchy itself. Every view that matters to
//! it (the container, its parent, the draggable area) is named by an opaque
//! [`ViewId`], and the host UI framework answers conversion requests through
//! [`CoordinateSpace`].

use crate::geometry::{Point, Rect};

/// Opaque handle naming a view in the host's hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId(pub u64);

impl ViewId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Host-supplied coordinate transform between views.
///
/// Implementations must be consistent: converting `from -> to -> from`
/// returns the original point.
pub trait CoordinateSpace {
    /// Convert `point`, expressed in `from`'s coordinates, into `to`'s.
    fn convert_point(&self, point: Point, from: ViewId, to: ViewId) -> Point;

    /// Convert a rectangle between views.
    ///
    /// The default converts the origin and keeps the size, which is exact for
    /// translation-only hierarchies. Hosts with scaled views override it.
    fn convert_rect(&self, rect: Rect, from: ViewId, to: ViewId) -> Rect {
        rect.with_origin(self.convert_point(rect.origin(), from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two views; `B` sits at (100, 50) inside `A`.
    struct Offset;

    const A: ViewId = ViewId(1);
    const B: ViewId = ViewId(2);

    impl CoordinateSpace for Offset {
        fn convert_point(&self, point: Point, from: ViewId, to: ViewId) -> Point {
            let shift = Point::new(100.0, 50.0);
            match (from, to) {
                (B, A) => point + shift,
                (A, B) => point - shift,
                _ => point,
            }
        }
    }

    #[test]
    fn default_rect_conversion_keeps_size() {
        let r = Offset.convert_rect(Rect::new(1.0, 2.0, 30.0, 40.0), B, A);
        assert_eq!(r, Rect::new(101.0, 52.0, 30.0, 40.0));
    }

    #[test]
    fn round_trip_is_identity() {
        let p = Point::new(7.0, 9.0);
        let there = Offset.convert_point(p, A, B);
        assert_eq!(Offset.convert_point(there, B, A), p);
    }
}
