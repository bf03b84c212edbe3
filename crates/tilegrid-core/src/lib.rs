#![forbid(unsafe_code)]

//! Core: geometry, coordinate spaces, and gesture input for tilegrid.
//!
//! # Role in tilegrid
//! `tilegrid-core` is the input layer. It owns the floating-point geometry
//! primitives shared by every other crate, the [`space::CoordinateSpace`]
//! seam through which hosts convert points between views, and the
//! long-press recognizer that turns raw pointer events into gesture phases.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Point`], [`geometry::Size`], [`geometry::Rect`].
//! - **Spaces**: opaque [`space::ViewId`] handles and host-supplied transforms.
//! - **Gestures**: [`gesture::LongPressRecognizer`] and [`gesture::GestureEvent`].
//! - **Logging**: tracing macros that compile away without the `tracing` feature.
//!
//! # How it fits in the system
//! The layout engine (`tilegrid-layout`) consumes geometry only. The reorder
//! controller (`tilegrid-reorder`) consumes gesture events and asks the host
//! for coordinate conversions; it never assumes a concrete view hierarchy.

pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod space;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
