#![forbid(unsafe_code)]

//! tilegrid public facade.
//!
//! A six-slot cluster grid layout (one big tile and five small tiles per
//! block, repeated vertically) with long-press drag-to-reorder. This crate
//! re-exports the stable surface of the workspace crates and offers a
//! [`Settings`] document for hosts that configure the grid from JSON.
//!
//! ```
//! use tilegrid::prelude::*;
//!
//! let layout = Settings::from_json(r#"{ "cluster": { "spacing": 10.0 } }"#)?
//!     .build()?;
//! assert_eq!(layout.layout().config().spacing, 10.0);
//! # Ok::<(), tilegrid::Error>(())
//! ```

mod error;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use tilegrid_core::geometry::{Point, Rect, Size};
pub use tilegrid_core::gesture::{
    GestureConfig, GestureEvent, GesturePhase, LongPressRecognizer, PointerEvent, PointerKind,
};
pub use tilegrid_core::space::{CoordinateSpace, ViewId};

// --- Layout re-exports -----------------------------------------------------

pub use tilegrid_layout::{
    ClusterConfig, ClusterLayout, Edges, HitRegions, ItemIndex, LayoutAttributes, LayoutError,
    LayoutStrategy, Slot,
};

// --- Reorder re-exports ----------------------------------------------------

pub use tilegrid_reorder::{
    Container, DragController, DragEffect, DragNoopReason, DragPhase, DragTransition, InertReason,
    Installation, ItemRef, PreviewHost, PreviewId, ReorderConfig, ReorderConfigError,
    ReorderDelegate, ReorderLayout,
};

/// Combined configuration document.
///
/// Missing sections and fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cluster: ClusterConfig,
    pub reorder: ReorderConfig,
}

impl Settings {
    /// Parse and validate a JSON settings document.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.cluster.validate()?;
        self.reorder.validate()?;
        Ok(())
    }

    /// A [`ReorderLayout`] configured from these settings.
    pub fn build(self) -> Result<ReorderLayout> {
        let mut layout = ReorderLayout::with_config(self.reorder)?;
        layout.set_cluster_config(self.cluster)?;
        Ok(layout)
    }
}

pub mod prelude {
    pub use crate::{
        ClusterConfig, Container, CoordinateSpace, DragEffect, DragTransition, Error, ItemIndex,
        PointerEvent, PreviewHost, Rect, ReorderConfig, ReorderDelegate, ReorderLayout, Result,
        Settings, ViewId,
    };

    pub use crate::{core, layout, reorder};
}

pub use tilegrid_core as core;
pub use tilegrid_layout as layout;
pub use tilegrid_reorder as reorder;
