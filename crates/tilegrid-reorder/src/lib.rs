#![forbid(unsafe_code)]

//! Long-press drag-to-reorder for tilegrid containers.
//!
//! # Role in tilegrid
//! `tilegrid-reorder` turns pointer input into reorder operations on a host
//! container. It owns no views: the host implements [`Container`] for its item
//! container, [`PreviewHost`] for the layer that floats drag previews, and
//! optionally [`ReorderDelegate`] to keep its data source in step.
//!
//! # Modules
//! - [`config`]: interaction thresholds and validation.
//! - [`host`]: collaborator traits and handles.
//! - [`session`]: state of one in-flight drag.
//! - [`controller`]: the drag state machine and its transition diagnostics.
//! - [`reorder_layout`]: [`ReorderLayout`], the object hosts install.

pub mod config;
pub mod controller;
pub mod host;
pub mod reorder_layout;
pub mod session;

pub use config::{ReorderConfig, ReorderConfigError};
pub use controller::{
    DragController, DragEffect, DragNoopReason, DragPhase, DragScene, DragTransition,
};
pub use host::{Container, ItemRef, PreviewHost, PreviewId, ReorderDelegate};
pub use reorder_layout::{InertReason, Installation, ReorderLayout};
pub use session::DragSession;
