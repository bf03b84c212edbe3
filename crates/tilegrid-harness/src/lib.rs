#![forbid(unsafe_code)]

//! Headless hosts for exercising tilegrid without a UI toolkit.
//!
//! - [`container::HeadlessContainer`]: an item container with a data order,
//!   realised cells and call counters.
//! - [`canvas::Canvas`]: a view tree with offsets and scroll positions that
//!   converts coordinates and hosts drag previews.
//! - [`delegate::RecordingDelegate`]: a data source that records every move.
//! - [`fixture::Fixture`]: the three wired to a [`tilegrid_reorder::ReorderLayout`]
//!   with a manual clock.
//! - [`script`]: seeded pointer scripts and JSONL transcripts.

pub mod canvas;
pub mod container;
pub mod delegate;
pub mod fixture;
pub mod script;

pub use canvas::{Canvas, CanvasOp, Preview};
pub use container::HeadlessContainer;
pub use delegate::{MoveLog, RecordingDelegate};
pub use fixture::{AREA, Fixture, GRID, GRID_HEIGHT, GRID_WIDTH, WINDOW};
pub use script::{GestureScript, ScriptStep, generate_script, transcript_jsonl};
