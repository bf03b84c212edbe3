#![forbid(unsafe_code)]

//! State of one in-flight drag.

use tilegrid_core::geometry::{Point, Rect};
use tilegrid_layout::ItemIndex;

use crate::host::{ItemRef, PreviewId};

/// Everything the controller remembers between `Began` and the terminal
/// gesture phase.
///
/// All points and frames are in the draggable area's coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragSession {
    pointer_offset: Point,
    source_item: ItemRef,
    preview: PreviewId,
    preview_frame: Rect,
    origin_index: ItemIndex,
    current_index: ItemIndex,
}

impl DragSession {
    pub(crate) fn new(
        press: Point,
        source_item: ItemRef,
        preview: PreviewId,
        frame: Rect,
        index: ItemIndex,
    ) -> Self {
        Self {
            pointer_offset: press - frame.origin(),
            source_item,
            preview,
            preview_frame: frame,
            origin_index: index,
            current_index: index,
        }
    }

    /// Press point minus the lifted item's origin; preserved for the whole
    /// drag so the preview does not jump under the pointer.
    #[must_use]
    pub fn pointer_offset(&self) -> Point {
        self.pointer_offset
    }

    /// The item view hidden while its preview floats.
    #[must_use]
    pub fn source_item(&self) -> ItemRef {
        self.source_item
    }

    #[must_use]
    pub fn preview(&self) -> PreviewId {
        self.preview
    }

    #[must_use]
    pub fn preview_frame(&self) -> Rect {
        self.preview_frame
    }

    /// Index the dragged item had when the drag began.
    #[must_use]
    pub fn origin_index(&self) -> ItemIndex {
        self.origin_index
    }

    /// Index the dragged item occupies now.
    #[must_use]
    pub fn current_index(&self) -> ItemIndex {
        self.current_index
    }

    /// Reposition the preview under `pointer` and return its new frame.
    pub(crate) fn follow(&mut self, pointer: Point) -> Rect {
        self.preview_frame = self.preview_frame.with_origin(pointer - self.pointer_offset);
        self.preview_frame
    }

    pub(crate) fn retarget(&mut self, index: ItemIndex) {
        self.current_index = index;
    }
}
