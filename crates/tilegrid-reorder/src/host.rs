#![forbid(unsafe_code)]

//! Host collaborators.
//!
//! The reorder controller never owns views. It talks to three host-side
//! roles through traits:
//!
//! - [`Container`]: the scrollable item container (collection view).
//! - [`PreviewHost`]: the UI layer that can float a snapshot of an item above
//!   the draggable area and convert coordinates between views.
//! - [`ReorderDelegate`]: the data owner, told about every committed move.

use tilegrid_core::geometry::Rect;
use tilegrid_core::space::{CoordinateSpace, ViewId};
use tilegrid_layout::ItemIndex;
use web_time::Duration;

/// Opaque handle to an item view (a cell) currently realised by the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRef(pub u64);

/// Opaque handle to a floating preview created by a [`PreviewHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviewId(pub u64);

/// The item container the layout is installed on.
///
/// Frames returned by [`item_frame`](Container::item_frame) are in the
/// container's own coordinates (content coordinates, scroll offset included).
pub trait Container {
    /// The container view itself.
    fn view_id(&self) -> ViewId;

    /// Immediate parent view, used as the draggable area when none is set.
    fn parent_view(&self) -> Option<ViewId>;

    /// Visible bounds in the container's own coordinates.
    fn bounds(&self) -> Rect;

    fn section_count(&self) -> usize {
        1
    }

    fn item_count(&self, section: usize) -> usize;

    /// Item views currently realised, in no particular order.
    fn visible_items(&self) -> Vec<ItemRef>;

    /// Index currently displayed by `item`, or `None` if it is not realised.
    fn index_of_item(&self, item: ItemRef) -> Option<ItemIndex>;

    fn item_frame(&self, item: ItemRef) -> Option<Rect>;

    /// Show or hide a realised item view.
    fn set_item_hidden(&mut self, item: ItemRef, hidden: bool);

    /// Move the item at `from` to `to`, shifting the items between.
    fn move_item(&mut self, from: ItemIndex, to: ItemIndex);

    /// Discard realised item views and re-query the data source.
    fn reload_all_data(&mut self);
}

/// The UI layer hosting drag previews.
pub trait PreviewHost: CoordinateSpace {
    /// Float a snapshot of `item` as a child of `parent`, at `frame` in
    /// `parent`'s coordinates.
    fn insert_preview(&mut self, parent: ViewId, item: ItemRef, frame: Rect) -> PreviewId;

    fn set_preview_frame(&mut self, preview: PreviewId, frame: Rect);

    /// Animate the preview's opacity to `alpha` over `duration`.
    fn fade_preview(&mut self, preview: PreviewId, alpha: f64, duration: Duration);

    fn remove_preview(&mut self, preview: PreviewId);
}

/// Receives committed reorder steps.
///
/// Called once per index change during a drag, before the container moves the
/// item, so the data source can be updated in lockstep.
pub trait ReorderDelegate {
    fn item_moved(&mut self, from: ItemIndex, to: ItemIndex);
}

impl<F> ReorderDelegate for F
where
    F: FnMut(ItemIndex, ItemIndex),
{
    fn item_moved(&mut self, from: ItemIndex, to: ItemIndex) {
        self(from, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_delegates() {
        let mut seen = Vec::new();
        {
            let mut delegate = |from: ItemIndex, to: ItemIndex| seen.push((from.item, to.item));
            delegate.item_moved(ItemIndex::item(3), ItemIndex::item(7));
            delegate.item_moved(ItemIndex::item(7), ItemIndex::item(6));
        }
        assert_eq!(seen, vec![(3, 7), (7, 6)]);
    }

    #[test]
    fn boxed_delegate_dispatches() {
        let mut count = 0u32;
        let mut boxed: Box<dyn ReorderDelegate + '_> = Box::new(|_: ItemIndex, _: ItemIndex| {
            count += 1;
        });
        boxed.item_moved(ItemIndex::item(0), ItemIndex::item(1));
        drop(boxed);
        assert_eq!(count, 1);
    }
}
