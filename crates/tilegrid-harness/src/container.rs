#![forbid(unsafe_code)]

//! In-memory item container.

use std::collections::BTreeSet;

use tilegrid_core::geometry::Rect;
use tilegrid_core::space::ViewId;
use tilegrid_layout::{ItemIndex, LayoutStrategy};
use tilegrid_reorder::{Container, ItemRef};

/// A single-section container.
///
/// Each datum has a stable id, and the cell showing datum `d` is
/// `ItemRef(d)`. Positions come from the data order; frames come from the last
/// [`apply_layout`](Self::apply_layout) and depend only on position.
#[derive(Debug, Clone)]
pub struct HeadlessContainer {
    id: ViewId,
    parent: Option<ViewId>,
    bounds: Rect,
    order: Vec<u64>,
    frames: Vec<Rect>,
    hidden: BTreeSet<u64>,
    moves: Vec<(ItemIndex, ItemIndex)>,
    reloads: usize,
}

impl HeadlessContainer {
    /// Container with data ids `0..count` in order.
    #[must_use]
    pub fn new(id: ViewId, parent: Option<ViewId>, bounds: Rect, count: usize) -> Self {
        Self {
            id,
            parent,
            bounds,
            order: (0..count as u64).collect(),
            frames: Vec::new(),
            hidden: BTreeSet::new(),
            moves: Vec::new(),
            reloads: 0,
        }
    }

    /// Snapshot frames for every position from `layout`.
    pub fn apply_layout(&mut self, layout: &dyn LayoutStrategy) {
        self.frames = (0..self.order.len())
            .map(|i| layout.attributes_for(ItemIndex::item(i)).frame)
            .collect();
    }

    /// Scroll so the visible bounds start at `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.bounds.y = y;
    }

    pub fn set_parent(&mut self, parent: Option<ViewId>) {
        self.parent = parent;
    }

    /// Data ids by position.
    #[must_use]
    pub fn order(&self) -> &[u64] {
        &self.order
    }

    #[must_use]
    pub fn hidden(&self) -> &BTreeSet<u64> {
        &self.hidden
    }

    /// Every `move_item` call, in order.
    #[must_use]
    pub fn moves(&self) -> &[(ItemIndex, ItemIndex)] {
        &self.moves
    }

    #[must_use]
    pub fn reloads(&self) -> usize {
        self.reloads
    }

    fn position_of(&self, item: ItemRef) -> Option<usize> {
        self.order.iter().position(|&d| d == item.0)
    }
}

impl Container for HeadlessContainer {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn parent_view(&self) -> Option<ViewId> {
        self.parent
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn item_count(&self, section: usize) -> usize {
        if section == 0 { self.order.len() } else { 0 }
    }

    fn visible_items(&self) -> Vec<ItemRef> {
        self.frames
            .iter()
            .zip(&self.order)
            .filter(|(frame, _)| frame.intersects(&self.bounds))
            .map(|(_, &d)| ItemRef(d))
            .collect()
    }

    fn index_of_item(&self, item: ItemRef) -> Option<ItemIndex> {
        self.position_of(item).map(ItemIndex::item)
    }

    fn item_frame(&self, item: ItemRef) -> Option<Rect> {
        self.position_of(item)
            .and_then(|position| self.frames.get(position).copied())
    }

    fn set_item_hidden(&mut self, item: ItemRef, hidden: bool) {
        if hidden {
            self.hidden.insert(item.0);
        } else {
            self.hidden.remove(&item.0);
        }
    }

    fn move_item(&mut self, from: ItemIndex, to: ItemIndex) {
        self.moves.push((from, to));
        if from.item < self.order.len() && to.item < self.order.len() {
            let datum = self.order.remove(from.item);
            self.order.insert(to.item, datum);
        }
    }

    fn reload_all_data(&mut self) {
        self.reloads += 1;
    }
}
