#![forbid(unsafe_code)]

//! Recording data source.

use std::cell::RefCell;
use std::rc::Rc;

use tilegrid_layout::ItemIndex;
use tilegrid_reorder::ReorderDelegate;

/// Shared view of what a [`RecordingDelegate`] has seen.
#[derive(Debug, Clone, Default)]
pub struct MoveLog {
    moves: Rc<RefCell<Vec<(ItemIndex, ItemIndex)>>>,
    data: Rc<RefCell<Vec<u64>>>,
}

impl MoveLog {
    /// Every `item_moved` notification, in order.
    #[must_use]
    pub fn moves(&self) -> Vec<(ItemIndex, ItemIndex)> {
        self.moves.borrow().clone()
    }

    /// The delegate's data order after applying every move.
    #[must_use]
    pub fn data(&self) -> Vec<u64> {
        self.data.borrow().clone()
    }
}

/// Delegate that keeps its own data order in step with the container.
#[derive(Debug, Clone)]
pub struct RecordingDelegate {
    log: MoveLog,
}

impl RecordingDelegate {
    /// Delegate over data ids `0..count`.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let log = MoveLog::default();
        log.data.borrow_mut().extend(0..count as u64);
        Self { log }
    }

    /// Handle that stays valid after the delegate is boxed away.
    #[must_use]
    pub fn log(&self) -> MoveLog {
        self.log.clone()
    }
}

impl ReorderDelegate for RecordingDelegate {
    fn item_moved(&mut self, from: ItemIndex, to: ItemIndex) {
        self.log.moves.borrow_mut().push((from, to));
        let mut data = self.log.data.borrow_mut();
        if from.item < data.len() && to.item < data.len() {
            let datum = data.remove(from.item);
            data.insert(to.item, datum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_outlives_boxing() {
        let delegate = RecordingDelegate::new(5);
        let log = delegate.log();
        let mut boxed: Box<dyn ReorderDelegate> = Box::new(delegate);

        boxed.item_moved(ItemIndex::item(0), ItemIndex::item(3));

        assert_eq!(log.moves(), vec![(ItemIndex::item(0), ItemIndex::item(3))]);
        assert_eq!(log.data(), vec![1, 2, 3, 0, 4]);
    }
}
