//! Bounded prefix window over an observable list.
//!
//! # Responsibility
//! - Mirror the first `capacity` elements of a source list into a separate
//!   observable list (a group's "top items").
//! - Apply each source mutation incrementally instead of rebuilding.
//!
//! # Invariants
//! - After every source mutation the window equals
//!   `source[0 .. min(source.len(), capacity)]`, in order.
//! - Only `Reset` rebuilds the window from scratch.
//! - The window holds the source weakly; a dropped source stops syncing.
//!
//! | Source change | Window action |
//! |---|---|
//! | insert at `i < cap` | insert at `i`, drop overflow at `cap` |
//! | move, both `< cap` | same move |
//! | move out (`from < cap <= to`) | remove `from`, append `source[cap-1]` |
//! | move in (`to < cap <= from`) | insert at `to`, drop overflow at `cap` |
//! | remove at `i < cap` | remove `i`, refill from `source[cap-1]` |
//! | replace at `i < cap` | overwrite `i` |
//! | reset | clear, copy the source prefix |

use crate::collection::change::ListChange;
use crate::collection::observable_list::{ListResult, ListView, ObservableList};
use crate::notify::Subscription;
use log::{trace, warn};

/// Default number of items a group previews in the hub grid.
///
/// Twelve fills whole grid columns for 1, 2, 3, 4 or 6 visible rows.
pub const DEFAULT_TOP_ITEMS_CAPACITY: usize = 12;

/// Keeps a bounded prefix mirror of a source list in sync.
pub struct TopWindow<T> {
    window: ObservableList<T>,
    capacity: usize,
    _subscription: Subscription,
}

impl<T: Clone + 'static> TopWindow<T> {
    /// Attaches a window of `capacity` elements to `source`.
    ///
    /// The window is populated from the current source prefix immediately.
    /// A zero capacity is raised to one.
    pub fn attach(source: &ObservableList<T>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let window = ObservableList::new();
        refill(&window, source, capacity);

        let target = window.clone();
        let weak_source = source.downgrade();
        let subscription = source.subscribe(move |change| {
            if let Some(source) = weak_source.upgrade() {
                apply_change(&target, &source, capacity, change);
            }
        });

        Self {
            window,
            capacity,
            _subscription: subscription,
        }
    }

    /// Read-only handle to the mirrored prefix.
    pub fn items(&self) -> ListView<T> {
        self.window.view()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn apply_change<T: Clone + 'static>(
    window: &ObservableList<T>,
    source: &ObservableList<T>,
    capacity: usize,
    change: &ListChange<T>,
) {
    trace!(
        "event=window_sync module=collection kind={} capacity={} source_len={}",
        change.kind().as_str(),
        capacity,
        source.len()
    );
    if let Err(err) = sync_window(window, source, capacity, change) {
        // Index arithmetic only fails if the window already diverged.
        warn!(
            "event=window_resync module=collection status=error kind={} error={}",
            change.kind().as_str(),
            err
        );
        refill(window, source, capacity);
    }
}

fn sync_window<T: Clone + 'static>(
    window: &ObservableList<T>,
    source: &ObservableList<T>,
    capacity: usize,
    change: &ListChange<T>,
) -> ListResult<()> {
    match change {
        ListChange::Insert { index, value } => {
            if *index < capacity {
                window.insert(*index, value.clone())?;
                drop_overflow(window, capacity)?;
            }
        }
        ListChange::Move { from, to, value } => {
            let (from, to) = (*from, *to);
            if from < capacity && to < capacity {
                window.move_item(from, to)?;
            } else if from < capacity {
                window.remove(from)?;
                refill_boundary(window, source, capacity);
            } else if to < capacity {
                window.insert(to, value.clone())?;
                drop_overflow(window, capacity)?;
            }
        }
        ListChange::Remove { index, .. } => {
            if *index < capacity {
                window.remove(*index)?;
                refill_boundary(window, source, capacity);
            }
        }
        ListChange::Replace { index, new, .. } => {
            if *index < capacity {
                window.replace(*index, new.clone())?;
            }
        }
        ListChange::Reset => refill(window, source, capacity),
    }
    Ok(())
}

fn drop_overflow<T: Clone + 'static>(
    window: &ObservableList<T>,
    capacity: usize,
) -> ListResult<()> {
    if window.len() > capacity {
        window.remove(capacity)?;
    }
    Ok(())
}

/// Appends the element that slid into the last window slot, if any.
fn refill_boundary<T: Clone + 'static>(
    window: &ObservableList<T>,
    source: &ObservableList<T>,
    capacity: usize,
) {
    if source.len() >= capacity {
        if let Some(slid_in) = source.get(capacity - 1) {
            window.push(slid_in);
        }
    }
}

fn refill<T: Clone + 'static>(
    window: &ObservableList<T>,
    source: &ObservableList<T>,
    capacity: usize,
) {
    let prefix = source.with(|items| items.iter().take(capacity).cloned().collect::<Vec<_>>());
    window.clear();
    for value in prefix {
        window.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::{TopWindow, DEFAULT_TOP_ITEMS_CAPACITY};
    use crate::collection::change::ListChange;
    use crate::collection::observable_list::ObservableList;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn expected_prefix(source: &ObservableList<char>, capacity: usize) -> Vec<char> {
        source.snapshot().into_iter().take(capacity).collect()
    }

    #[test]
    fn inserts_fill_then_overflow_drops_last() {
        let source = ObservableList::new();
        let top = TopWindow::attach(&source, 3);

        source.insert(0, 'A').expect("insert A");
        assert_eq!(top.items().snapshot(), vec!['A']);
        source.insert(1, 'B').expect("insert B");
        source.insert(2, 'C').expect("insert C");
        assert_eq!(top.items().snapshot(), vec!['A', 'B', 'C']);

        source.insert(0, 'D').expect("insert D");
        assert_eq!(top.items().snapshot(), vec!['D', 'A', 'B']);
    }

    #[test]
    fn insert_beyond_window_leaves_it_untouched() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C']);
        let top = TopWindow::attach(&source, 3);
        let version = top.items().version();

        source.push('D');
        assert_eq!(top.items().snapshot(), vec!['A', 'B', 'C']);
        assert_eq!(top.items().version(), version);
    }

    #[test]
    fn remove_inside_window_refills_from_below() {
        let source = ObservableList::from_vec(vec!['D', 'A', 'B', 'C']);
        let top = TopWindow::attach(&source, 3);
        assert_eq!(top.items().snapshot(), vec!['D', 'A', 'B']);

        source.remove(0).expect("remove D");
        assert_eq!(top.items().snapshot(), vec!['A', 'B', 'C']);
    }

    #[test]
    fn remove_that_drains_below_capacity_shrinks_window() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C']);
        let top = TopWindow::attach(&source, 3);

        source.remove(1).expect("remove B");
        assert_eq!(top.items().snapshot(), vec!['A', 'C']);
        source.remove(0).expect("remove A");
        source.remove(0).expect("remove C");
        assert!(top.items().is_empty());
    }

    #[test]
    fn remove_beyond_window_is_ignored() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C', 'D']);
        let top = TopWindow::attach(&source, 3);

        source.remove(3).expect("remove D");
        assert_eq!(top.items().snapshot(), vec!['A', 'B', 'C']);
    }

    #[test]
    fn move_inside_window_matches_source() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C']);
        let top = TopWindow::attach(&source, 3);

        source.move_item(0, 2).expect("move A");
        assert_eq!(top.items().snapshot(), vec!['B', 'C', 'A']);
    }

    #[test]
    fn move_out_of_window_pulls_next_element_in() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C', 'D']);
        let top = TopWindow::attach(&source, 3);

        source.move_item(0, 3).expect("move A to tail");
        assert_eq!(source.snapshot(), vec!['B', 'C', 'D', 'A']);
        assert_eq!(top.items().snapshot(), vec!['B', 'C', 'D']);
    }

    #[test]
    fn move_into_window_pushes_last_element_out() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C', 'D', 'E']);
        let top = TopWindow::attach(&source, 3);

        source.move_item(4, 1).expect("move E forward");
        assert_eq!(top.items().snapshot(), vec!['A', 'E', 'B']);
    }

    #[test]
    fn move_entirely_beyond_window_is_ignored() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C', 'D', 'E']);
        let top = TopWindow::attach(&source, 3);
        let version = top.items().version();

        source.move_item(3, 4).expect("move D behind E");
        assert_eq!(top.items().snapshot(), vec!['A', 'B', 'C']);
        assert_eq!(top.items().version(), version);
    }

    #[test]
    fn replace_overwrites_only_inside_window() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C', 'D']);
        let top = TopWindow::attach(&source, 3);

        source.replace(1, 'Z').expect("replace B");
        assert_eq!(top.items().snapshot(), vec!['A', 'Z', 'C']);

        source.replace(3, 'Y').expect("replace D");
        assert_eq!(top.items().snapshot(), vec!['A', 'Z', 'C']);
    }

    #[test]
    fn reset_rebuilds_from_source_prefix() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C', 'D']);
        let top = TopWindow::attach(&source, 3);

        source.reset(vec!['X', 'Y']);
        assert_eq!(top.items().snapshot(), vec!['X', 'Y']);

        source.reset(vec!['1', '2', '3', '4', '5']);
        assert_eq!(top.items().snapshot(), vec!['1', '2', '3']);

        source.clear();
        assert!(top.items().is_empty());
    }

    #[test]
    fn window_emits_its_own_structural_events() {
        let source = ObservableList::from_vec(vec!['A', 'B', 'C']);
        let top = TopWindow::attach(&source, 3);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _guard = top
            .items()
            .subscribe(move |change| sink.borrow_mut().push(change.clone()));

        source.insert(0, 'D').expect("insert D");
        assert_eq!(
            *events.borrow(),
            vec![
                ListChange::Insert { index: 0, value: 'D' },
                ListChange::Remove { index: 3, value: 'C' },
            ]
        );
    }

    #[test]
    fn default_capacity_keeps_twelve() {
        let source = ObservableList::from_vec(('a'..='z').collect());
        let top = TopWindow::attach(&source, DEFAULT_TOP_ITEMS_CAPACITY);
        assert_eq!(top.items().len(), 12);

        source.remove(0).expect("remove head");
        assert_eq!(top.items().snapshot(), expected_prefix(&source, 12));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let source = ObservableList::from_vec(vec!['A', 'B']);
        let top = TopWindow::attach(&source, 0);
        assert_eq!(top.capacity(), 1);
        assert_eq!(top.items().snapshot(), vec!['A']);
    }

    #[test]
    fn dropping_window_detaches_from_source() {
        let source = ObservableList::from_vec(vec!['A']);
        let top = TopWindow::attach(&source, 3);
        let view = top.items();
        drop(top);

        source.push('B');
        assert_eq!(view.snapshot(), vec!['A']);
    }
}
