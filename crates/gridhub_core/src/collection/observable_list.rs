//! Shared ordered list with per-mutation change events.
//!
//! # Responsibility
//! - Own an ordered sequence behind a cheaply cloneable handle.
//! - Emit one [`ListChange`] per successful mutation.
//!
//! # Invariants
//! - Cloning an `ObservableList` yields another handle to the same storage.
//! - `version` increments by exactly 1 per emitted change.
//! - Events are emitted after the storage borrow is released; observers may
//!   read any list, but must not mutate the list that is notifying them.

use crate::collection::change::ListChange;
use crate::notify::{Notifier, Subscription};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::{Rc, Weak};

pub type ListResult<T> = Result<T, ListError>;

/// Caller contract violations on list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
        }
    }
}

impl Error for ListError {}

struct ListInner<T> {
    items: RefCell<Vec<T>>,
    version: Cell<u64>,
    changes: Notifier<ListChange<T>>,
}

/// Ordered, observable, shared list.
pub struct ObservableList<T> {
    inner: Rc<ListInner<T>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Debug> Debug for ObservableList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableList")
            .field("items", &self.inner.items.borrow())
            .field("version", &self.inner.version.get())
            .finish()
    }
}

impl<T: Clone + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> ObservableList<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates a list pre-populated with `items`. No event is emitted.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(ListInner {
                items: RefCell::new(items),
                version: Cell::new(0),
                changes: Notifier::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Returns a clone of the element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.items.borrow().get(index).cloned()
    }

    /// Returns a clone of the whole sequence.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.items.borrow().clone()
    }

    /// Reads the sequence in place without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self.inner.items.borrow().as_slice())
    }

    /// Number of changes emitted since construction.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn subscribe(&self, callback: impl Fn(&ListChange<T>) + 'static) -> Subscription {
        self.inner.changes.subscribe(callback)
    }

    /// Appends `value` at the end.
    pub fn push(&self, value: T) {
        let index = {
            let mut items = self.inner.items.borrow_mut();
            items.push(value.clone());
            items.len() - 1
        };
        self.commit(ListChange::Insert { index, value });
    }

    /// Inserts `value` at `index` (`index == len` appends).
    pub fn insert(&self, index: usize, value: T) -> ListResult<()> {
        {
            let mut items = self.inner.items.borrow_mut();
            if index > items.len() {
                return Err(ListError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            items.insert(index, value.clone());
        }
        self.commit(ListChange::Insert { index, value });
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&self, index: usize) -> ListResult<T> {
        let value = {
            let mut items = self.inner.items.borrow_mut();
            check_index(index, items.len())?;
            items.remove(index)
        };
        self.commit(ListChange::Remove {
            index,
            value: value.clone(),
        });
        Ok(value)
    }

    /// Moves the element at `from` so that it ends up at `to`.
    ///
    /// Both indices must address existing elements. `from == to` is a no-op
    /// and emits nothing.
    pub fn move_item(&self, from: usize, to: usize) -> ListResult<()> {
        let value = {
            let mut items = self.inner.items.borrow_mut();
            check_index(from, items.len())?;
            check_index(to, items.len())?;
            if from == to {
                return Ok(());
            }
            let value = items.remove(from);
            items.insert(to, value.clone());
            value
        };
        self.commit(ListChange::Move { from, to, value });
        Ok(())
    }

    /// Overwrites the element at `index` and returns the previous one.
    pub fn replace(&self, index: usize, value: T) -> ListResult<T> {
        let old = {
            let mut items = self.inner.items.borrow_mut();
            check_index(index, items.len())?;
            std::mem::replace(&mut items[index], value.clone())
        };
        self.commit(ListChange::Replace {
            index,
            old: old.clone(),
            new: value,
        });
        Ok(old)
    }

    /// Replaces the whole sequence with `items`.
    pub fn reset(&self, items: Vec<T>) {
        *self.inner.items.borrow_mut() = items;
        self.commit(ListChange::Reset);
    }

    pub fn clear(&self) {
        self.reset(Vec::new());
    }

    /// Returns a read-only view sharing this list's storage.
    pub fn view(&self) -> ListView<T> {
        ListView { list: self.clone() }
    }

    pub(crate) fn downgrade(&self) -> WeakList<T> {
        WeakList {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn commit(&self, change: ListChange<T>) {
        self.inner.version.set(self.inner.version.get() + 1);
        self.inner.changes.emit(&change);
    }
}

fn check_index(index: usize, len: usize) -> ListResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(ListError::IndexOutOfRange { index, len })
    }
}

/// Non-owning handle to an [`ObservableList`].
pub(crate) struct WeakList<T> {
    inner: Weak<ListInner<T>>,
}

impl<T> WeakList<T> {
    pub(crate) fn upgrade(&self) -> Option<ObservableList<T>> {
        self.inner.upgrade().map(|inner| ObservableList { inner })
    }
}

/// Read-only handle to an [`ObservableList`] owned elsewhere.
pub struct ListView<T> {
    list: ObservableList<T>,
}

impl<T> Clone for ListView<T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<T: Debug> Debug for ListView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ListView").field(&self.list).finish()
    }
}

impl<T: Clone + 'static> ListView<T> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.list.get(index)
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.list.snapshot()
    }

    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.list.with(f)
    }

    pub fn version(&self) -> u64 {
        self.list.version()
    }

    pub fn subscribe(&self, callback: impl Fn(&ListChange<T>) + 'static) -> Subscription {
        self.list.subscribe(callback)
    }
}
