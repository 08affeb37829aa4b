//! Typed change notification with RAII subscriptions.
//!
//! # Responsibility
//! - Deliver change events to observers in registration order.
//! - Let observers unsubscribe by dropping their `Subscription` guard.
//!
//! # Invariants
//! - Subscribers are held weakly; a dropped guard is never called again.
//! - `emit` releases its internal borrow before invoking callbacks, so
//!   callbacks may subscribe or read the emitting model.
//! - Single-threaded by construction (`Rc`), the notifier is `!Send`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

type CallbackRc<E> = Rc<dyn Fn(&E)>;
type CallbackWeak<E> = Weak<dyn Fn(&E)>;

/// Fan-out point for events of type `E`.
pub struct Notifier<E> {
    subscribers: RefCell<Vec<CallbackWeak<E>>>,
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }
}

impl<E> Debug for Notifier<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscriber_count", &self.subscribers.borrow().len())
            .finish()
    }
}

impl<E: 'static> Notifier<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` and returns the guard that keeps it alive.
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        self.subscribers.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Delivers `event` to every live subscriber and prunes dead ones.
    pub fn emit(&self, event: &E) {
        let callbacks: Vec<CallbackRc<E>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of subscribers whose guard is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// RAII guard for one subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}
