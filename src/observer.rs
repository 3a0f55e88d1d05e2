//! Explicit observer lists.
//!
//! Every subscription hands back a [`SubscriptionId`]; dropping the token does
//! nothing, passing it to [`Observers::unsubscribe`] removes the listener.
//! [`Observers::clear`] disposes every subscriber at once.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Token identifying one subscription within one [`Observers`] list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// An ordered list of listeners of type `F`, usually a `dyn FnMut(..)`.
///
/// Listeners are called synchronously in subscription order. A panicking
/// listener unwinds through [`notify`](Observers::notify) to the caller.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use entity_slots::observer::Observers;
///
/// let seen = Rc::new(Cell::new(0));
/// let mut observers: Observers<dyn FnMut(i32)> = Observers::new();
///
/// let sink = seen.clone();
/// let id = observers.subscribe(Box::new(move |v: i32| sink.set(sink.get() + v)));
///
/// observers.notify(|f| f(5));
/// assert_eq!(seen.get(), 5);
///
/// assert!(observers.unsubscribe(id));
/// observers.notify(|f| f(5));
/// assert_eq!(seen.get(), 5);
/// ```
pub struct Observers<F: ?Sized> {
    listeners: Vec<(SubscriptionId, Box<F>)>,
    next_id: u64,
}

impl<F: ?Sized> Observers<F> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a listener and returns its token.
    pub fn subscribe(&mut self, listener: Box<F>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes the listener registered under `id`. Returns `false` if it was
    /// already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.listeners.iter().position(|(sid, _)| *sid == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Returns the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Calls `call` once per listener, in subscription order.
    pub fn notify(&mut self, mut call: impl FnMut(&mut F)) {
        for (_, listener) in self.listeners.iter_mut() {
            call(&mut **listener);
        }
    }
}

impl<F: ?Sized> Default for Observers<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Observers<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    #[test]
    fn notifies_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<dyn FnMut(&str)> = Observers::new();

        for tag in [1, 2, 3] {
            let log = log.clone();
            observers.subscribe(Box::new(move |s: &str| log.borrow_mut().push((tag, s.len()))));
        }
        observers.notify(|f| f("abc"));

        assert_eq!(*log.borrow(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut observers: Observers<dyn FnMut()> = Observers::new();
        let a = observers.subscribe(Box::new(|| {}));
        let b = observers.subscribe(Box::new(|| {}));
        assert_ne!(a, b);

        assert!(observers.unsubscribe(a));
        assert!(!observers.unsubscribe(a));
        assert_eq!(observers.len(), 1);

        observers.clear();
        assert!(observers.is_empty());
        assert!(!observers.unsubscribe(b));
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut observers: Observers<dyn FnMut()> = Observers::new();
        let a = observers.subscribe(Box::new(|| {}));
        observers.clear();
        let b = observers.subscribe(Box::new(|| {}));
        assert_ne!(a, b);
    }
}
