//! A single value that broadcasts when it changes.

use core::fmt;

use crate::observer::Observers;

/// Holds a value and notifies listeners whenever [`set`](Self::set) stores a
/// different one.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use entity_slots::ReactiveVariable;
///
/// let changes = Rc::new(Cell::new(0));
/// let mut health = ReactiveVariable::new(100);
///
/// let sink = changes.clone();
/// health.changed().subscribe(Box::new(move |_: &i32| sink.set(sink.get() + 1)));
///
/// assert!(health.set(80));
/// assert!(!health.set(80));
/// assert_eq!(*health.value(), 80);
/// assert_eq!(changes.get(), 1);
/// ```
pub struct ReactiveVariable<T> {
    value: T,
    changed: Observers<dyn FnMut(&T)>,
}

impl<T> ReactiveVariable<T> {
    /// Wraps `value` with no listeners.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            changed: Observers::new(),
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Listeners called with the new value after each change.
    pub fn changed(&mut self) -> &mut Observers<dyn FnMut(&T)> {
        &mut self.changed
    }

    /// Disposes every listener.
    pub fn unsubscribe_all(&mut self) {
        self.changed.clear();
    }

    /// Unwraps the value, dropping every listener.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: PartialEq> ReactiveVariable<T> {
    /// Stores `value`. Returns `true` and notifies if it differs from the
    /// current value; otherwise leaves everything untouched.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        let value = &self.value;
        self.changed.notify(|f| f(value));
        true
    }
}

impl<T: Default> Default for ReactiveVariable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ReactiveVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveVariable")
            .field("value", &self.value)
            .field("listeners", &self.changed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;

    #[test]
    fn notifies_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut name = ReactiveVariable::new(String::from("a"));
        let sink = seen.clone();
        name.changed()
            .subscribe(Box::new(move |v: &String| sink.borrow_mut().push(v.clone())));

        assert!(!name.set("a".to_string()));
        assert!(name.set("b".to_string()));
        assert!(name.set("a".to_string()));

        assert_eq!(*seen.borrow(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn unsubscribing_stops_notifications() {
        let seen = Rc::new(RefCell::new(0));
        let mut v: ReactiveVariable<i32> = ReactiveVariable::default();
        let sink = seen.clone();
        let id = v.changed().subscribe(Box::new(move |_: &i32| *sink.borrow_mut() += 1));

        v.set(1);
        assert!(v.changed().unsubscribe(id));
        v.set(2);
        assert_eq!(*seen.borrow(), 1);

        let sink = seen.clone();
        v.changed().subscribe(Box::new(move |_: &i32| *sink.borrow_mut() += 1));
        v.unsubscribe_all();
        v.set(3);
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(v.into_inner(), 3);
    }
}
