//! An index-addressed sequence that broadcasts its changes.

use alloc::vec::Vec;
use core::fmt;

use crate::error::Error;
use crate::error::Result;
use crate::observer::Observers;

/// A list with item-inserted, item-changed, item-deleted and state-changed
/// channels.
///
/// Item listeners receive the index and a reference to the affected value.
/// Indexed access outside the list fails with [`Error::IndexOutOfRange`]
/// rather than clamping.
///
/// # Examples
///
/// ```rust
/// use entity_slots::Error;
/// use entity_slots::ReactiveList;
///
/// let mut list = ReactiveList::new();
/// list.push("a");
/// list.insert(0, "b")?;
/// assert_eq!(list.as_slice(), ["b", "a"]);
/// assert_eq!(
///     list.remove_at(5),
///     Err(Error::IndexOutOfRange { index: 5, len: 2 })
/// );
/// # Ok::<(), Error>(())
/// ```
pub struct ReactiveList<T> {
    items: Vec<T>,
    item_inserted: Observers<dyn FnMut(usize, &T)>,
    item_changed: Observers<dyn FnMut(usize, &T)>,
    item_deleted: Observers<dyn FnMut(usize, &T)>,
    state_changed: Observers<dyn FnMut()>,
}

impl<T> ReactiveList<T> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates an empty list with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    const fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            item_inserted: Observers::new(),
            item_changed: Observers::new(),
            item_deleted: Observers::new(),
            state_changed: Observers::new(),
        }
    }

    /// Listeners called with the index and value of each insertion.
    pub fn item_inserted(&mut self) -> &mut Observers<dyn FnMut(usize, &T)> {
        &mut self.item_inserted
    }

    /// Listeners called with the index and new value of each replacement.
    pub fn item_changed(&mut self) -> &mut Observers<dyn FnMut(usize, &T)> {
        &mut self.item_changed
    }

    /// Listeners called with the former index and value of each removal.
    pub fn item_deleted(&mut self) -> &mut Observers<dyn FnMut(usize, &T)> {
        &mut self.item_deleted
    }

    /// Listeners called once per effective change.
    pub fn state_changed(&mut self) -> &mut Observers<dyn FnMut()> {
        &mut self.state_changed
    }

    /// Disposes every listener on every channel.
    pub fn unsubscribe_all(&mut self) {
        self.item_inserted.clear();
        self.item_changed.clear();
        self.item_deleted.clear();
        self.state_changed.clear();
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterates the items in order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn check(&self, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Appends an item.
    pub fn push(&mut self, value: T) {
        let index = self.items.len();
        self.items.push(value);
        let value = &self.items[index];
        self.item_inserted.notify(|f| f(index, value));
        self.state_changed.notify(|f| f());
    }

    /// Inserts an item at `index`, shifting later items up. `index` may equal
    /// the length.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.check(index, self.items.len() + 1)?;
        self.items.insert(index, value);
        let value = &self.items[index];
        self.item_inserted.notify(|f| f(index, value));
        self.state_changed.notify(|f| f());
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check(index, self.items.len())?;
        let value = self.items.remove(index);
        self.item_deleted.notify(|f| f(index, &value));
        self.state_changed.notify(|f| f());
        Ok(value)
    }

    /// Replaces the item at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.check(index, self.items.len())?;
        let old = core::mem::replace(&mut self.items[index], value);
        let value = &self.items[index];
        self.item_changed.notify(|f| f(index, value));
        self.state_changed.notify(|f| f());
        Ok(old)
    }

    /// Removes every item, firing item-deleted for each in order and
    /// state-changed once.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        for (index, value) in self.items.drain(..).enumerate() {
            self.item_deleted.notify(|f| f(index, &value));
        }
        self.state_changed.notify(|f| f());
    }

    /// Unwraps the items, dropping every listener.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for ReactiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ReactiveList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for ReactiveList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ReactiveList<T> {
    type IntoIter = core::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ReactiveList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
