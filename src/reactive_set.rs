//! A [`HashSet`] that broadcasts its changes.

use core::fmt;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_set;
use crate::hash_set::HashSet;
use crate::hasher::DefaultHashBuilder;
use crate::observer::Observers;

/// A hash set with item-added, item-removed and state-changed channels.
///
/// Single `add`/`remove` calls fire the item channel and then state-changed.
/// Bulk operations fire the item channel per affected element and
/// state-changed once at the end, and only if something changed. Adding a
/// present value or removing an absent one fires nothing.
///
/// Listeners get shared references, so they cannot mutate the set they are
/// observing.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use entity_slots::ReactiveHashSet;
///
/// let added = Rc::new(RefCell::new(Vec::new()));
/// let mut set: ReactiveHashSet<i32> = ReactiveHashSet::new();
///
/// let sink = added.clone();
/// set.item_added().subscribe(Box::new(move |v: &i32| sink.borrow_mut().push(*v)));
///
/// set.add(1);
/// set.add(1);
/// set.union_with([2, 3]);
///
/// let mut seen = added.borrow().clone();
/// seen.sort();
/// assert_eq!(seen, [1, 2, 3]);
/// ```
pub struct ReactiveHashSet<T, S = DefaultHashBuilder> {
    set: HashSet<T, S>,
    item_added: Observers<dyn FnMut(&T)>,
    item_removed: Observers<dyn FnMut(&T)>,
    state_changed: Observers<dyn FnMut()>,
}

impl<T, S> ReactiveHashSet<T, S> {
    /// Listeners called with each added value.
    pub fn item_added(&mut self) -> &mut Observers<dyn FnMut(&T)> {
        &mut self.item_added
    }

    /// Listeners called with each removed value.
    pub fn item_removed(&mut self) -> &mut Observers<dyn FnMut(&T)> {
        &mut self.item_removed
    }

    /// Listeners called once per effective change.
    pub fn state_changed(&mut self) -> &mut Observers<dyn FnMut()> {
        &mut self.state_changed
    }

    /// Disposes every listener on every channel.
    pub fn unsubscribe_all(&mut self) {
        self.item_added.clear();
        self.item_removed.clear();
        self.state_changed.clear();
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns the bucket count of the underlying table.
    pub fn capacity(&self) -> usize {
        self.set.capacity()
    }

    /// Iterates the values in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, T> {
        self.set.iter()
    }

    /// Returns the underlying set.
    pub fn as_set(&self) -> &HashSet<T, S> {
        &self.set
    }

    /// Removes every value, firing item-removed for each and state-changed
    /// once.
    pub fn clear(&mut self) {
        if self.set.is_empty() {
            return;
        }
        for value in self.set.drain() {
            self.item_removed.notify(|f| f(&value));
        }
        self.state_changed.notify(|f| f());
    }

    /// Unwraps the set, dropping every listener.
    pub fn into_inner(self) -> HashSet<T, S> {
        self.set
    }
}

impl<T, S> ReactiveHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty set with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from(HashSet::with_hasher(hash_builder))
    }

    /// Creates an empty set with room for `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds
    /// [`MAX_CAPACITY`](crate::primes::MAX_CAPACITY).
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from(HashSet::with_capacity_and_hasher(capacity, hash_builder))
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.set.contains(value)
    }

    /// Adds a value. Returns `false`, firing nothing, if it was present.
    pub fn add(&mut self, value: T) -> bool {
        match self.set.insert_new(value) {
            Some(value) => {
                self.item_added.notify(|f| f(value));
                self.state_changed.notify(|f| f());
                true
            }
            None => false,
        }
    }

    /// Removes a value. Returns `false`, firing nothing, if it was absent.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.set.take(value) {
            Some(value) => {
                self.item_removed.notify(|f| f(&value));
                self.state_changed.notify(|f| f());
                true
            }
            None => false,
        }
    }

    /// Adds every value from `other`.
    pub fn union_with(&mut self, other: impl IntoIterator<Item = T>) {
        let mut changed = false;
        for value in other {
            if let Some(value) = self.set.insert_new(value) {
                self.item_added.notify(|f| f(value));
                changed = true;
            }
        }
        if changed {
            self.state_changed.notify(|f| f());
        }
    }

    /// Removes every value that appears in `other`.
    pub fn except_with<'a>(&mut self, other: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        let mut changed = false;
        for value in other {
            if let Some(value) = self.set.take(value) {
                self.item_removed.notify(|f| f(&value));
                changed = true;
            }
        }
        if changed {
            self.state_changed.notify(|f| f());
        }
    }

    /// Keeps only the values that also appear in `other`.
    pub fn intersect_with<S2>(&mut self, other: &HashSet<T, S2>)
    where
        S2: BuildHasher,
    {
        let mut changed = false;
        for value in self.set.extract_if(|v| !other.contains(v)) {
            self.item_removed.notify(|f| f(&value));
            changed = true;
        }
        if changed {
            self.state_changed.notify(|f| f());
        }
    }

    /// Keeps the values present in exactly one of `self` and `other`.
    pub fn symmetric_except_with<S2>(&mut self, other: &HashSet<T, S2>)
    where
        T: Clone,
        S2: BuildHasher,
    {
        let mut changed = false;
        for value in other {
            if let Some(removed) = self.set.take(value) {
                self.item_removed.notify(|f| f(&removed));
            } else if let Some(added) = self.set.insert_new(value.clone()) {
                self.item_added.notify(|f| f(added));
            }
            changed = true;
        }
        if changed {
            self.state_changed.notify(|f| f());
        }
    }
}

impl<T, S> ReactiveHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty set using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty set with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for ReactiveHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> From<HashSet<T, S>> for ReactiveHashSet<T, S> {
    fn from(set: HashSet<T, S>) -> Self {
        Self {
            set,
            item_added: Observers::new(),
            item_removed: Observers::new(),
            state_changed: Observers::new(),
        }
    }
}

impl<T, S> FromIterator<T> for ReactiveHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashSet<T, S>>())
    }
}

impl<'a, T, S> IntoIterator for &'a ReactiveHashSet<T, S> {
    type IntoIter = hash_set::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ReactiveHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.set.iter()).finish()
    }
}
