use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::Entry;
use crate::hash_table::HashTable;
use crate::hasher::DefaultHashBuilder;

/// A hash set stored in the chained [`HashTable`].
///
/// `HashSet<T, S>` stores values of type `T` where `T` implements `Hash + Eq`
/// and uses a configurable hasher builder `S` to hash values. Capacity is
/// always a tabulated prime and removals recycle slots through the table's
/// free-list.
///
/// # Examples
///
/// ```rust
/// use entity_slots::HashSet;
///
/// let mut set: HashSet<i32> = [1, 2, 3, 4, 5].into();
/// assert_eq!(set.len(), 5);
/// assert!(set.contains(&3));
/// assert!(!set.contains(&9));
///
/// assert!(set.remove(&3));
/// assert_eq!(set.len(), 4);
///
/// set.clear();
/// assert!(set.is_empty());
/// ```
#[derive(Clone)]
pub struct HashSet<T, S = DefaultHashBuilder> {
    table: HashTable<T>,
    hash_builder: S,
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.table.iter()).finish()
    }
}

impl<T, S> HashSet<T, S> {
    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of elements the set holds before it grows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all elements from the set, keeping its capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the values of the set, in no particular
    /// order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator that removes and yields all values from the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::HashSet;
    ///
    /// let mut set: HashSet<i32> = [1, 2].into();
    ///
    /// let values: Vec<_> = set.drain().collect();
    /// assert!(set.is_empty());
    /// assert_eq!(values.len(), 2);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Retains only the elements for which `f` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::HashSet;
    ///
    /// let mut set: HashSet<i32> = (1..=6).collect();
    /// set.retain(|&v| v % 2 == 0);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.table.retain(|v| f(&*v));
    }

    /// Returns an iterator that removes and yields the values for which
    /// `f` returns `true`.
    ///
    /// Values the iterator does not reach stay in the set.
    pub fn extract_if<F>(&mut self, f: F) -> ExtractIf<'_, T, F>
    where
        F: FnMut(&T) -> bool,
    {
        ExtractIf {
            inner: self.table.extract_if(f),
        }
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new, unallocated hash set with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash set with the specified capacity and hasher builder.
    ///
    /// The capacity is rounded up to the next tabulated prime.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds
    /// [`MAX_CAPACITY`](crate::primes::MAX_CAPACITY).
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. Adding a value that is
    /// already present leaves the set untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert_eq!(set.insert(37), true);
    /// assert_eq!(set.insert(37), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.insert_new(value).is_some()
    }

    /// Inserts `value` when absent and returns a reference to the stored
    /// copy; returns `None` when an equal value was already present.
    pub(crate) fn insert_new(&mut self, value: T) -> Option<&T> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(_) => None,
            Entry::Vacant(entry) => Some(&*entry.insert(value)),
        }
    }

    /// Adds a value to the set, replacing the existing value, if any, that is
    /// equal to the given one. Returns the replaced value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.replace(1), Some(1));
    /// assert_eq!(set.replace(2), None);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(mut entry) => Some(core::mem::replace(entry.get_mut(), value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Returns `true` if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the value in the set, if any, that is equal to
    /// the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value)
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), true);
    /// assert_eq!(set.remove(&1), false);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to the
    /// given one.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Returns `true` if the set has no elements in common with `other`.
    pub fn is_disjoint(&self, other: &HashSet<T, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if `other` contains every element of `self`.
    pub fn is_subset(&self, other: &HashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if `self` contains every element of `other`.
    pub fn is_superset(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Visits the values in `self` or `other`, without duplicates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::HashSet;
    ///
    /// let a: HashSet<i32> = [1, 2, 3].into();
    /// let b: HashSet<i32> = [3, 4].into();
    ///
    /// let mut union: Vec<_> = a.union(&b).copied().collect();
    /// union.sort();
    /// assert_eq!(union, [1, 2, 3, 4]);
    /// ```
    pub fn union<'a>(&'a self, other: &'a HashSet<T, S>) -> Union<'a, T, S> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            set: self,
        }
    }

    /// Visits the values present in both `self` and `other`.
    pub fn intersection<'a>(&'a self, other: &'a HashSet<T, S>) -> Intersection<'a, T, S> {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        Intersection {
            iter: small.iter(),
            other: large,
        }
    }

    /// Visits the values in `self` that are not in `other`.
    pub fn difference<'a>(&'a self, other: &'a HashSet<T, S>) -> Difference<'a, T, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Visits the values in exactly one of `self` and `other`.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<T, S>,
    ) -> SymmetricDifference<'a, T, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new, unallocated hash set using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash set with the specified capacity using the default
    /// hasher builder.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds
    /// [`MAX_CAPACITY`](crate::primes::MAX_CAPACITY).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the values of a `HashSet`.
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

/// A draining iterator over the values of a `HashSet`.
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A consuming iterator over the values of a `HashSet`.
pub struct IntoIter<T> {
    inner: crate::hash_table::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T, S> IntoIterator for HashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<T, S, const N: usize> From<[T; N]> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(values: [T; N]) -> Self {
        let mut set = HashSet::with_capacity(N);
        set.extend(values);
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S> {
    iter: Iter<'a, T>,
    other_iter: Iter<'a, T>,
    set: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Union<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.set.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Intersection<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S> {
    iter: Iter<'a, T>,
    other: &'a HashSet<T, S>,
}

impl<'a, T, S> Iterator for Difference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S> {
    iter: core::iter::Chain<Difference<'a, T, S>, Difference<'a, T, S>>,
}

impl<'a, T, S> Iterator for SymmetricDifference<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

/// An iterator that removes and yields the values matching a predicate.
pub struct ExtractIf<'a, T, F> {
    inner: crate::hash_table::ExtractIf<'a, T, F>,
}

impl<T, F> Iterator for ExtractIf<'_, T, F>
where
    F: FnMut(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;
    use crate::hasher::IdBuildHasher;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            Self {
                k1: OsRng.try_next_u64().unwrap_or(0),
                k2: OsRng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[test]
    fn test_new_and_with_hasher() {
        let set: HashSet<i32, SipHashBuilder> = HashSet::new();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 0);

        let set2 = HashSet::<i32, _>::with_hasher(SipHashBuilder::default());
        assert!(set2.is_empty());
        assert_eq!(set2.len(), 0);
    }

    #[test]
    fn test_with_capacity_rounds_to_prime() {
        let set: HashSet<i32, SipHashBuilder> = HashSet::with_capacity(100);
        assert_eq!(set.capacity(), 193);
        assert!(set.is_empty());

        let set2 = HashSet::<i32, _>::with_capacity_and_hasher(23, SipHashBuilder::default());
        assert_eq!(set2.capacity(), 23);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());

        assert!(set.insert(1));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&1));

        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);

        assert!(set.insert(2));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&3));
    }

    #[test]
    fn test_remove_then_contains() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.extend([1, 2, 3]);

        assert!(set.remove(&2));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&2));

        assert!(!set.remove(&2));
        assert!(!set.remove(&4));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_small_scenario_from_empty() {
        let mut set = HashSet::with_hasher(IdBuildHasher);
        assert_eq!(set.capacity(), 0);
        for k in 1..=5 {
            assert!(set.insert(k));
        }
        assert_eq!(set.len(), 5);
        assert!(set.contains(&3));
        assert!(!set.contains(&9));

        assert!(set.remove(&3));
        assert_eq!(set.len(), 4);
        assert!(!set.contains(&3));

        set.clear();
        assert_eq!(set.len(), 0);
        for k in 1..=5 {
            assert!(!set.contains(&k));
        }
    }

    #[test]
    fn test_from_initial_elements() {
        let set: HashSet<i32, SipHashBuilder> = [10, 20, 30].into();
        assert_eq!(set.len(), 3);

        let mut values: Vec<i32> = set.iter().copied().collect();
        values.sort();
        assert_eq!(values, [10, 20, 30]);
    }

    #[test]
    fn test_free_slot_reused_without_growth() {
        let mut set = HashSet::with_capacity_and_hasher(2, IdBuildHasher);
        set.insert(1);
        set.insert(2);
        set.remove(&1);
        set.insert(3);
        assert_eq!(set.capacity(), 2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_growth_preserves_membership() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        for i in 0..1000 {
            assert!(set.insert(i));
        }
        for i in (0..1000).step_by(2) {
            assert!(set.remove(&i));
        }
        assert_eq!(set.len(), 500);
        for i in 0..1000 {
            assert_eq!(set.contains(&i), i % 2 == 1);
        }
    }

    #[test]
    fn test_take_get_replace() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.insert(42);
        assert_eq!(set.get(&42), Some(&42));
        assert_eq!(set.get(&1), None);
        assert_eq!(set.replace(42), Some(42));
        assert_eq!(set.take(&42), Some(42));
        assert_eq!(set.take(&42), None);
    }

    #[test]
    fn test_string_values() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        assert!(set.insert("hello".to_string()));
        assert!(set.insert("world".to_string()));
        assert!(set.contains(&"hello".to_string()));
        assert!(!set.contains(&"missing".to_string()));
        assert!(!set.insert("hello".to_string()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_complex_values() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        assert!(set.insert(vec![1, 2, 3]));
        assert!(set.insert(vec![4, 5, 6]));
        assert!(!set.insert(vec![1, 2, 3]));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_drain_and_into_iter() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.extend([1, 2, 3]);
        let mut drained: Vec<i32> = set.drain().collect();
        drained.sort();
        assert_eq!(drained, [1, 2, 3]);
        assert!(set.is_empty());

        set.extend([7, 8]);
        let mut owned: Vec<i32> = set.into_iter().collect();
        owned.sort();
        assert_eq!(owned, [7, 8]);
    }

    #[test]
    fn test_retain_and_extract_if() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        set.extend(0..20);
        set.retain(|v| v % 2 == 0);
        assert_eq!(set.len(), 10);

        let mut extracted: Vec<i32> = set.extract_if(|v| *v >= 10).collect();
        extracted.sort();
        assert_eq!(extracted, [10, 12, 14, 16, 18]);
        assert_eq!(set.len(), 5);
        assert!(set.contains(&8));
        assert!(!set.contains(&10));
    }

    #[test]
    fn test_insert_remove_cycle() {
        let mut set = HashSet::with_hasher(SipHashBuilder::default());
        for _ in 0..10 {
            for i in 0..50 {
                assert!(set.insert(i));
            }
            assert_eq!(set.len(), 50);
            for i in 0..50 {
                assert!(set.remove(&i));
            }
            assert!(set.is_empty());
        }
        assert_eq!(set.capacity(), 53);
    }

    #[test]
    fn test_negative_ids_with_id_hasher() {
        let mut set = HashSet::with_hasher(IdBuildHasher);
        for i in -50i32..50i32 {
            assert!(set.insert(i));
        }
        assert_eq!(set.len(), 100);
        assert!(set.contains(&-50));
        assert!(set.contains(&49));
    }

    #[test]
    fn test_subset_superset_disjoint() {
        let mut a = HashSet::with_hasher(SipHashBuilder::default());
        a.extend([1, 2]);
        let mut b = HashSet::with_hasher(a.hasher().clone());
        b.extend([1, 2, 3]);

        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(b.is_superset(&a));
        assert!(!a.is_disjoint(&b));

        let mut c = HashSet::with_hasher(a.hasher().clone());
        c.extend([7, 8]);
        assert!(a.is_disjoint(&c));
    }

    #[test]
    fn test_set_algebra() {
        let mut a = HashSet::with_hasher(SipHashBuilder::default());
        a.extend([1, 2, 3]);
        let mut b = HashSet::with_hasher(a.hasher().clone());
        b.extend([2, 3, 4]);

        let mut union: Vec<_> = a.union(&b).copied().collect();
        union.sort();
        assert_eq!(union, [1, 2, 3, 4]);

        let mut intersection: Vec<_> = a.intersection(&b).copied().collect();
        intersection.sort();
        assert_eq!(intersection, [2, 3]);

        let difference: Vec<_> = a.difference(&b).copied().collect();
        assert_eq!(difference, [1]);

        let mut sym_diff: Vec<_> = a.symmetric_difference(&b).copied().collect();
        sym_diff.sort();
        assert_eq!(sym_diff, [1, 4]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: HashSet<i32, SipHashBuilder> = [3, 1, 2].into();
        let b: HashSet<i32, SipHashBuilder> = [1, 2, 3].into();
        let c: HashSet<i32, SipHashBuilder> = [1, 2].into();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
