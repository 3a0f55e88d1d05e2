//! A chained hash table over a flat slot array.
//!
//! Every element lives in a [`Slot`] that records its hash and the index of
//! the next slot in the same chain. Buckets only store the index of the
//! first slot of their chain. Removed slots are threaded onto a free-list
//! through the same `next` field and handed out again before the table
//! appends past its high-water mark, so removal never moves other elements.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::Result;
use crate::primes;

/// Marks the end of a chain or an empty bucket/free-list.
const UNDEFINED: usize = usize::MAX;

#[derive(Clone)]
struct Slot<V> {
    hash: u64,
    next: usize,
    value: Option<V>,
}

impl<V> Slot<V> {
    #[inline(always)]
    fn vacant() -> Self {
        Slot {
            hash: 0,
            next: UNDEFINED,
            value: None,
        }
    }
}

/// Debug statistics for chain analysis.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Number of buckets (and slots)
    pub capacity: usize,
    /// High-water mark of handed-out slots
    pub last_index: usize,
    /// Vacated slots waiting on the free-list
    pub free_slots: usize,
    /// Buckets with at least one element
    pub used_buckets: usize,
    /// Longest chain in the table
    pub longest_chain: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
}

#[cfg(all(any(test, feature = "stats"), feature = "std"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Slots: {} handed out, {} on the free-list",
            self.last_index, self.free_slots
        );
        println!(
            "Buckets: {} used, longest chain {}",
            self.used_buckets, self.longest_chain
        );
    }
}

/// A hash table with prime bucket counts, intrusive chains and free-list
/// slot reuse.
///
/// `HashTable<V>` stores values of type `V`. Like other raw tables it does
/// not hash anything itself: every operation takes the element's hash and an
/// equality predicate. The hash is stored next to the value so growth can
/// rehash without calling back into the caller.
///
/// ## Performance Characteristics
///
/// - **Lookup / insert / remove**: O(1) expected, O(chain length) worst case.
/// - **Growth**: O(n); every occupied slot is relinked into the new buckets.
/// - **Memory**: one `usize` per bucket, plus a hash, a chain index and an
///   `Option<V>` per slot.
///
/// ## Example
///
/// ```rust
/// use entity_slots::hash_table::Entry;
/// use entity_slots::hash_table::HashTable;
///
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
/// }
///
/// let mut table = HashTable::with_capacity(100);
///
/// match table.entry(123, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
///
/// assert_eq!(table.find(123, |p| p.id == 123).map(|p| p.name.as_str()), Some("Alice"));
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    slots: Vec<Slot<V>>,
    buckets: Vec<usize>,

    count: usize,
    last_index: usize,
    free_list: usize,
}

impl<V> Debug for HashTable<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("count", &self.count)
            .field("capacity", &self.buckets.len())
            .field("last_index", &self.last_index)
            .field("values", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            buckets: Vec::new(),
            count: 0,
            last_index: 0,
            free_list: UNDEFINED,
        }
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table able to hold `capacity` elements before
    /// growing.
    ///
    /// The capacity is rounded up to the next tabulated prime. A capacity of
    /// zero allocates nothing.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`primes::MAX_CAPACITY`]. Use
    /// [`try_with_capacity`](Self::try_with_capacity) to handle that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 193);
    ///
    /// let empty: HashTable<String> = HashTable::with_capacity(0);
    /// assert_eq!(empty.capacity(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(table) => table,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new hash table with the given capacity, reporting requests
    /// beyond the prime table instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`](crate::Error::CapacityOverflow)
    /// when `capacity` exceeds [`primes::MAX_CAPACITY`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut table = Self::default();
        if capacity > 0 {
            let (prime, _) = primes::ceil_to_prime(capacity)?;
            table.allocate(prime);
        }
        Ok(table)
    }

    fn allocate(&mut self, capacity: usize) {
        self.slots.resize_with(capacity, Slot::vacant);
        self.buckets.clear();
        self.buckets.resize(capacity, UNDEFINED);
    }

    #[inline(always)]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Values come out in slot order, which follows insertion order until
    /// removals start recycling slots. No ordering is guaranteed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(1, |&v: &u32| v == 1).or_insert(1);
    /// table.entry(2, |&v: &u32| v == 2).or_insert(2);
    ///
    /// let mut values: Vec<u32> = table.iter().copied().collect();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots[..self.last_index].iter(),
            remaining: self.count,
        }
    }

    /// Returns an iterator yielding mutable references to all values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots[..self.last_index].iter_mut(),
            remaining: self.count,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The table is empty once the iterator is dropped, even if it was not
    /// driven to completion. Capacity is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(7, |&v: &u32| v == 7).or_insert(7);
    ///
    /// let values: Vec<u32> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values, [7]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            table: self,
            slot_index: 0,
        }
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns the number of buckets, which is also the number of elements
    /// the table holds before it grows.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all elements from the table.
    ///
    /// Only the slots below the high-water mark are visited. The capacity is
    /// kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 11);
    /// ```
    pub fn clear(&mut self) {
        if self.last_index == 0 {
            return;
        }

        for slot in &mut self.slots[..self.last_index] {
            *slot = Slot::vacant();
        }
        self.buckets.fill(UNDEFINED);

        self.count = 0;
        self.last_index = 0;
        self.free_list = UNDEFINED;
    }

    /// Returns a reference to the value matching `hash` and `eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(43, |&n| n == 43), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = self.find_index(hash, eq)?;
        self.slots[index].value.as_ref()
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.find_index(hash, eq)?;
        self.slots[index].value.as_mut()
    }

    fn find_index(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let mut index = self.buckets[self.bucket_index(hash)];
        while index != UNDEFINED {
            let slot = &self.slots[index];
            if slot.hash == hash && slot.value.as_ref().is_some_and(&eq) {
                return Some(index);
            }
            index = slot.next;
        }

        None
    }

    /// Removes and returns the value matching `hash` and `eq`.
    ///
    /// The vacated slot goes onto the free-list. When the last element is
    /// removed the free-list and high-water mark are reset, so later
    /// insertions fill the table from slot zero again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert_eq!(table.remove(99, |&n| n == 99), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        if self.count == 0 {
            return None;
        }

        let bucket = self.bucket_index(hash);
        let mut prev = UNDEFINED;
        let mut index = self.buckets[bucket];
        while index != UNDEFINED {
            let slot = &self.slots[index];
            if slot.hash == hash && slot.value.as_ref().is_some_and(&eq) {
                return self.unlink(bucket, prev, index);
            }
            prev = index;
            index = slot.next;
        }

        None
    }

    /// Removes the value stored at `index`, locating its chain predecessor
    /// first.
    fn remove_at(&mut self, index: usize) -> Option<V> {
        let bucket = self.bucket_index(self.slots[index].hash);
        let mut prev = UNDEFINED;
        let mut cursor = self.buckets[bucket];
        while cursor != index {
            if cursor == UNDEFINED {
                return None;
            }
            prev = cursor;
            cursor = self.slots[cursor].next;
        }
        self.unlink(bucket, prev, index)
    }

    fn unlink(&mut self, bucket: usize, prev: usize, index: usize) -> Option<V> {
        let next = self.slots[index].next;
        if prev == UNDEFINED {
            self.buckets[bucket] = next;
        } else {
            self.slots[prev].next = next;
        }

        let slot = &mut self.slots[index];
        let value = slot.value.take();
        slot.next = self.free_list;
        self.free_list = index;
        self.count -= 1;

        if self.count == 0 {
            // Every chain is empty now, so nothing references the slots.
            self.last_index = 0;
            self.free_list = UNDEFINED;
        }

        value
    }

    /// Retains only the values for which `f` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(10);
    /// for i in 0..6u64 {
    ///     table.entry(i, |&n: &u64| n == i).or_insert(i);
    /// }
    /// table.retain(|&mut n| n % 2 == 0);
    /// assert_eq!(table.len(), 3);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        let mut index = 0;
        while index < self.last_index {
            let keep = match self.slots[index].value.as_mut() {
                Some(value) => f(value),
                None => true,
            };
            if !keep {
                self.remove_at(index);
            }
            index += 1;
        }
    }

    /// Returns an iterator that removes and yields every value for which `f`
    /// returns `true`.
    ///
    /// Values the iterator does not reach before being dropped stay in the
    /// table.
    pub fn extract_if<F>(&mut self, f: F) -> ExtractIf<'_, V, F>
    where
        F: FnMut(&V) -> bool,
    {
        ExtractIf {
            table: self,
            slot_index: 0,
            pred: f,
        }
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_slots::hash_table::Entry;
    /// use entity_slots::hash_table::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(10);
    ///
    /// match table.entry(5, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "updated".to_string();
    ///     }
    /// }
    ///
    /// assert!(matches!(
    ///     table.entry(5, |s: &String| s == "hello"),
    ///     Entry::Occupied(_)
    /// ));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.find_index(hash, eq) {
            Some(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Places a value known to be absent and returns a reference to it.
    fn insert_new(&mut self, hash: u64, value: V) -> &mut V {
        let index = if self.free_list != UNDEFINED {
            let index = self.free_list;
            self.free_list = self.slots[index].next;
            index
        } else {
            if self.last_index == self.buckets.len() {
                self.grow();
            }
            let index = self.last_index;
            self.last_index += 1;
            index
        };

        let bucket = self.bucket_index(hash);
        let next = self.buckets[bucket];
        self.buckets[bucket] = index;
        self.count += 1;

        let slot = &mut self.slots[index];
        slot.hash = hash;
        slot.next = next;
        slot.value.insert(value)
    }

    /// Moves to the next tabulated prime and relinks every occupied slot.
    ///
    /// Slot indices do not change; only bucket heads and `next` links are
    /// rebuilt.
    ///
    /// # Panics
    ///
    /// Panics when the table already has the largest supported capacity.
    fn grow(&mut self) {
        let new_capacity = match primes::next_capacity(self.buckets.len()) {
            Ok((prime, _)) => prime,
            Err(err) => panic!("{err}"),
        };
        tracing::trace!(
            from = self.buckets.len(),
            to = new_capacity,
            populated = self.count,
            "growing hash table"
        );

        self.allocate(new_capacity);
        for index in 0..self.last_index {
            let slot = &self.slots[index];
            if slot.value.is_none() {
                continue;
            }
            let bucket = self.bucket_index(slot.hash);
            self.slots[index].next = self.buckets[bucket];
            self.buckets[bucket] = index;
        }
    }

    /// Returns a histogram of chain lengths: entry `n` counts the buckets
    /// whose chain holds exactly `n` elements.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        for &head in &self.buckets {
            let mut length = 0;
            let mut index = head;
            while index != UNDEFINED {
                length += 1;
                index = self.slots[index].next;
            }
            if hist.len() <= length {
                hist.resize(length + 1, 0);
            }
            hist[length] += 1;
        }
        hist
    }

    /// Returns utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let hist = self.chain_histogram();
        let mut free_slots = 0;
        let mut index = self.free_list;
        while index != UNDEFINED {
            free_slots += 1;
            index = self.slots[index].next;
        }

        DebugStats {
            populated: self.count,
            capacity: self.buckets.len(),
            last_index: self.last_index,
            free_slots,
            used_buckets: hist.iter().skip(1).sum(),
            longest_chain: hist.len() - 1,
            load_factor: if self.buckets.is_empty() {
                0.0
            } else {
                self.count as f64 / self.buckets.len() as f64
            },
        }
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Modifies an occupied entry in place. Returns `None` for vacant
    /// entries.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts `value` at the head of its chain and returns a mutable
    /// reference to it.
    ///
    /// # Panics
    ///
    /// Panics if the table has to grow past the largest supported capacity.
    pub fn insert(self, value: V) -> &'a mut V {
        self.table.insert_new(self.hash, value)
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        match &self.table.slots[self.index].value {
            Some(value) => value,
            None => unreachable!("occupied entry points at a vacant slot"),
        }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        match &mut self.table.slots[self.index].value {
            Some(value) => value,
            None => unreachable!("occupied entry points at a vacant slot"),
        }
    }

    /// Converts the entry into a mutable reference bound to the table's
    /// lifetime.
    pub fn into_mut(self) -> &'a mut V {
        match &mut self.table.slots[self.index].value {
            Some(value) => value,
            None => unreachable!("occupied entry points at a vacant slot"),
        }
    }

    /// Removes the value from the table and returns it.
    pub fn remove(self) -> V {
        match self.table.remove_at(self.index) {
            Some(value) => value,
            None => unreachable!("occupied entry points at a vacant slot"),
        }
    }
}

/// An iterator over the values in a [`HashTable`].
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Some(value) = &slot.value {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// A mutable iterator over the values in a [`HashTable`].
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Some(value) = &mut slot.value {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    slot_index: usize,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot_index < self.table.last_index {
            let index = self.slot_index;
            self.slot_index += 1;
            if let Some(value) = self.table.slots[index].value.take() {
                self.table.count -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.count, Some(self.table.count))
    }
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        self.table.clear();
    }
}

/// An iterator removing the values that match a predicate.
///
/// This struct is created by the [`extract_if`] method on [`HashTable`].
///
/// [`extract_if`]: HashTable::extract_if
pub struct ExtractIf<'a, V, F> {
    table: &'a mut HashTable<V>,
    slot_index: usize,
    pred: F,
}

impl<V, F> Iterator for ExtractIf<'_, V, F>
where
    F: FnMut(&V) -> bool,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot_index < self.table.last_index {
            let index = self.slot_index;
            self.slot_index += 1;
            let matched = match &self.table.slots[index].value {
                Some(value) => (self.pred)(value),
                None => false,
            };
            if matched {
                return self.table.remove_at(index);
            }
        }
        None
    }
}

/// A consuming iterator over the values in a [`HashTable`].
pub struct IntoIter<V> {
    slots: core::iter::Take<alloc::vec::IntoIter<Slot<V>>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(value) = slot.value {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.count,
            slots: self.slots.into_iter().take(self.last_index),
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
