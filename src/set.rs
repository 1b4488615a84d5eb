//! # Frequency Set
//!
//! A set of distinct elements kept continuously sorted by how many times each
//! element has been re-added, most-frequent first. The order is a first-class
//! property: callers can walk the set from most- to least-frequent or take
//! the single most-frequent element in O(1).
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                      FrequencySet<E>                        │
//!   │                                                             │
//!   │   index: FxHashMap<E, SlotId>     chain: FreqChain<E>       │
//!   │   ┌─────────┬────────┐            head (most frequent)      │
//!   │   │ "alpha" │ id_0   │              │                       │
//!   │   │ "beta"  │ id_1   │              ▼                       │
//!   │   │ "gamma" │ id_2   │   [alpha:5] ◄──► [gamma:2] ◄──► ...  │
//!   │   └─────────┴────────┘                                      │
//!   │                                                             │
//!   │   Every mutation updates both structures in one step.       │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Operations
//!
//! | Method            | Complexity | Description                             |
//! |-------------------|------------|-----------------------------------------|
//! | `add(e)`          | O(1) avg*  | Insert at weight 1, or touch (+1)       |
//! | `contains(&e)`    | O(1) avg   | Membership via the index                |
//! | `top()`           | O(1)       | Most-frequent element                   |
//! | `remove(&e)`      | O(1) avg   | Unlink + index erase                    |
//! | `iter()`          | O(n)       | Head-to-tail values                     |
//! | `weighted_iter()` | O(n)       | Head-to-tail `(value, weight)` pairs    |
//!
//! *A touch repositions with a backward scan from the touched node; with
//! weights moving by single increments the scan stays shallow, so the
//! amortized cost is far below a resort.
//!
//! ## Thread Safety
//!
//! `FrequencySet` is **not** thread-safe and takes `&mut self` for every
//! mutation; share it across threads only behind external synchronization.
//! There is no internal locking, and no shared-mutation API exists to misuse.
//!
//! ## Example Usage
//!
//! ```
//! use freqset::FrequencySet;
//!
//! let mut set = FrequencySet::new();
//! set.add("alpha");
//! set.add("beta");
//! set.add("alpha"); // touch: weight 2
//!
//! assert_eq!(set.top(), Ok(&"alpha"));
//! assert_eq!(set.weight(&"alpha"), Some(2));
//!
//! let order: Vec<_> = set.iter().copied().collect();
//! assert_eq!(order, vec!["alpha", "beta"]);
//! ```

use std::hash::Hash;
use std::iter::FusedIterator;

use rustc_hash::FxHashMap;

use crate::ds::freq_chain::FreqChain;
use crate::ds::slot_arena::SlotId;
use crate::error::{CursorError, EmptyCollectionError, InvariantError};

/// Frequency-ordered unique collection.
///
/// Re-adding a present element increments its weight by exactly one and may
/// move it toward the head; weights never decrease while an element stays in
/// the set. Removal forgets the weight entirely.
///
/// Elements must be `Clone` because each is held both as the index key and
/// in its chain node. Values are never mutated once stored.
#[derive(Debug)]
pub struct FrequencySet<E>
where
    E: Eq + Hash + Clone,
{
    index: FxHashMap<E, SlotId>,
    chain: FreqChain<E>,
}

impl<E> FrequencySet<E>
where
    E: Eq + Hash + Clone,
{
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            chain: FreqChain::new(),
        }
    }

    /// Creates an empty set with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            chain: FreqChain::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &E) -> bool {
        self.index.contains_key(value)
    }

    /// Returns the current weight of `value`, if present.
    ///
    /// # Example
    ///
    /// ```
    /// use freqset::FrequencySet;
    ///
    /// let mut set = FrequencySet::new();
    /// set.add(7);
    /// set.add(7);
    /// assert_eq!(set.weight(&7), Some(2));
    /// assert_eq!(set.weight(&8), None);
    /// ```
    pub fn weight(&self, value: &E) -> Option<u64> {
        let &id = self.index.get(value)?;
        self.chain.weight(id)
    }

    /// Returns the most frequently added element.
    ///
    /// # Example
    ///
    /// ```
    /// use freqset::FrequencySet;
    ///
    /// let mut set = FrequencySet::new();
    /// assert!(set.top().is_err());
    ///
    /// set.add("a");
    /// set.add("b");
    /// set.add("b");
    /// assert_eq!(set.top(), Ok(&"b"));
    /// ```
    pub fn top(&self) -> Result<&E, EmptyCollectionError> {
        let head = self.chain.head_id().ok_or(EmptyCollectionError)?;
        Ok(self.chain.value(head).expect("chain head missing"))
    }

    /// Adds `value` to the set, or touches it if already present.
    ///
    /// An absent value enters at the tail with weight 1. A present value has
    /// its weight incremented by exactly one and may move toward the head;
    /// the stored value itself is never replaced or mutated.
    ///
    /// Returns `true` if the set did not already contain the value.
    ///
    /// # Example
    ///
    /// ```
    /// use freqset::FrequencySet;
    ///
    /// let mut set = FrequencySet::new();
    /// assert!(set.add("a"));
    /// assert!(!set.add("a"));
    /// assert_eq!(set.len(), 1);
    /// assert_eq!(set.weight(&"a"), Some(2));
    /// ```
    pub fn add(&mut self, value: E) -> bool {
        if let Some(&id) = self.index.get(&value) {
            self.chain.touch(id).expect("indexed node missing from chain");
            false
        } else {
            let id = self.chain.push_back(value.clone());
            self.index.insert(value, id);
            true
        }
    }

    /// Removes `value` from the set if present.
    ///
    /// Returns `true` if the set contained the value.
    pub fn remove(&mut self, value: &E) -> bool {
        self.take(value).is_some()
    }

    /// Removes `value` from the set and returns the stored element.
    ///
    /// # Example
    ///
    /// ```
    /// use freqset::FrequencySet;
    ///
    /// let mut set = FrequencySet::new();
    /// set.add(String::from("a"));
    /// assert_eq!(set.take(&String::from("a")), Some(String::from("a")));
    /// assert_eq!(set.take(&String::from("a")), None);
    /// ```
    pub fn take(&mut self, value: &E) -> Option<E> {
        let id = self.index.remove(value)?;
        let stored = self.chain.remove(id).expect("indexed node missing from chain");
        Some(stored)
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.index.clear();
        self.chain.clear();
    }

    /// Returns an iterator over values from most to least frequent.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            chain: &self.chain,
            current: self.chain.head_id(),
        }
    }

    /// Returns an iterator over `(value, weight)` pairs from most to least
    /// frequent.
    pub fn weighted_iter(&self) -> WeightedIter<'_, E> {
        WeightedIter {
            chain: &self.chain,
            current: self.chain.head_id(),
        }
    }

    /// Returns a removal cursor over values from most to least frequent.
    ///
    /// The cursor borrows the set mutably for its whole lifetime, so no
    /// other mutation can interleave with an active traversal.
    ///
    /// # Example
    ///
    /// ```
    /// use freqset::FrequencySet;
    ///
    /// let mut set: FrequencySet<i32> = (1..=4).collect();
    ///
    /// let mut cursor = set.cursor();
    /// while cursor.has_next() {
    ///     let even = cursor.advance().unwrap() % 2 == 0;
    ///     if even {
    ///         cursor.remove().unwrap();
    ///     }
    /// }
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn cursor(&mut self) -> Cursor<'_, E> {
        let head = self.chain.head_id();
        Cursor {
            set: self,
            next: head,
            current: None,
        }
    }

    /// Returns a removal cursor that also exposes each element's weight.
    pub fn weighted_cursor(&mut self) -> WeightedCursor<'_, E> {
        let head = self.chain.head_id();
        WeightedCursor {
            set: self,
            next: head,
            current: None,
        }
    }

    /// Checks the invariants tying the index and the chain together, plus
    /// the chain's own structural invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.chain.check_invariants()?;
        if self.index.len() != self.chain.len() {
            return Err(InvariantError::new("index and chain cardinality differ"));
        }
        for (value, &id) in &self.index {
            match self.chain.value(id) {
                Some(stored) if stored == value => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index entry names a slot holding a different value",
                    ));
                }
                None => return Err(InvariantError::new("index entry names a freed slot")),
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("frequency set invariant violated: {err}");
        }
    }

    // Single removal path shared by `take` and the cursors: unlink from the
    // chain and erase from the index in the same step.
    fn remove_by_id(&mut self, id: SlotId) -> E {
        let stored = self.chain.remove(id).expect("cursor node missing from chain");
        self.index
            .remove(&stored)
            .expect("cursor value missing from index");
        stored
    }
}

impl<E> Default for FrequencySet<E>
where
    E: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Extend<E> for FrequencySet<E>
where
    E: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<E> FromIterator<E> for FrequencySet<E>
where
    E: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        set.extend(iter);
        set
    }
}

impl<'a, E> IntoIterator for &'a FrequencySet<E>
where
    E: Eq + Hash + Clone,
{
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over values from most to least frequent.
pub struct Iter<'a, E> {
    chain: &'a FreqChain<E>,
    current: Option<SlotId>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.chain.next_id(id);
        self.chain.value(id)
    }
}

impl<E> FusedIterator for Iter<'_, E> {}

/// Iterator over `(value, weight)` pairs from most to least frequent.
pub struct WeightedIter<'a, E> {
    chain: &'a FreqChain<E>,
    current: Option<SlotId>,
}

impl<'a, E> Iterator for WeightedIter<'a, E> {
    type Item = (&'a E, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.chain.next_id(id);
        let value = self.chain.value(id)?;
        let weight = self.chain.weight(id)?;
        Some((value, weight))
    }
}

impl<E> FusedIterator for WeightedIter<'_, E> {}

/// Read/remove cursor over values from most to least frequent.
///
/// States: not started, positioned on an element, exhausted. `advance` steps
/// and yields; `remove` drops the last-advanced element and leaves the
/// cursor with no current element until the next advance.
pub struct Cursor<'a, E>
where
    E: Eq + Hash + Clone,
{
    set: &'a mut FrequencySet<E>,
    next: Option<SlotId>,
    current: Option<SlotId>,
}

impl<E> Cursor<'_, E>
where
    E: Eq + Hash + Clone,
{
    /// Returns `true` while the cursor has not passed the tail.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Steps to the next element and returns it.
    pub fn advance(&mut self) -> Result<&E, CursorError> {
        let id = self.next.ok_or(CursorError::NoMoreElements)?;
        self.current = Some(id);
        self.next = self.set.chain.next_id(id);
        Ok(self.set.chain.value(id).expect("cursor node missing from chain"))
    }

    /// Removes the last-advanced element and returns it.
    ///
    /// Removal behaves exactly like [`FrequencySet::take`] on the element:
    /// the node is unlinked and the index entry erased in the same step.
    /// Legal only immediately after an advance, once per advance.
    pub fn remove(&mut self) -> Result<E, CursorError> {
        let id = self.current.take().ok_or(CursorError::InvalidCursorState)?;
        Ok(self.set.remove_by_id(id))
    }
}

/// Read/remove cursor that exposes each element's weight.
///
/// Mirrors [`Cursor`], additionally yielding the weight with each advance
/// and via accessors on the current element.
pub struct WeightedCursor<'a, E>
where
    E: Eq + Hash + Clone,
{
    set: &'a mut FrequencySet<E>,
    next: Option<SlotId>,
    current: Option<SlotId>,
}

impl<E> WeightedCursor<'_, E>
where
    E: Eq + Hash + Clone,
{
    /// Returns `true` while the cursor has not passed the tail.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Steps to the next element and returns it with its weight.
    pub fn advance(&mut self) -> Result<(&E, u64), CursorError> {
        let id = self.next.ok_or(CursorError::NoMoreElements)?;
        self.current = Some(id);
        self.next = self.set.chain.next_id(id);
        let value = self.set.chain.value(id).expect("cursor node missing from chain");
        let weight = self.set.chain.weight(id).expect("cursor node missing from chain");
        Ok((value, weight))
    }

    /// Returns the current element.
    pub fn value(&self) -> Result<&E, CursorError> {
        let id = self.current.ok_or(CursorError::InvalidCursorState)?;
        Ok(self.set.chain.value(id).expect("cursor node missing from chain"))
    }

    /// Returns the current element's weight.
    pub fn weight(&self) -> Result<u64, CursorError> {
        let id = self.current.ok_or(CursorError::InvalidCursorState)?;
        Ok(self.set.chain.weight(id).expect("cursor node missing from chain"))
    }

    /// Removes the last-advanced element and returns it.
    pub fn remove(&mut self) -> Result<E, CursorError> {
        let id = self.current.take().ok_or(CursorError::InvalidCursorState)?;
        Ok(self.set.remove_by_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<'a>(set: &'a FrequencySet<&'a str>) -> Vec<&'a str> {
        set.iter().copied().collect()
    }

    #[test]
    fn add_new_and_touch_existing() {
        let mut set = FrequencySet::new();
        assert!(set.add("a"));
        assert_eq!(set.len(), 1);

        assert!(!set.add("a"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.weight(&"a"), Some(2));
        set.debug_validate_invariants();
    }

    #[test]
    fn top_tracks_most_touched_element() {
        let mut set = FrequencySet::new();
        assert_eq!(set.top(), Err(EmptyCollectionError));

        set.add("a");
        set.add("b");
        set.add("c");
        assert_eq!(set.top(), Ok(&"a"));

        set.add("c");
        set.add("c");
        assert_eq!(set.top(), Ok(&"c"));
        assert_eq!(order(&set), vec!["c", "a", "b"]);
        set.debug_validate_invariants();
    }

    #[test]
    fn touch_without_competitor_keeps_position() {
        let mut set = FrequencySet::new();
        set.add("a");
        set.add("b");

        set.add("b"); // b: 2 > a: 1
        assert_eq!(order(&set), vec!["b", "a"]);

        set.add("b"); // b: 3, nothing to overtake
        assert_eq!(order(&set), vec!["b", "a"]);
        set.debug_validate_invariants();
    }

    #[test]
    fn remove_forgets_weight() {
        let mut set = FrequencySet::new();
        set.add("a");
        set.add("a");
        set.add("a");
        assert_eq!(set.weight(&"a"), Some(3));

        assert!(set.remove(&"a"));
        assert!(!set.remove(&"a"));
        assert!(set.is_empty());

        set.add("a");
        assert_eq!(set.weight(&"a"), Some(1));
        set.debug_validate_invariants();
    }

    #[test]
    fn take_returns_stored_element() {
        let mut set = FrequencySet::new();
        set.add(String::from("a"));
        assert_eq!(set.take(&String::from("a")), Some(String::from("a")));
        assert_eq!(set.take(&String::from("a")), None);
    }

    #[test]
    fn iter_and_weighted_iter_agree_on_order() {
        let mut set = FrequencySet::new();
        set.add("a");
        set.add("b");
        set.add("b");
        set.add("c");

        assert_eq!(order(&set), vec!["b", "a", "c"]);
        let weighted: Vec<_> = set.weighted_iter().map(|(v, w)| (*v, w)).collect();
        assert_eq!(weighted, vec![("b", 2), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn iterating_empty_set_yields_nothing() {
        let mut set: FrequencySet<&str> = FrequencySet::new();
        assert_eq!(set.iter().next(), None);
        assert_eq!(set.weighted_iter().next(), None);
        assert!(!set.cursor().has_next());
    }

    #[test]
    fn cursor_advance_and_remove() {
        let mut set = FrequencySet::new();
        set.add("a");
        set.add("b");
        set.add("c");

        let mut cursor = set.cursor();
        assert_eq!(cursor.advance(), Ok(&"a"));
        assert_eq!(cursor.remove(), Ok("a"));
        assert_eq!(cursor.remove(), Err(CursorError::InvalidCursorState));

        assert_eq!(cursor.advance(), Ok(&"b"));
        assert_eq!(cursor.advance(), Ok(&"c"));
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), Err(CursorError::NoMoreElements));

        assert_eq!(set.len(), 2);
        assert!(!set.contains(&"a"));
        set.debug_validate_invariants();
    }

    #[test]
    fn cursor_remove_before_advance_is_rejected() {
        let mut set = FrequencySet::new();
        set.add("a");

        let mut cursor = set.cursor();
        assert_eq!(cursor.remove(), Err(CursorError::InvalidCursorState));
    }

    #[test]
    fn weighted_cursor_exposes_weights() {
        let mut set = FrequencySet::new();
        set.add("a");
        set.add("a");
        set.add("b");

        let mut cursor = set.weighted_cursor();
        assert_eq!(cursor.value(), Err(CursorError::InvalidCursorState));
        assert_eq!(cursor.advance(), Ok((&"a", 2)));
        assert_eq!(cursor.value(), Ok(&"a"));
        assert_eq!(cursor.weight(), Ok(2));
        assert_eq!(cursor.advance(), Ok((&"b", 1)));
        assert_eq!(cursor.weight(), Ok(1));
    }

    #[test]
    fn weighted_cursor_removing_head_keeps_traversal_consistent() {
        let mut set = FrequencySet::new();
        set.add("a");
        set.add("b");
        set.add("c");
        set.add("c"); // order: c, a, b

        let mut cursor = set.weighted_cursor();
        assert_eq!(cursor.advance(), Ok((&"c", 2)));
        assert_eq!(cursor.remove(), Ok("c"));

        assert_eq!(cursor.advance(), Ok((&"a", 1)));
        assert_eq!(cursor.advance(), Ok((&"b", 1)));
        assert!(!cursor.has_next());

        assert_eq!(set.len(), 2);
        assert_eq!(set.top(), Ok(&"a"));
        set.debug_validate_invariants();
    }

    #[test]
    fn from_iterator_counts_duplicates() {
        let set: FrequencySet<&str> = ["a", "b", "a", "c", "a", "b"].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.weight(&"a"), Some(3));
        assert_eq!(set.weight(&"b"), Some(2));
        assert_eq!(set.top(), Ok(&"a"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut set = FrequencySet::new();
        set.add("a");
        set.add("a");
        set.add("b");
        set.clear();

        assert!(set.is_empty());
        assert!(!set.contains(&"a"));
        assert_eq!(set.top(), Err(EmptyCollectionError));
        set.debug_validate_invariants();

        // The set is fully usable after a clear.
        set.add("a");
        assert_eq!(set.weight(&"a"), Some(1));
    }
}
