//! Weight-ordered doubly linked chain backed by `SlotArena`.
//!
//! Stores value/weight nodes in a `SlotArena` and links them by `SlotId`,
//! keeping the chain sorted by non-increasing weight from head to tail.
//! New nodes enter at the tail with weight 1; a touch increments a node's
//! weight and repositions it with a targeted backward scan instead of a
//! resort.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<E>>)
//!   ┌────────┬──────────────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, weight, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, weight: 5, prev: None, next: id_2 }      │
//!   │ id_2   │ { value: B, weight: 3, prev: id_1, next: id_3 }      │
//!   │ id_3   │ { value: C, weight: 1, prev: id_2, next: None }      │
//!   └────────┴──────────────────────────────────────────────────────┘
//!
//!   head (most frequent) ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Operations
//! - `push_back(value)`: new node, weight 1, appended at tail
//! - `touch(id)`: weight + 1, reposition toward the head if needed
//! - `remove(id)`: detach + free slot in arena
//!
//! Ties are broken by relative position at the time of the last reorder:
//! a touched node lands immediately after the nearest node of equal or
//! greater weight, so among equals the last toucher ends up earlier.
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<E> {
    value: E,
    weight: u64,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug)]
/// Doubly linked chain of value/weight nodes in non-increasing weight order.
pub struct FreqChain<E> {
    arena: SlotArena<Node<E>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<E> FreqChain<E> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty chain with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this chain.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the SlotId of the most frequent node.
    pub fn head_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the SlotId of the least frequent node.
    pub fn tail_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value stored at `id`, if present.
    pub fn value(&self, id: SlotId) -> Option<&E> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns the weight of the node at `id`, if present.
    pub fn weight(&self, id: SlotId) -> Option<u64> {
        self.arena.get(id).map(|node| node.weight)
    }

    /// Returns the id of the node after `id`, if any.
    pub fn next_id(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).and_then(|node| node.next)
    }

    /// Returns the id of the node before `id`, if any.
    pub fn prev_id(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).and_then(|node| node.prev)
    }

    /// Appends a new node with weight 1 at the tail and returns its `SlotId`.
    pub fn push_back(&mut self, value: E) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            weight: 1,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail_id) => self.node_mut(tail_id).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Removes the node `id` from the chain and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<E> {
        if !self.arena.contains(id) {
            return None;
        }
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Increments the weight of the node `id` and restores weight order.
    ///
    /// Returns the new weight, or `None` if `id` is not in the chain.
    ///
    /// The common case relocates nothing: if the node is already the head,
    /// or its predecessor still carries at least the new weight, the order
    /// already holds. Otherwise the insertion point is found by scanning
    /// backward from an anchor (the head when the head itself no longer
    /// outweighs the node, the old predecessor otherwise), stopping at the
    /// nearest node whose weight is not strictly below the new weight.
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let node = self.arena.get_mut(id)?;
        node.weight += 1;
        let weight = node.weight;
        let parent = node.prev;

        // Strict comparison only: a tie with the predecessor stays put.
        match parent {
            None => return Some(weight),
            Some(parent_id) => {
                if self.node(parent_id).weight >= weight {
                    return Some(weight);
                }
            }
        }

        let head_id = self.head.expect("chain head missing with a linked node");
        let mut anchor = if self.node(head_id).weight <= weight {
            Some(head_id)
        } else {
            parent
        };

        while let Some(anchor_id) = anchor {
            if self.node(anchor_id).weight < weight {
                anchor = self.node(anchor_id).prev;
            } else {
                break;
            }
        }

        self.detach(id);
        match anchor {
            Some(anchor_id) => self.attach_after(id, anchor_id),
            None => self.attach_front(id),
        }
        Some(weight)
    }

    /// Clears the chain and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator of SlotIds from head to tail.
    pub fn iter_ids(&self) -> ChainIdIter<'_, E> {
        ChainIdIter {
            chain: self,
            current: self.head,
        }
    }

    /// Returns an iterator of `(&value, weight)` pairs from head to tail.
    pub fn iter_entries(&self) -> ChainEntryIter<'_, E> {
        ChainEntryIter {
            chain: self,
            current: self.head,
        }
    }

    /// Checks structural invariants: link symmetry, non-increasing weight
    /// order, and agreement between walk counts and the arena length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new(
                    "head and tail must be both set or both empty",
                ));
            }
            if self.len() != 0 {
                return Err(InvariantError::new("empty chain with live nodes"));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        let mut prev_weight = u64::MAX;

        while let Some(id) = current {
            if count >= self.len() {
                return Err(InvariantError::new("forward walk cycles"));
            }
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("chain links to a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("prev link does not mirror next link"));
            }
            if node.weight > prev_weight {
                return Err(InvariantError::new("weight increases along head -> tail"));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err(InvariantError::new("forward walk ends off the tail"));
            }
            prev = Some(id);
            prev_weight = node.weight;
            current = node.next;
            count += 1;
        }

        if count != self.len() {
            return Err(InvariantError::new("forward walk count differs from len"));
        }

        let mut back_count = 0usize;
        let mut current = self.tail;
        while let Some(id) = current {
            back_count += 1;
            if back_count > count {
                return Err(InvariantError::new("backward walk exceeds forward count"));
            }
            current = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("chain links to a freed slot"))?
                .prev;
        }
        if back_count != count {
            return Err(InvariantError::new("backward walk count differs from len"));
        }

        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("freq chain invariant violated: {err}");
        }
    }

    fn node(&self, id: SlotId) -> &Node<E> {
        self.arena.get(id).expect("chain node missing")
    }

    fn node_mut(&mut self, id: SlotId) -> &mut Node<E> {
        self.arena.get_mut(id).expect("chain node missing")
    }

    fn detach(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => self.node_mut(prev_id).next = next,
            None => self.head = next,
        }
        match next {
            Some(next_id) => self.node_mut(next_id).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(id);
        node.prev = None;
        node.next = None;
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        {
            let node = self.node_mut(id);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head_id) => self.node_mut(head_id).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn attach_after(&mut self, id: SlotId, anchor: SlotId) {
        let anchor_next = self.node(anchor).next;
        {
            let node = self.node_mut(id);
            node.prev = Some(anchor);
            node.next = anchor_next;
        }
        self.node_mut(anchor).next = Some(id);
        match anchor_next {
            Some(next_id) => {
                self.node_mut(next_id).prev = Some(id);
                // Corruption guard: the successor chain must not loop
                // straight back to the anchor after a relink.
                if self.node(next_id).next == Some(anchor) {
                    panic!(
                        "freq chain corrupted: relink after slot {} formed a two-node cycle",
                        anchor.index()
                    );
                }
            }
            None => self.tail = Some(id),
        }
    }
}

impl<E> Default for FreqChain<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over SlotIds from head to tail.
pub struct ChainIdIter<'a, E> {
    chain: &'a FreqChain<E>,
    current: Option<SlotId>,
}

impl<E> Iterator for ChainIdIter<'_, E> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.chain.next_id(id);
        Some(id)
    }
}

/// Iterator over `(&value, weight)` pairs from head to tail.
pub struct ChainEntryIter<'a, E> {
    chain: &'a FreqChain<E>,
    current: Option<SlotId>,
}

impl<'a, E> Iterator for ChainEntryIter<'a, E> {
    type Item = (&'a E, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.chain.arena.get(id)?;
        self.current = node.next;
        Some((&node.value, node.weight))
    }
}
