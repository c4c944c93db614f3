//! Arena-backed doubly linked recency list.
//!
//! Entries live in a `Vec` of slots and link to each other by slot index, so
//! relinking is O(1) without raw pointers. Vacated slots are threaded onto a
//! free list and reused by later insertions.
//!
//! The list runs from the front (least recently used) to the back (most
//! recently used). An empty list has neither a head nor a tail; there is no
//! placeholder node occupying a slot.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::mem;

/// Stable handle to an entry in a [`List`].
///
/// A handle stays valid until the entry is unlinked or popped; after that the
/// slot may be reused by an unrelated entry.
pub(crate) type Index = usize;

/// A node in the list: the stored value plus its neighbours.
pub(crate) struct Entry<T> {
    val: T,
    prev: Option<Index>,
    next: Option<Index>,
}

enum Slot<T> {
    Occupied(Entry<T>),
    Vacant { next_free: Option<Index> },
}

/// Doubly linked list over an arena of slots.
pub(crate) struct List<T> {
    slots: Vec<Slot<T>>,
    /// Head of the free slot chain.
    free: Option<Index>,
    /// Least recently used entry.
    head: Option<Index>,
    /// Most recently used entry.
    tail: Option<Index>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list with room for `cap` entries before reallocating.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        List {
            slots: Vec::with_capacity(cap),
            free: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<Index> {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> Option<Index> {
        self.tail
    }

    fn entry(&self, idx: Index) -> Option<&Entry<T>> {
        match self.slots.get(idx) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    fn entry_mut(&mut self, idx: Index) -> Option<&mut Entry<T>> {
        match self.slots.get_mut(idx) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Returns the value stored at `idx`, if the slot is live.
    #[inline]
    pub(crate) fn get(&self, idx: Index) -> Option<&T> {
        self.entry(idx).map(|entry| &entry.val)
    }

    /// Returns a mutable reference to the value stored at `idx`.
    #[inline]
    pub(crate) fn get_mut(&mut self, idx: Index) -> Option<&mut T> {
        self.entry_mut(idx).map(|entry| &mut entry.val)
    }

    /// Stores `val` in a free slot (or a new one) and returns its index.
    /// The entry is not linked yet.
    fn allocate(&mut self, val: T) -> Index {
        let entry = Entry {
            val,
            prev: None,
            next: None,
        };
        match self.free {
            Some(idx) => {
                let slot = mem::replace(&mut self.slots[idx], Slot::Occupied(entry));
                self.free = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => None,
                };
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(entry));
                self.slots.len() - 1
            }
        }
    }

    /// Links an unlinked entry after the current tail.
    fn attach_last(&mut self, idx: Index) {
        let old_tail = self.tail;
        if let Some(entry) = self.entry_mut(idx) {
            entry.prev = old_tail;
            entry.next = None;
        } else {
            return;
        }
        match old_tail.and_then(|t| self.entry_mut(t)) {
            Some(tail) => tail.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Unlinks an entry, repairing both neighbours and the head/tail markers.
    /// The slot stays occupied.
    fn detach(&mut self, idx: Index) {
        let (prev, next) = match self.entry_mut(idx) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };
        match prev.and_then(|p| self.entry_mut(p)) {
            Some(entry) => entry.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.entry_mut(n)) {
            Some(entry) => entry.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Appends `val` as the most recently used entry and returns its handle.
    pub(crate) fn push_back(&mut self, val: T) -> Index {
        let idx = self.allocate(val);
        self.attach_last(idx);
        self.len += 1;
        idx
    }

    /// Moves a live entry to the back of the list.
    ///
    /// Returns `false` if `idx` does not refer to a live entry.
    pub(crate) fn move_to_back(&mut self, idx: Index) -> bool {
        if self.entry(idx).is_none() {
            return false;
        }
        if self.tail == Some(idx) {
            return true;
        }
        self.detach(idx);
        self.attach_last(idx);
        true
    }

    /// Removes the entry at `idx` from the list and frees its slot.
    pub(crate) fn remove(&mut self, idx: Index) -> Option<T> {
        self.entry(idx)?;
        self.detach(idx);
        let slot = mem::replace(
            &mut self.slots[idx],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(idx);
        self.len -= 1;
        match slot {
            Slot::Occupied(entry) => Some(entry.val),
            Slot::Vacant { .. } => None,
        }
    }

    /// Removes and returns the least recently used value.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(head)
    }

    /// Drops every entry and releases the arena's slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates from the least to the most recently used value.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    next: Option<Index>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.entry(self.next?)?;
        self.next = entry.next;
        self.remaining -= 1;
        Some(&entry.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
