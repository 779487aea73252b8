//! The open list: a min-priority queue over queued nodes with support for
//! removing an arbitrary, still-present element.
//!
//! A node's cost can improve several times before it settles, so the queue
//! must support true decrease-key. Re-ranking is remove-then-reinsert; the
//! parallel position table below makes the removal O(log n) instead of a
//! linear scan.

use std::fmt::Debug;

use nonmax::NonMaxU32;
use thiserror::Error;

use crate::graph::NodeId;
use crate::heap_primitives::index_first_child;
use crate::heap_primitives::index_last_child;
use crate::heap_primitives::index_parent;

#[derive(Debug, Error, PartialEq)]
pub enum HeapError {
    /// Removal was requested for a node that is not queued. When the engine's
    /// invariants hold this cannot happen, so hitting it means the queue and
    /// the labels went out of sync somewhere upstream.
    #[error("{0} is not queued")]
    NotQueued(NodeId),
}

/// Heap entries carry just the ranking value and the node id, so heap
/// operations move as little data as possible.
#[derive(Copy, Clone, Debug)]
struct HeapEntry<R> {
    rank: R,
    node: NodeId,
}

/// Array-backed binary min-heap of `(rank, node)` entries.
///
/// `positions` is indexed by node id and tracks where each queued node
/// currently sits:
///
/// ```pseudocode
/// for (slot, entry) in self.entries.enumerate():
///   assert_eq(self.positions[entry.node], slot)
/// ```
#[derive(Debug)]
pub struct OpenHeap<R> {
    entries: Vec<HeapEntry<R>>,
    positions: Vec<Option<NonMaxU32>>,
}

impl<R> OpenHeap<R>
where
    R: Copy + Ord + Debug,
{
    /// An empty queue able to hold nodes with ids in `0..size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            entries: Vec::new(),
            positions: vec![None; size],
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.position(node).is_some()
    }

    pub fn insert(&mut self, node: NodeId, rank: R) {
        debug_assert!(!self.contains(node), "{node} is already queued");

        let slot = self.entries.len();
        self.entries.push(HeapEntry { rank, node });
        self.set_position(slot);
        self.sift_up(slot);
        self.verify();
    }

    /// Removes and returns the best-ranked entry.
    pub fn extract_min(&mut self) -> Option<(NodeId, R)> {
        self.verify();
        let entry = match self.entries.len() {
            0 | 1 => self.entries.pop()?,
            _ => {
                let last = self.entries.len() - 1;
                self.entries.swap(0, last);
                let entry = self.entries.pop()?;
                self.set_position(0);
                self.sift_down(0);
                entry
            }
        };
        self.positions[entry.node.index()] = None;
        self.verify();
        Some((entry.node, entry.rank))
    }

    /// Removes `node` from wherever it currently sits in the queue.
    pub fn remove(&mut self, node: NodeId) -> Result<(), HeapError> {
        let Some(slot) = self.position(node) else {
            log::error!("removal requested for {node}, which is not queued");
            return Err(HeapError::NotQueued(node));
        };
        self.positions[node.index()] = None;

        let last = self.entries.len() - 1;
        if slot == last {
            self.entries.pop();
        } else {
            self.entries.swap(slot, last);
            self.entries.pop();
            self.set_position(slot);
            // The filler came from the bottom but from another subtree, so it
            // may have to move either way.
            let slot = self.sift_down(slot);
            self.sift_up(slot);
        }
        self.verify();
        Ok(())
    }

    #[inline(always)]
    fn position(&self, node: NodeId) -> Option<usize> {
        self.positions[node.index()].map(|slot| slot.get() as usize)
    }

    #[inline(always)]
    fn set_position(&mut self, slot: usize) {
        let node = self.entries[slot].node;
        self.positions[node.index()] = NonMaxU32::new(slot as u32);
    }

    /// Raises an entry until its parent ranks no worse.
    /// Returns its new slot.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = index_parent(slot);
            if self.entries[parent].rank <= self.entries[slot].rank {
                break;
            }
            self.swap_entries(parent, slot);
            slot = parent;
        }
        slot
    }

    /// Lowers an entry below any better-ranked child.
    /// Returns its new slot.
    fn sift_down(&mut self, mut slot: usize) -> usize {
        let len = self.entries.len();
        loop {
            let first = index_first_child(slot);
            if first >= len {
                break;
            }
            // Best of the (at most two) children; ties keep the left one.
            let mut child = first;
            let second = index_last_child(slot);
            if second < len && self.entries[second].rank < self.entries[first].rank {
                child = second;
            }
            if self.entries[slot].rank <= self.entries[child].rank {
                break;
            }
            self.swap_entries(slot, child);
            slot = child;
        }
        slot
    }

    /// Swaps two entries, keeping the position table in sync.
    #[inline(always)]
    fn swap_entries(&mut self, l: usize, r: usize) {
        debug_assert!(l != r);
        self.entries.swap(l, r);
        self.set_position(l);
        self.set_position(r);
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify(&self) {}

    #[cfg(feature = "verify")]
    fn verify(&self) {
        for (slot, entry) in self.entries.iter().enumerate() {
            // Every entry has the right position recorded.
            debug_assert_eq!(
                self.position(entry.node),
                Some(slot),
                "{} is out of sync",
                entry.node,
            );

            // Every entry goes after its parent, if any.
            if slot == 0 {
                continue;
            }
            let parent = index_parent(slot);
            debug_assert!(
                self.entries[parent].rank <= self.entries[slot].rank,
                "entry[{parent}]={:?} !<= child [{slot}]={:?}, heap of len={}",
                self.entries[parent],
                self.entries[slot],
                self.entries.len(),
            );
        }
        debug_assert_eq!(self.positions.iter().flatten().count(), self.entries.len());
    }
}
