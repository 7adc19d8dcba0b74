//! `Frontier` — the open set of a best-first graph search.
//!
//! # Why not `BinaryHeap`
//!
//! `std::collections::BinaryHeap` cannot change the priority of an element
//! already inside it, so searches built on it push a duplicate on every
//! relaxation and skip stale entries on pop.  `Frontier` is a binary min-heap
//! that also keeps a `NodeIdx → heap slot` table, which makes
//! [`decrease_key`](Frontier::decrease_key) an in-place O(log n) sift and
//! keeps every node in the heap at most once.
//!
//! # Ordering
//!
//! Entries are ordered by `(priority, insertion sequence)`.  Two nodes with
//! equal priority pop in the order they were first pushed, so a search over
//! a fixed graph is fully deterministic.

use wf_core::NodeIdx;

const NOT_QUEUED: u32 = u32::MAX;

#[derive(Copy, Clone, Debug)]
struct Entry {
    node:     NodeIdx,
    priority: f64,
    seq:      u64,
}

impl Entry {
    #[inline]
    fn precedes(&self, other: &Entry) -> bool {
        match self.priority.total_cmp(&other.priority) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => self.seq < other.seq,
        }
    }
}

/// Indexed min-heap over the nodes of one graph.
pub struct Frontier {
    heap:     Vec<Entry>,
    /// Heap slot of each node, or `NOT_QUEUED`.  Length = node count.
    slot:     Vec<u32>,
    next_seq: u64,
}

impl Frontier {
    /// An empty frontier able to hold any node index below `node_count`.
    pub fn new(node_count: usize) -> Self {
        Self {
            heap:     Vec::new(),
            slot:     vec![NOT_QUEUED; node_count],
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeIdx) -> bool {
        self.slot[node.index()] != NOT_QUEUED
    }

    /// Current priority of `node`, if queued.
    pub fn priority(&self, node: NodeIdx) -> Option<f64> {
        let slot = self.slot[node.index()];
        (slot != NOT_QUEUED).then(|| self.heap[slot as usize].priority)
    }

    /// Insert `node`.  If it is already queued this behaves like
    /// [`decrease_key`](Self::decrease_key).
    pub fn push(&mut self, node: NodeIdx, priority: f64) {
        if self.contains(node) {
            self.decrease_key(node, priority);
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self.heap.len();
        self.heap.push(Entry { node, priority, seq });
        self.slot[node.index()] = at as u32;
        self.sift_up(at);
    }

    /// Remove and return the node with the lowest priority.
    pub fn pop_min(&mut self) -> Option<(NodeIdx, f64)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.slot[top.node.index()] = NOT_QUEUED;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top.node, top.priority))
    }

    /// Lower the priority of a queued node.
    ///
    /// Returns `false`, leaving the heap untouched, if `node` is not queued
    /// or `priority` is not lower than its current one.
    pub fn decrease_key(&mut self, node: NodeIdx, priority: f64) -> bool {
        let slot = self.slot[node.index()];
        if slot == NOT_QUEUED {
            return false;
        }
        let at = slot as usize;
        if priority >= self.heap[at].priority {
            return false;
        }
        self.heap[at].priority = priority;
        self.sift_up(at);
        true
    }

    // ── Heap internals ────────────────────────────────────────────────────

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.slot[self.heap[i].node.index()] = i as u32;
        self.slot[self.heap[j].node.index()] = j as u32;
    }

    fn sift_up(&mut self, mut at: usize) {
        while at > 0 {
            let parent = (at - 1) / 2;
            if !self.heap[at].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(at, parent);
            at = parent;
        }
    }

    fn sift_down(&mut self, mut at: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * at + 1;
            let right = left + 1;
            let mut best = at;
            if left < len && self.heap[left].precedes(&self.heap[best]) {
                best = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[best]) {
                best = right;
            }
            if best == at {
                break;
            }
            self.swap(at, best);
            at = best;
        }
    }
}
