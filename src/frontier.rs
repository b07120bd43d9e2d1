use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct FrontierEntry<K> {
    estimated_cost: K,
    order: u64,
    index: usize,
}

impl<K: Ord> Eq for FrontierEntry<K> {}

impl<K: Ord> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the BinaryHeap pops the smallest estimate first. Equal estimates
        // are popped in insertion order.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.order.cmp(&self.order))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Min-priority queue of node indices keyed by `(estimated_cost, insertion order, index)`.
/// Entries are never removed early: pushing an index again with a better estimate leaves the
/// old entry in place, and the search skips it when it comes out.
pub struct Frontier<K> {
    heap: BinaryHeap<FrontierEntry<K>>,
    counter: u64,
}

impl<K: Ord> Frontier<K> {
    pub fn new() -> Frontier<K> {
        Frontier {
            heap: BinaryHeap::new(),
            counter: 0,
        }
    }

    pub fn push(&mut self, estimated_cost: K, index: usize) {
        self.heap.push(FrontierEntry {
            estimated_cost,
            order: self.counter,
            index,
        });
        self.counter += 1;
    }

    /// Removes the entry with the smallest key and returns its estimate and index.
    pub fn pop(&mut self) -> Option<(K, usize)> {
        self.heap
            .pop()
            .map(|entry| (entry.estimated_cost, entry.index))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<K: Ord> Default for Frontier<K> {
    fn default() -> Self {
        Frontier::new()
    }
}
