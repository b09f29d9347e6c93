/*!
 * Bounded top-N heap
 *
 * Keeps the `capacity` most recently modified entries seen so far in a
 * fixed-size binary min-heap. The oldest retained entry sits at the root, so
 * deciding whether a newcomer deserves a slot is a single comparison, and
 * admitting it costs one sift-down.
 *
 * Ties go to whoever arrived first: once the heap is full, an entry whose
 * timestamp merely equals the current minimum is rejected.
 */

use crate::config::OutputOrder;
use crate::core::entry::{Entry, ModTime};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeapError {
    #[error("heap capacity must be at least 1")]
    InvalidCapacity,

    #[error("unable to allocate storage for {capacity} entries")]
    Allocation { capacity: usize },
}

/// Result of offering an entry to a [`BoundedTopHeap`]
#[derive(Debug, PartialEq, Eq)]
pub enum OfferOutcome {
    /// Stored in a free slot
    Admitted,
    /// Stored in place of the previous oldest entry, which is handed back
    Evicted(Entry),
    /// Not stored; the entry is handed back untouched
    Rejected(Entry),
}

impl OfferOutcome {
    /// Whether the offered entry now lives in the heap
    pub fn is_admitted(&self) -> bool {
        !matches!(self, OfferOutcome::Rejected(_))
    }
}

/// Fixed-capacity min-heap keyed by modification time
#[derive(Debug)]
pub struct BoundedTopHeap {
    capacity: usize,
    entries: Vec<Entry>,
}

impl BoundedTopHeap {
    /// Create an empty heap holding at most `capacity` entries.
    ///
    /// Storage for the full capacity is reserved immediately so that a
    /// run which cannot fit its working set fails before reading any input.
    pub fn new(capacity: usize) -> Result<Self, HeapError> {
        if capacity == 0 {
            return Err(HeapError::InvalidCapacity);
        }

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| HeapError::Allocation { capacity })?;

        Ok(Self { capacity, entries })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// The oldest retained entry, i.e. the bar a newcomer has to clear
    pub fn peek_oldest(&self) -> Option<&Entry> {
        self.entries.first()
    }

    /// Retained entries in internal heap order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Offer an entry, evicting the oldest one if the heap is full and the
    /// newcomer is strictly more recent.
    pub fn offer(&mut self, entry: Entry) -> OfferOutcome {
        if self.entries.len() < self.capacity {
            self.entries.push(entry);
            self.sift_up(self.entries.len() - 1);
            return OfferOutcome::Admitted;
        }

        // Full: capacity >= 1 guarantees a root
        if entry.modtime() <= self.entries[0].modtime() {
            return OfferOutcome::Rejected(entry);
        }

        let evicted = std::mem::replace(&mut self.entries[0], entry);
        self.sift_down(0);
        OfferOutcome::Evicted(evicted)
    }

    /// Remove and return the oldest retained entry
    pub fn pop(&mut self) -> Option<Entry> {
        if self.entries.is_empty() {
            return None;
        }

        // Moves the last element into the root slot
        let oldest = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(oldest)
    }

    /// Consume the heap, yielding entries oldest first
    pub fn drain_ascending(self) -> DrainAscending {
        DrainAscending { heap: self }
    }

    /// Consume the heap into a vector in the requested presentation order
    pub fn into_sorted_vec(self, order: OutputOrder) -> Vec<Entry> {
        let mut sorted: Vec<Entry> = self.drain_ascending().collect();
        if order == OutputOrder::NewestFirst {
            sorted.reverse();
        }
        sorted
    }

    /// Check the min-heap property over every parent/child pair
    pub fn is_heap_ordered(&self) -> bool {
        (1..self.entries.len()).all(|i| self.key(parent_of(i)) <= self.key(i))
    }

    fn key(&self, index: usize) -> ModTime {
        self.entries[index].modtime()
    }

    /// Move the element at `index` towards the root until its parent is not newer
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = parent_of(index);
            if self.key(parent) <= self.key(index) {
                break;
            }
            self.entries.swap(parent, index);
            index = parent;
        }
    }

    /// Move the element at `index` towards the leaves until it is not newer
    /// than its smaller child. The left child wins unless the right one is
    /// strictly older.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let mut child = 2 * index + 1;
            if child >= len {
                break;
            }
            let right = child + 1;
            if right < len && self.key(right) < self.key(child) {
                child = right;
            }
            if self.key(index) <= self.key(child) {
                break;
            }
            self.entries.swap(index, child);
            index = child;
        }
    }
}

fn parent_of(index: usize) -> usize {
    (index - 1) / 2
}

/// Iterator returned by [`BoundedTopHeap::drain_ascending`]
#[derive(Debug)]
pub struct DrainAscending {
    heap: BoundedTopHeap,
}

impl Iterator for DrainAscending {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl ExactSizeIterator for DrainAscending {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn entry(secs: i64, sequence: u64) -> Entry {
        Entry::new(format!("file-{sequence}"), ModTime::from_unix_seconds(secs), sequence)
    }

    fn offer_all(heap: &mut BoundedTopHeap, times: &[i64]) -> Vec<bool> {
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| heap.offer(entry(t, i as u64 + 1)).is_admitted())
            .collect()
    }

    fn secs(entries: &[Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.modtime().unix_seconds()).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(BoundedTopHeap::new(0).unwrap_err(), HeapError::InvalidCapacity);
    }

    #[test]
    fn test_huge_capacity_fails_allocation() {
        let err = BoundedTopHeap::new(usize::MAX).unwrap_err();
        assert_eq!(err, HeapError::Allocation { capacity: usize::MAX });
    }

    #[test]
    fn test_new_heap_is_empty() {
        let heap = BoundedTopHeap::new(4).unwrap();
        assert_eq!(heap.capacity(), 4);
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());
        assert!(!heap.is_full());
        assert!(heap.peek_oldest().is_none());
    }

    #[test]
    fn test_capacity_two_walkthrough() {
        let mut heap = BoundedTopHeap::new(2).unwrap();

        assert_eq!(heap.offer(entry(10, 1)), OfferOutcome::Admitted);
        assert_eq!(secs(&heap.iter().cloned().collect::<Vec<_>>()), vec![10]);

        assert_eq!(heap.offer(entry(20, 2)), OfferOutcome::Admitted);
        assert!(heap.is_full());

        let rejected = heap.offer(entry(5, 3));
        assert_eq!(rejected, OfferOutcome::Rejected(entry(5, 3)));
        assert_eq!(heap.peek_oldest().unwrap().modtime(), ModTime::from_unix_seconds(10));

        let evicted = heap.offer(entry(30, 4));
        assert_eq!(evicted, OfferOutcome::Evicted(entry(10, 1)));

        assert_eq!(heap.pop().unwrap().modtime().unix_seconds(), 20);
        assert_eq!(heap.pop().unwrap().modtime().unix_seconds(), 30);
        assert!(heap.pop().is_none());
    }

    #[test]
    fn test_equal_timestamps_keep_earliest() {
        let mut heap = BoundedTopHeap::new(3).unwrap();
        let admitted = offer_all(&mut heap, &[7, 7, 7, 7]);
        assert_eq!(admitted, vec![true, true, true, false]);
        assert_eq!(heap.len(), 3);

        let mut sequences: Vec<u64> = heap.iter().map(Entry::sequence).collect();
        sequences.sort_unstable();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert!(heap.iter().all(|e| e.modtime() == ModTime::from_unix_seconds(7)));
    }

    fn pop_sequences(heap: &mut BoundedTopHeap) -> Vec<u64> {
        std::iter::from_fn(|| heap.pop()).map(|e| e.sequence()).collect()
    }

    #[test]
    fn test_equal_timestamps_pop_order() {
        // Equal keys never swap: sift-up stops at an equal parent and
        // sift-down stops at an equal child.
        let mut heap = BoundedTopHeap::new(3).unwrap();
        offer_all(&mut heap, &[7, 7, 7]);
        let order: Vec<u64> = heap.iter().map(Entry::sequence).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(pop_sequences(&mut heap), vec![1, 3, 2]);
    }

    #[test]
    fn test_sift_down_prefers_left_child_on_tie() {
        let mut heap = BoundedTopHeap::new(4).unwrap();
        offer_all(&mut heap, &[1, 5, 5, 9]);
        assert_eq!(pop_sequences(&mut heap), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_tie_with_minimum_rejected_but_newer_admitted() {
        let mut heap = BoundedTopHeap::new(2).unwrap();
        offer_all(&mut heap, &[5, 9]);

        assert!(!heap.offer(entry(5, 10)).is_admitted());
        assert!(heap.offer(entry(6, 11)).is_admitted());
        assert_eq!(heap.peek_oldest().unwrap().modtime().unix_seconds(), 6);
    }

    #[test]
    fn test_capacity_one() {
        let mut heap = BoundedTopHeap::new(1).unwrap();
        assert_eq!(offer_all(&mut heap, &[1, 2, 3]), vec![true, true, true]);
        assert_eq!(heap.pop().unwrap().modtime().unix_seconds(), 3);
        assert!(heap.pop().is_none());
    }

    #[test]
    fn test_pop_empty_is_idempotent() {
        let mut heap = BoundedTopHeap::new(5).unwrap();
        assert!(heap.pop().is_none());
        assert!(heap.pop().is_none());
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_eviction_returns_previous_minimum() {
        let mut heap = BoundedTopHeap::new(3).unwrap();
        offer_all(&mut heap, &[40, 10, 30]);

        match heap.offer(entry(50, 99)) {
            OfferOutcome::Evicted(old) => {
                assert_eq!(old.modtime().unix_seconds(), 10);
                assert_eq!(old.sequence(), 2);
            }
            other => panic!("expected eviction, got {:?}", other),
        }
        assert_eq!(heap.len(), 3);
        assert!(heap.iter().all(|e| e.sequence() != 2));
    }

    #[test]
    fn test_into_sorted_vec_orders() {
        let mut heap = BoundedTopHeap::new(4).unwrap();
        offer_all(&mut heap, &[3, 1, 4, 1, 5, 9, 2, 6]);
        let newest = heap.into_sorted_vec(OutputOrder::NewestFirst);
        assert_eq!(secs(&newest), vec![9, 6, 5, 4]);

        let mut heap = BoundedTopHeap::new(4).unwrap();
        offer_all(&mut heap, &[3, 1, 4, 1, 5, 9, 2, 6]);
        let oldest = heap.into_sorted_vec(OutputOrder::OldestFirst);
        assert_eq!(secs(&oldest), vec![4, 5, 6, 9]);
    }

    #[test]
    fn test_drain_ascending_size_hint() {
        let mut heap = BoundedTopHeap::new(3).unwrap();
        offer_all(&mut heap, &[2, 8, 5]);
        let mut drain = heap.drain_ascending();
        assert_eq!(drain.len(), 3);
        drain.next();
        assert_eq!(drain.len(), 2);
    }

    #[test]
    fn test_randomised_invariants_and_top_n() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for round in 0..200 {
            let capacity = rng.random_range(1..12);
            let count = rng.random_range(0..60);
            let times: Vec<i64> = (0..count).map(|_| rng.random_range(0..25)).collect();

            let mut heap = BoundedTopHeap::new(capacity).unwrap();
            let mut held = 0usize;

            for (i, &t) in times.iter().enumerate() {
                let was_full = heap.is_full();
                let min_before = heap.peek_oldest().map(Entry::modtime);

                let outcome = heap.offer(entry(t, i as u64 + 1));

                if was_full {
                    let min_before = min_before.unwrap();
                    let expect_admit = ModTime::from_unix_seconds(t) > min_before;
                    assert_eq!(outcome.is_admitted(), expect_admit, "round {round}");
                    match outcome {
                        OfferOutcome::Evicted(old) => assert_eq!(old.modtime(), min_before),
                        OfferOutcome::Rejected(back) => assert_eq!(back.sequence(), i as u64 + 1),
                        OfferOutcome::Admitted => panic!("free slot reported while full"),
                    }
                } else {
                    assert_eq!(outcome, OfferOutcome::Admitted);
                    held += 1;
                }

                assert!(heap.len() <= capacity);
                assert_eq!(heap.len(), held);
                assert!(heap.is_heap_ordered(), "round {round}");
            }

            // The retained timestamps are the largest ones offered
            let mut expected = times.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(capacity);
            expected.reverse();

            let mut drained = Vec::new();
            while let Some(e) = heap.pop() {
                assert!(heap.is_heap_ordered());
                drained.push(e);
            }
            assert_eq!(secs(&drained), expected, "round {round}");
        }
    }

    #[test]
    fn test_distinct_timestamps_select_exact_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut times: Vec<i64> = (0..500).collect();
        // Fisher-Yates so every timestamp is distinct
        for i in (1..times.len()).rev() {
            let j = rng.random_range(0..=i);
            times.swap(i, j);
        }

        let mut heap = BoundedTopHeap::new(10).unwrap();
        offer_all(&mut heap, &times);

        let kept = heap.into_sorted_vec(OutputOrder::NewestFirst);
        assert_eq!(secs(&kept), (490..500).rev().collect::<Vec<_>>());
    }
}
