//! Binary min-heap ordering pending reservations.
//!
//! Entries carry a numeric priority plus an insertion sequence number that
//! is folded into the comparison, so equal priorities pop in
//! first-inserted-first-served order. The scheduler on top keys one heap
//! per book id, which keeps "next reservation for book X" an O(log n) pop
//! instead of a scan over a global queue.

use std::collections::HashMap;

struct Entry<T> {
    priority: u64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    fn rank(&self) -> (u64, u64) {
        (self.priority, self.seq)
    }
}

/// Binary heap with the minimum (priority, seq) pair at the root.
pub struct MinHeap<T> {
    heap: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Append then sift up.
    pub fn push(&mut self, priority: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<(u64, T)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop().unwrap();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.priority, entry.item))
    }

    pub fn peek(&self) -> Option<(u64, &T)> {
        self.heap.first().map(|e| (e.priority, &e.item))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].rank() < self.heap[parent].rank() {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;
            if left < self.heap.len() && self.heap[left].rank() < self.heap[smallest].rank() {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].rank() < self.heap[smallest].rank() {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

/// Per-book reservation scheduler: one min-heap per book id, plus a
/// per-book monotone priority counter. Cancelled reservations keep their
/// priority slot; the counter never rewinds.
#[derive(Default)]
pub struct PriorityScheduler {
    queues: HashMap<String, MinHeap<String>>,
    counters: HashMap<String, u64>,
}

impl PriorityScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next priority slot for a book. Priorities start at 0
    /// and only ever grow, so pop order is first-reserved-first-served.
    pub fn next_priority(&mut self, book_id: &str) -> u64 {
        let counter = self.counters.entry(book_id.to_string()).or_insert(0);
        let priority = *counter;
        *counter += 1;
        priority
    }

    /// Re-occupy a slot observed in ingested data, so future priorities
    /// are assigned past it.
    pub fn restore_slot(&mut self, book_id: &str, priority: u64) {
        let counter = self.counters.entry(book_id.to_string()).or_insert(0);
        *counter = (*counter).max(priority + 1);
    }

    pub fn enqueue(&mut self, book_id: &str, priority: u64, reservation_id: String) {
        self.queues
            .entry(book_id.to_string())
            .or_default()
            .push(priority, reservation_id);
    }

    /// Pop the lowest-priority reservation id queued for a book.
    pub fn next_for(&mut self, book_id: &str) -> Option<(u64, String)> {
        self.queues.get_mut(book_id)?.pop()
    }

    /// Number of reservations currently queued for a book.
    pub fn queued_for(&self, book_id: &str) -> usize {
        self.queues.get(book_id).map_or(0, MinHeap::len)
    }

    pub fn len(&self) -> usize {
        self.queues.values().map(MinHeap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
