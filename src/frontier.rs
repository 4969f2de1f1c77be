use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// The container of routes that are waiting to be expanded.
///
/// The order in which items come back out is what tells the search algorithms apart.
/// Disciplines that do not order by cost simply ignore `priority`.
pub trait Frontier<T> {
    /// Inserts `item` with the given priority (lower pops first where it matters).
    fn push(&mut self, item: T, priority: f64);

    /// Removes the next item according to the discipline.
    fn pop(&mut self) -> Option<T>;

    /// Number of items waiting, stale entries included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last-in-first-out frontier used by depth-first search.
#[derive(Debug)]
pub struct StackFrontier<T> {
    items: Vec<T>,
}

impl<T> Default for StackFrontier<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Frontier<T> for StackFrontier<T> {
    fn push(&mut self, item: T, _priority: f64) {
        self.items.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// First-in-first-out frontier used by breadth-first search.
#[derive(Debug)]
pub struct QueueFrontier<T> {
    items: VecDeque<T>,
}

impl<T> Default for QueueFrontier<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Frontier<T> for QueueFrontier<T> {
    fn push(&mut self, item: T, _priority: f64) {
        self.items.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Min-priority frontier used by uniform-cost and A* search.
///
/// Items with equal priority come out in insertion order.
#[derive(Debug)]
pub struct PriorityFrontier<T> {
    heap: BinaryHeap<Prioritized<T>>,
    inserted: u64,
}

impl<T> Default for PriorityFrontier<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            inserted: 0,
        }
    }
}

impl<T> Frontier<T> for PriorityFrontier<T> {
    fn push(&mut self, item: T, priority: f64) {
        self.heap.push(Prioritized {
            priority,
            sequence: self.inserted,
            item,
        });
        self.inserted += 1;
    }

    fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Debug)]
struct Prioritized<T> {
    priority: f64,
    sequence: u64,
    item: T,
}

// `BinaryHeap` is a max-heap, so both keys are compared in reverse.
impl<T> Ord for Prioritized<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for Prioritized<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Prioritized<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Prioritized<T> {}
