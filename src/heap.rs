//! Binary heap with lookup and erase of arbitrary elements
//!
//! `std::collections::BinaryHeap` only exposes its root. Path search needs to
//! find an already queued entry and change its priority, so this heap also
//! supports `exists`, `index_of` and `erase` by value.
//!
//! Those three operations are linear scans over the backing storage. There
//! is no position index; callers that re-prioritize pay O(n) per lookup.

use std::marker::PhantomData;

/// Ordering policy for a [`PriorityHeap`]
pub trait HeapOrder<T> {
    /// True when `a` belongs closer to the root than `b`
    fn precedes(a: &T, b: &T) -> bool;
}

/// Smallest element at the root
#[derive(Debug, Clone, Copy, Default)]
pub struct MinOrder;

/// Largest element at the root
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxOrder;

impl<T: Ord> HeapOrder<T> for MinOrder {
    fn precedes(a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: Ord> HeapOrder<T> for MaxOrder {
    fn precedes(a: &T, b: &T) -> bool {
        a > b
    }
}

/// A binary heap over a growable array
///
/// Element `i` never orders after elements `2i+1` and `2i+2`. Only
/// operations that keep this invariant are exposed.
#[derive(Debug, Clone)]
pub struct PriorityHeap<T, O> {
    items: Vec<T>,
    order: PhantomData<O>,
}

pub type MinHeap<T> = PriorityHeap<T, MinOrder>;
pub type MaxHeap<T> = PriorityHeap<T, MaxOrder>;

impl<T, O> Default for PriorityHeap<T, O> {
    fn default() -> Self {
        PriorityHeap {
            items: Vec::new(),
            order: PhantomData,
        }
    }
}

impl<T, O: HeapOrder<T>> PriorityHeap<T, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The root element, without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Elements in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Append and sift up, O(log n)
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove the root, O(log n)
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let root = self.items.swap_remove(0);
        self.sift_down(0);
        Some(root)
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = parent_index(child);
            if !O::precedes(&self.items[child], &self.items[parent]) {
                break;
            }
            self.items.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = left_index(parent);
            let right = right_index(parent);

            let mut top = parent;
            if left < len && O::precedes(&self.items[left], &self.items[top]) {
                top = left;
            }
            if right < len && O::precedes(&self.items[right], &self.items[top]) {
                top = right;
            }
            if top == parent {
                return;
            }
            self.items.swap(parent, top);
            parent = top;
        }
    }
}

impl<T: PartialEq, O: HeapOrder<T>> PriorityHeap<T, O> {
    /// Whether an equal element is queued, O(n)
    pub fn exists(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Storage position of the first equal element, O(n)
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|queued| queued == item)
    }

    /// Remove the first equal element, O(n)
    ///
    /// The last element fills the vacated slot and is sifted into place.
    pub fn erase(&mut self, item: &T) -> bool {
        let Some(index) = self.index_of(item) else {
            return false;
        };
        self.items.swap_remove(index);
        if index < self.items.len() {
            self.sift_down(index);
            self.sift_up(index);
        }
        true
    }

    /// The first element matching `pred`, O(n)
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|&item| pred(item))
    }
}

fn parent_index(i: usize) -> usize {
    (i - 1) >> 1
}

fn left_index(i: usize) -> usize {
    (i << 1) + 1
}

fn right_index(i: usize) -> usize {
    (i << 1) + 2
}
