//! The public facade (spec.md §2, "Sequence facade"; spec.md §6, "External
//! Interfaces"). Wraps [`Tree`] and owns its root, exposing indexed
//! get/set, insert/erase, and the subrange operation suite.

use crate::node::{Idx, Value};
use crate::tree::Tree;

/// A mutable, indexed sequence of `V`s backed by an implicit-key splay
/// tree. All operations below are amortized O(log n).
pub struct Sequence<V: Value> {
    tree: Tree<V>,
    root: Idx,
}

impl<V: Value> Sequence<V> {
    /// `n` copies of `v`.
    pub fn new(n: usize, v: V) -> Self {
        let mut tree = Tree::with_capacity(n);
        let root = tree.build(n, v);
        log::debug!("Sequence::new(n={n})");
        Self { tree, root }
    }

    /// An empty sequence.
    pub fn empty() -> Self {
        Self {
            tree: Tree::new(),
            root: Tree::<V>::EMPTY,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_index(&self, i: usize) {
        assert!(
            i < self.len(),
            "index {i} out of bounds for length {}",
            self.len()
        );
    }

    fn check_range(&self, start: usize, len: usize) {
        assert!(
            start + len <= self.len(),
            "range [{start}, {}) out of bounds for length {}",
            start + len,
            self.len()
        );
    }

    pub fn get(&mut self, i: usize) -> V {
        self.check_index(i);
        self.root = self.tree.find_kth(self.root, i);
        self.tree.val(self.root)
    }

    pub fn set(&mut self, i: usize, v: V) {
        self.check_index(i);
        self.root = self.tree.find_kth(self.root, i);
        self.tree.set_val(self.root, v);
    }

    /// Inserts `v` at `pos`, growing the sequence by one. `pos == len()` is
    /// valid and appends.
    pub fn insert(&mut self, pos: usize, v: V) {
        assert!(
            pos <= self.len(),
            "insert position {pos} out of bounds for length {}",
            self.len()
        );
        log::debug!("insert(pos={pos})");
        self.root = self.tree.insert(self.root, pos, v);
    }

    /// Removes the element at `pos`, shrinking the sequence by one.
    pub fn erase(&mut self, pos: usize) {
        self.check_index(pos);
        log::debug!("erase(pos={pos})");
        self.root = self.tree.erase(self.root, pos);
    }

    pub fn range_sum(&mut self, start: usize, len: usize) -> V {
        self.check_range(start, len);
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        let sum = self.tree.sum(m);
        self.root = self.tree.reassemble(a, m, b);
        sum
    }

    /// `None` for an empty range — there is no generic sentinel extremum
    /// for an arbitrary `Value`, so `Option` is the neutral extremum of
    /// spec.md §4.9.
    pub fn range_min(&mut self, start: usize, len: usize) -> Option<V> {
        self.check_range(start, len);
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        let min = self.tree.min(m);
        self.root = self.tree.reassemble(a, m, b);
        min
    }

    pub fn range_max(&mut self, start: usize, len: usize) -> Option<V> {
        self.check_range(start, len);
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        let max = self.tree.max(m);
        self.root = self.tree.reassemble(a, m, b);
        max
    }

    /// Assigns `v` to every element in `[start, start+len)`. A no-op when
    /// `len == 0`.
    pub fn range_set(&mut self, start: usize, len: usize, v: V) {
        self.check_range(start, len);
        log::debug!("range_set(start={start}, len={len})");
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        self.tree.schedule_set(m, v);
        self.root = self.tree.reassemble(a, m, b);
    }

    /// Adds `v` to every element in `[start, start+len)`. A no-op when
    /// `len == 0`.
    pub fn range_add(&mut self, start: usize, len: usize, v: V) {
        self.check_range(start, len);
        log::debug!("range_add(start={start}, len={len})");
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        self.tree.schedule_add(m, v);
        self.root = self.tree.reassemble(a, m, b);
    }

    /// Reverses `[start, start+len)` in place. Involutive: applying it
    /// twice to the same range restores the prior order.
    pub fn range_reverse(&mut self, start: usize, len: usize) {
        self.check_range(start, len);
        log::debug!("range_reverse(start={start}, len={len})");
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        self.tree.schedule_reverse(m);
        self.root = self.tree.reassemble(a, m, b);
    }

    /// Replaces `[start, start+len)` with its next lexicographic
    /// permutation. If the range is already the greatest permutation
    /// (non-increasing), it becomes the least (non-decreasing) instead.
    pub fn range_next_permutation(&mut self, start: usize, len: usize) {
        self.check_range(start, len);
        log::debug!("range_next_permutation(start={start}, len={len})");
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        let m = self.tree.permute(m, true);
        self.root = self.tree.reassemble(a, m, b);
    }

    /// Mirror of [`Sequence::range_next_permutation`].
    pub fn range_prev_permutation(&mut self, start: usize, len: usize) {
        self.check_range(start, len);
        log::debug!("range_prev_permutation(start={start}, len={len})");
        let (a, m, b) = self.tree.isolate(self.root, start, len);
        let m = self.tree.permute(m, false);
        self.root = self.tree.reassemble(a, m, b);
    }

    /// Materializes the sequence as a `Vec`, in order. For testing/display;
    /// O(n).
    pub fn to_vec(&mut self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            out.push(self.get(i));
        }
        out
    }
}

impl<V: Value> std::fmt::Debug for Sequence<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sequence(len={})", self.len())
    }
}
