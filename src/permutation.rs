//! Next/previous lexicographic permutation over an isolated subtree —
//! spec.md §4.8, the component that distinguishes this repository.
//!
//! Transliterated from Andrei Golovatskii's splay-tree next-permutation
//! homework (`next_permutation_subset/task_contest/main.cpp`'s
//! `GetOrderedSuffixLen`, `GLValPrefixLen`, and `Permutation`), into the
//! arena/push idiom of `lists/splay.rs`.

use crate::node::{Idx, Value};
use crate::tree::Tree;

impl<V: Value> Tree<V> {
    /// Replace the subtree rooted at `m` with its next (`next = true`) or
    /// previous (`next = false`) lexicographic permutation. Wraps to the
    /// opposite extreme if `m` is already there (spec.md §9, Open Question
    /// 3). Returns the new root of the subtree.
    pub fn permute(&mut self, m: Idx, next: bool) -> Idx {
        if m == Self::EMPTY {
            return m;
        }
        self.push(m);
        // Fast path straight from main.cpp's `Permutation`: next-permutation
        // on an already-non-increasing range (or prev- on an already-
        // non-decreasing one) has no successor/predecessor within the
        // multiset, so the contract is to wrap by reversing the whole thing.
        let at_extreme = if next { self.is_desc(m) } else { self.is_asc(m) };
        if at_extreme {
            self.schedule_reverse(m);
            return m;
        }

        let suffix_len = self.ordered_suffix_len(m, next);
        let size = self.size(m);
        let (l_part, r_part) = self.split(m, size - suffix_len);

        // Pivot: the last element of l_part (the rightmost position i with
        // A[i] </> A[i+1]).
        let l_size = self.size(l_part);
        let pivot = self.find_kth(l_part, l_size - 1);
        self.push(pivot);
        let pivot_val = self.val(pivot);

        // Swap target: rightmost element of r_part that is strictly
        // greater (next) / strictly less (prev) than the pivot.
        let swap_pos = self.count_strict(r_part, pivot_val, next) - 1;
        let swap_node = self.find_kth(r_part, swap_pos);
        self.push(swap_node);

        self.swap_vals(pivot, swap_node);
        self.update(pivot);
        self.update(swap_node);

        // r_part was non-increasing (resp. non-decreasing); after the swap
        // it still is, so reversing it sorts it into the opposite order —
        // the minimal suffix for the new permutation.
        self.schedule_reverse(swap_node);

        self.merge(pivot, swap_node)
    }

    /// Length of the longest suffix of `root` whose in-order traversal is
    /// non-increasing (`want_non_increasing = true`) or non-decreasing
    /// (`false`). Single root-to-leaf descent using the `asc`/`desc`/`min`/
    /// `max` aggregates, spec.md §4.8.
    fn ordered_suffix_len(&mut self, root: Idx, want_non_increasing: bool) -> usize {
        let mut required: Option<V> = None;
        let mut len = 0usize;
        let mut u = root;
        self.push(u);
        loop {
            if u == Self::EMPTY {
                break;
            }
            let val = self.val(u);

            // `u`'s own value already breaks the monotonic run established by
            // `required`: it can't join the suffix, so move on without
            // extending (and without even looking at its right subtree).
            let breaks_run = required.is_some_and(|req| {
                if want_non_increasing {
                    val < req
                } else {
                    val > req
                }
            });
            if breaks_run {
                u = self.right(u);
                self.push(u);
                continue;
            }

            let r = self.right(u);
            self.push(r);
            let extends_suffix = if want_non_increasing {
                r == Self::EMPTY
                    || (self.is_desc(r)
                        && self.max(r).unwrap() <= val
                        && required.map_or(true, |req| self.min(r).unwrap() >= req))
            } else {
                r == Self::EMPTY
                    || (self.is_asc(r)
                        && self.min(r).unwrap() >= val
                        && required.map_or(true, |req| self.max(r).unwrap() <= req))
            };
            if extends_suffix {
                len += 1 + self.size(r);
                required = Some(val);
                u = self.left(u);
                self.push(u);
            } else {
                u = r;
            }
        }
        len
    }

    /// Count of elements in `root` strictly greater (`next = true`) or
    /// strictly less (`next = false`) than `pivot`. spec.md §4.8 step 2.
    fn count_strict(&mut self, root: Idx, pivot: V, next: bool) -> usize {
        let mut u = root;
        let mut count = 0usize;
        loop {
            if u == Self::EMPTY {
                break;
            }
            self.push(u);
            let l = self.left(u);
            let val = self.val(u);
            let matches = if next { val > pivot } else { val < pivot };
            if matches {
                count += self.size(l) + 1;
                u = self.right(u);
            } else {
                u = l;
            }
        }
        count
    }
}
