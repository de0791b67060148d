//! Splay rebalancing, positional `find`/split/merge, and the lazy push-down
//! discipline. This is the ≈35%-of-core layer from spec.md §2.

use std::fmt::{Debug, Formatter};

use debug_tree::{add_branch_to, add_leaf_to, AsTree, TreeBuilder};

use crate::node::{scale, Idx, Node, Value};

/// Arena of splay-tree nodes. `parent` is a back-reference only; a node's
/// two children are exclusively owned by it (spec.md §3's ownership rule),
/// but since everything lives in a flat `Vec`, ownership is enforced by
/// convention (only one slot's `left`/`right`/root ever points at a given
/// index) rather than by the borrow checker.
pub(crate) struct Tree<V: Value> {
    nodes: Vec<Node<V>>,
}

impl<V: Value> Debug for Tree<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        add_branch_to!(builder, "Tree ({} nodes)", self.nodes.len());
        let mut seen = vec![false; self.nodes.len()];
        for u in 0..self.nodes.len() {
            if self.nodes[u].parent == Self::EMPTY && !seen[u] {
                self.tree_preorder_dbg(u, &builder, &mut seen);
            }
        }
        write!(f, "{}", builder.string())
    }
}

impl<V: Value> Tree<V> {
    /// Pretty-prints the tree rooted at `u`, matching
    /// `lists/treap.rs`'s `tree_preorder_dbg`. For `log::trace!` output
    /// only; never on a hot path.
    fn tree_preorder_dbg<T: AsTree>(&self, u: Idx, tree: &T, seen: &mut [bool]) {
        if seen[u] {
            add_leaf_to!(*tree, "<<loop at {u}>>");
            return;
        }
        seen[u] = true;
        let n = &self.nodes[u];
        add_branch_to!(*tree, "[{u}] {n:?}");
        for c in [n.left, n.right] {
            if c != Self::EMPTY {
                self.tree_preorder_dbg(c, tree, seen);
            } else {
                add_leaf_to!(*tree, "∅");
            }
        }
    }
}

impl<V: Value> Tree<V> {
    pub const EMPTY: Idx = usize::MAX;

    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(cap),
        }
    }

    pub fn create(&mut self, val: V) -> Idx {
        self.nodes.push(Node::new(val));
        self.nodes.len() - 1
    }

    /// `count` copies of `val`, built bottom-up into a balanced shape
    /// rather than via `count` sequential inserts. Mirrors the recursive
    /// `Build` in Andrei Golovatskii's splay-tree next-permutation homework
    /// (`next_permutation_subset/splay/splay.h`).
    pub fn build(&mut self, count: usize, val: V) -> Idx {
        if count == 0 {
            return Self::EMPTY;
        }
        let left = self.build(count / 2, val);
        let node = self.create(val);
        let right = self.build(count - 1 - count / 2, val);
        self.nodes[node].left = left;
        self.nodes[node].right = right;
        if left != Self::EMPTY {
            self.nodes[left].parent = node;
        }
        if right != Self::EMPTY {
            self.nodes[right].parent = node;
        }
        self.update(node);
        node
    }

    pub fn val(&self, u: Idx) -> V {
        self.nodes[u].val
    }

    pub fn set_val(&mut self, u: Idx, val: V) {
        self.nodes[u].val = val;
        self.update(u);
    }

    pub fn size(&self, u: Idx) -> usize {
        self.size_of(u)
    }

    pub fn sum(&self, u: Idx) -> V {
        self.sum_of(u)
    }

    pub fn min(&self, u: Idx) -> Option<V> {
        self.min_of(u)
    }

    pub fn max(&self, u: Idx) -> Option<V> {
        self.max_of(u)
    }

    pub fn parent(&self, u: Idx) -> Idx {
        self.nodes[u].parent
    }

    // --- defaulting accessors over possibly-EMPTY children, following
    // `lists/treap.rs`'s `size()`/`ag_data()` `map_or` style. ---

    fn size_of(&self, u: Idx) -> usize {
        if u == Self::EMPTY {
            0
        } else {
            self.nodes[u].size
        }
    }

    fn sum_of(&self, u: Idx) -> V {
        if u == Self::EMPTY {
            V::default()
        } else {
            self.nodes[u].sum
        }
    }

    fn min_of(&self, u: Idx) -> Option<V> {
        (u != Self::EMPTY).then(|| self.nodes[u].min)
    }

    fn max_of(&self, u: Idx) -> Option<V> {
        (u != Self::EMPTY).then(|| self.nodes[u].max)
    }

    fn asc_of(&self, u: Idx) -> bool {
        u == Self::EMPTY || self.nodes[u].asc
    }

    fn desc_of(&self, u: Idx) -> bool {
        u == Self::EMPTY || self.nodes[u].desc
    }

    /// Push a pending additive delta onto `u`, folding it into an existing
    /// pending set if present (spec.md §3: "additive deltas accumulated onto
    /// a node that already has a pending set must be folded into the set").
    pub(crate) fn schedule_add(&mut self, u: Idx, delta: V) {
        if u == Self::EMPTY {
            return;
        }
        let n = &mut self.nodes[u];
        if n.has_set {
            n.lazy_set = n.lazy_set + delta;
        } else {
            n.lazy_add = n.lazy_add + delta;
        }
    }

    /// Schedule an assignment on `u`. A set always dominates: any pending
    /// add is discarded (spec.md §3: "pushing always resolves set first").
    pub(crate) fn schedule_set(&mut self, u: Idx, value: V) {
        if u == Self::EMPTY {
            return;
        }
        let n = &mut self.nodes[u];
        n.has_set = true;
        n.lazy_set = value;
        n.lazy_add = V::default();
    }

    /// Toggle the pending reverse flag on `u`. Two reverses cancel.
    pub fn schedule_reverse(&mut self, u: Idx) {
        if u == Self::EMPTY {
            return;
        }
        self.nodes[u].lazy_rev ^= true;
    }

    /// Resolve `u`'s own pending lazies and propagate them one hop to its
    /// children (spec.md §4.1). O(1), touches at most two children.
    pub fn push(&mut self, u: Idx) {
        if u == Self::EMPTY {
            return;
        }
        log::trace!("push {u}");
        if self.nodes[u].has_set {
            let set = self.nodes[u].lazy_set;
            let size = self.nodes[u].size;
            {
                let n = &mut self.nodes[u];
                n.val = set;
                n.min = set;
                n.max = set;
                n.sum = scale(set, size);
                n.asc = true;
                n.desc = true;
                n.has_set = false;
                n.lazy_add = V::default();
            }
            let (l, r) = (self.nodes[u].left, self.nodes[u].right);
            self.schedule_set(l, set);
            self.schedule_set(r, set);
        }
        let add = self.nodes[u].lazy_add;
        {
            let n = &mut self.nodes[u];
            n.val = n.val + add;
            n.min = n.min + add;
            n.max = n.max + add;
            n.sum = n.sum + scale(add, n.size);
            n.lazy_add = V::default();
        }
        let (l, r) = (self.nodes[u].left, self.nodes[u].right);
        self.schedule_add(l, add);
        self.schedule_add(r, add);

        if self.nodes[u].lazy_rev {
            let (l, r) = (self.nodes[u].left, self.nodes[u].right);
            let n = &mut self.nodes[u];
            n.left = r;
            n.right = l;
            std::mem::swap(&mut n.asc, &mut n.desc);
            n.lazy_rev = false;
            if l != Self::EMPTY {
                self.nodes[l].lazy_rev ^= true;
            }
            if r != Self::EMPTY {
                self.nodes[r].lazy_rev ^= true;
            }
        }
    }

    /// Recompute `u`'s aggregates from its (already-pushed) children and its
    /// own `val`. O(1). spec.md §4.2.
    pub fn update(&mut self, u: Idx) {
        if u == Self::EMPTY {
            return;
        }
        let (l, r, val) = {
            let n = &self.nodes[u];
            (n.left, n.right, n.val)
        };
        let size = self.size_of(l) + self.size_of(r) + 1;
        let sum = self.sum_of(l) + val + self.sum_of(r);
        let min = [Some(val), self.min_of(l), self.min_of(r)]
            .into_iter()
            .flatten()
            .min()
            .unwrap();
        let max = [Some(val), self.max_of(l), self.max_of(r)]
            .into_iter()
            .flatten()
            .max()
            .unwrap();
        let asc = self.asc_of(l)
            && self.asc_of(r)
            && self.max_of(l).map_or(true, |m| m <= val)
            && self.min_of(r).map_or(true, |m| val <= m);
        let desc = self.desc_of(l)
            && self.desc_of(r)
            && self.min_of(l).map_or(true, |m| m >= val)
            && self.max_of(r).map_or(true, |m| val >= m);
        let n = &mut self.nodes[u];
        n.size = size;
        n.sum = sum;
        n.min = min;
        n.max = max;
        n.asc = asc;
        n.desc = desc;
    }

    /// Single rotation promoting `x` over its parent. Pushes both before
    /// rewiring and updates both (but not the grandparent, whose subtree
    /// composition is unchanged) — spec.md §4.3.
    fn rotate(&mut self, x: Idx) {
        let p = self.nodes[x].parent;
        assert_ne!(p, Self::EMPTY, "cannot rotate the root");
        self.push(p);
        self.push(x);
        let pp = self.nodes[p].parent;
        let x_is_left = self.nodes[p].left == x;
        if x_is_left {
            let b = self.nodes[x].right;
            self.nodes[p].left = b;
            if b != Self::EMPTY {
                self.nodes[b].parent = p;
            }
            self.nodes[x].right = p;
        } else {
            let b = self.nodes[x].left;
            self.nodes[p].right = b;
            if b != Self::EMPTY {
                self.nodes[b].parent = p;
            }
            self.nodes[x].left = p;
        }
        self.nodes[p].parent = x;
        self.nodes[x].parent = pp;
        if pp != Self::EMPTY {
            if self.nodes[pp].left == p {
                self.nodes[pp].left = x;
            } else {
                self.nodes[pp].right = x;
            }
        }
        self.update(p);
        self.update(x);
    }

    /// Splay `u` to the root via zig / zig-zig / zig-zag rotations. No-op on
    /// `EMPTY`. spec.md §4.3/§4.4.
    pub fn splay(&mut self, u: Idx) {
        if u == Self::EMPTY {
            return;
        }
        log::trace!("splay {u}");
        loop {
            let p = self.nodes[u].parent;
            if p == Self::EMPTY {
                break;
            }
            let pp = self.nodes[p].parent;
            self.push(pp);
            self.push(p);
            self.push(u);
            if pp == Self::EMPTY {
                self.rotate(u);
                break;
            }
            let u_is_left = self.nodes[p].left == u;
            let p_is_left = self.nodes[pp].left == p;
            if u_is_left == p_is_left {
                self.rotate(p);
                self.rotate(u);
            } else {
                self.rotate(u);
                self.rotate(u);
            }
        }
    }

    /// Descend to the k-th in-order element (0-indexed) and splay it to the
    /// root. spec.md §4.4. Panics if `k >= size(root)` — a contract
    /// violation per spec.md §7.
    pub fn find_kth(&mut self, root: Idx, mut k: usize) -> Idx {
        assert!(
            k < self.size_of(root),
            "find_kth: index {k} out of bounds for size {}",
            self.size_of(root)
        );
        let mut u = root;
        loop {
            self.push(u);
            let l = self.nodes[u].left;
            let szl = self.size_of(l);
            if k == szl {
                break;
            } else if k < szl {
                u = l;
            } else {
                k -= szl + 1;
                u = self.nodes[u].right;
            }
        }
        self.splay(u);
        u
    }

    /// `(T[0..k), T[k..))`. spec.md §4.5.
    pub fn split(&mut self, root: Idx, k: usize) -> (Idx, Idx) {
        if root == Self::EMPTY {
            return (Self::EMPTY, Self::EMPTY);
        }
        let size = self.size_of(root);
        if k == 0 {
            return (Self::EMPTY, root);
        }
        if k == size {
            return (root, Self::EMPTY);
        }
        let node = self.find_kth(root, k);
        let l = self.nodes[node].left;
        self.nodes[node].left = Self::EMPTY;
        if l != Self::EMPTY {
            self.nodes[l].parent = Self::EMPTY;
        }
        self.update(node);
        (l, node)
    }

    /// Concatenate `left` and `right`, assuming every element of `left`
    /// precedes every element of `right`. spec.md §4.5.
    pub fn merge(&mut self, left: Idx, right: Idx) -> Idx {
        if left == Self::EMPTY {
            return right;
        }
        if right == Self::EMPTY {
            return left;
        }
        let last = self.find_kth(left, self.size_of(left) - 1);
        debug_assert_eq!(self.nodes[last].right, Self::EMPTY);
        self.nodes[last].right = right;
        self.nodes[right].parent = last;
        self.update(last);
        last
    }

    /// Isolate `[start, start+len)` as its own subtree: `(before, range,
    /// after)`. The universal subrange harness of spec.md §4.6.
    pub fn isolate(&mut self, root: Idx, start: usize, len: usize) -> (Idx, Idx, Idx) {
        assert!(
            start + len <= self.size_of(root),
            "subrange [{start}, {}) out of bounds for size {}",
            start + len,
            self.size_of(root)
        );
        let (a, rest) = self.split(root, start);
        let (m, b) = self.split(rest, len);
        (a, m, b)
    }

    /// The inverse of [`Tree::isolate`].
    pub fn reassemble(&mut self, a: Idx, m: Idx, b: Idx) -> Idx {
        let am = self.merge(a, m);
        self.merge(am, b)
    }

    /// Allocate a fresh node and splice it in at `pos`. spec.md §4.7.
    pub fn insert(&mut self, root: Idx, pos: usize, val: V) -> Idx {
        let node = self.create(val);
        let (l, r) = self.split(root, pos);
        self.nodes[node].left = l;
        self.nodes[node].right = r;
        if l != Self::EMPTY {
            self.nodes[l].parent = node;
        }
        if r != Self::EMPTY {
            self.nodes[r].parent = node;
        }
        self.update(node);
        node
    }

    /// Splay `pos` to the root, detach it, reclaim its arena slot, and
    /// merge the two halves. Returns the new root. spec.md §4.7.
    pub fn erase(&mut self, root: Idx, pos: usize) -> Idx {
        let node = self.find_kth(root, pos);
        let mut l = self.nodes[node].left;
        let mut r = self.nodes[node].right;
        if l != Self::EMPTY {
            self.nodes[l].parent = Self::EMPTY;
        }
        if r != Self::EMPTY {
            self.nodes[r].parent = Self::EMPTY;
        }
        if let Some((old, new)) = self.remove(node) {
            if l == old {
                l = new;
            }
            if r == old {
                r = new;
            }
        }
        self.merge(l, r)
    }

    /// Reclaim the arena slot at `idx` by relocating the last element into
    /// it (`dynamic_2core`'s arenas are append-only and never free slots;
    /// `erase` needs real removal). Returns `Some((old, new))` — the index
    /// the relocated node used to have and its new index — whenever a
    /// relocation happened, so the caller can patch any index it is holding
    /// onto.
    fn remove(&mut self, idx: Idx) -> Option<(Idx, Idx)> {
        let last = self.nodes.len() - 1;
        if idx == last {
            self.nodes.pop();
            return None;
        }
        self.nodes.swap_remove(idx);
        let (parent, left, right) = {
            let n = &self.nodes[idx];
            (n.parent, n.left, n.right)
        };
        if parent != Self::EMPTY {
            if self.nodes[parent].left == last {
                self.nodes[parent].left = idx;
            } else if self.nodes[parent].right == last {
                self.nodes[parent].right = idx;
            }
        }
        if left != Self::EMPTY {
            self.nodes[left].parent = idx;
        }
        if right != Self::EMPTY {
            self.nodes[right].parent = idx;
        }
        Some((last, idx))
    }

    // --- accessors needed by the permutation engine (src/permutation.rs) ---

    pub(crate) fn left(&self, u: Idx) -> Idx {
        self.nodes[u].left
    }

    pub(crate) fn right(&self, u: Idx) -> Idx {
        self.nodes[u].right
    }

    pub(crate) fn is_desc(&self, u: Idx) -> bool {
        self.nodes[u].desc
    }

    pub(crate) fn is_asc(&self, u: Idx) -> bool {
        self.nodes[u].asc
    }

    pub(crate) fn swap_vals(&mut self, a: Idx, b: Idx) {
        let va = self.nodes[a].val;
        let vb = self.nodes[b].val;
        self.nodes[a].val = vb;
        self.nodes[b].val = va;
    }
}

impl<V: Value> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}
