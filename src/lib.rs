//! An implicit-key splay tree: a balanced binary search tree keyed by
//! in-order position rather than by a stored field. It represents a mutable
//! sequence of ordered, additively-grouped values and supports, in
//! amortized O(log n) per operation, range-sum/min/max, range-set,
//! range-add, range-reverse, and — the centerpiece — in-place next/previous
//! lexicographic permutation over an arbitrary subrange.
//!
//! ## Usage
//!
//! ```
//! use splay_sequence::Sequence;
//!
//! let mut seq = Sequence::new(5, 1i64);
//! seq.range_set(1, 3, 5);
//! assert_eq!(seq.to_vec(), vec![1, 5, 5, 5, 1]);
//! seq.range_add(0, 5, 2);
//! assert_eq!(seq.to_vec(), vec![3, 7, 7, 7, 3]);
//! seq.range_next_permutation(0, 5);
//! ```
//!
//! See `src/bin/seqtool.rs` for a worked end-to-end example driven by the
//! reference text protocol, and run it with `cargo run`.
//!
//! ## Implementation
//!
//! - Node storage and the lazy-propagation fields: `src/node.rs`.
//! - Splay rotations, positional find/split/merge, push-down: `src/tree.rs`.
//! - The next/previous permutation engine: `src/permutation.rs`.
//! - The public facade: `src/sequence.rs`, [`Sequence`].
//!
//! ## Testing
//!
//! Run the tests using:
//!
//! ```skip
//! cargo test
//! ```
//!
//! Use `cargo bench` to see the benchmarks.

mod node;
mod permutation;
mod sequence;
mod tree;

pub use sequence::Sequence;
