use common::NaiveSequence;
use rand::{rngs::StdRng, Rng, SeedableRng};
use splay_sequence::Sequence;

mod common;

fn build(v: &[i64]) -> Sequence<i64> {
    let mut seq = Sequence::new(v.len(), 0);
    for (i, &x) in v.iter().enumerate() {
        seq.set(i, x);
    }
    seq
}

fn assert_contents(seq: &mut Sequence<i64>, expect: &[i64]) {
    assert_eq!(seq.to_vec(), expect);
}

#[test]
fn new_fills_with_the_given_value() {
    common::init_logger();
    let mut seq = Sequence::new(4, 7i64);
    assert_eq!(seq.len(), 4);
    assert_contents(&mut seq, &[7, 7, 7, 7]);
}

#[test]
fn empty_sequence_has_zero_length() {
    let seq = Sequence::<i64>::empty();
    assert_eq!(seq.len(), 0);
    assert!(seq.is_empty());
}

#[test]
fn get_set_round_trip() {
    let mut seq = build(&[1, 2, 3, 4, 5]);
    assert_eq!(seq.get(0), 1);
    assert_eq!(seq.get(4), 5);
    seq.set(2, 99);
    assert_eq!(seq.get(2), 99);
    assert_contents(&mut seq, &[1, 2, 99, 4, 5]);
}

#[test]
fn insert_grows_the_sequence_at_any_position() {
    let mut seq = build(&[1, 2, 3]);
    seq.insert(0, 100);
    assert_contents(&mut seq, &[100, 1, 2, 3]);
    seq.insert(4, 200);
    assert_contents(&mut seq, &[100, 1, 2, 3, 200]);
    seq.insert(2, 300);
    assert_contents(&mut seq, &[100, 1, 300, 2, 3, 200]);
}

#[test]
fn erase_shrinks_the_sequence() {
    let mut seq = build(&[1, 2, 3, 4, 5]);
    seq.erase(0);
    assert_contents(&mut seq, &[2, 3, 4, 5]);
    seq.erase(3);
    assert_contents(&mut seq, &[2, 3, 4]);
    seq.erase(1);
    assert_contents(&mut seq, &[2, 4]);
}

#[test]
fn range_sum_min_max_over_a_subrange() {
    let mut seq = build(&[5, 1, 4, 2, 8, 3]);
    assert_eq!(seq.range_sum(1, 3), 1 + 4 + 2);
    assert_eq!(seq.range_min(1, 3), Some(1));
    assert_eq!(seq.range_max(1, 3), Some(4));
    assert_eq!(seq.range_sum(0, 6), 5 + 1 + 4 + 2 + 8 + 3);
}

#[test]
fn range_queries_over_an_empty_range_use_the_neutral_extremum() {
    let mut seq = build(&[1, 2, 3]);
    assert_eq!(seq.range_sum(1, 0), 0);
    assert_eq!(seq.range_min(1, 0), None);
    assert_eq!(seq.range_max(1, 0), None);
}

#[test]
fn range_set_overwrites_every_element_in_range() {
    // start from [1,2,3,4,5,6,7], set positions [3,6] (inclusive) to 5.
    let mut seq = build(&[1, 2, 3, 4, 5, 6, 7]);
    seq.range_set(3, 4, 5);
    assert_contents(&mut seq, &[1, 2, 3, 5, 5, 5, 5]);
}

#[test]
fn range_add_accumulates_a_delta_over_a_range() {
    let mut seq = build(&[1, 2, 3, 4, 5]);
    seq.range_add(1, 3, 10);
    assert_contents(&mut seq, &[1, 12, 13, 14, 5]);
}

#[test]
fn set_dominates_a_pending_add_on_the_same_range() {
    // Whichever order range_add and range_set are scheduled on overlapping
    // subtrees, a set that lands after an add must win outright (no
    // leftover trace of the add survives the fold).
    let mut seq = build(&[1, 1, 1, 1]);
    seq.range_add(0, 4, 100);
    seq.range_set(1, 2, 9);
    assert_contents(&mut seq, &[101, 9, 9, 101]);
}

#[test]
fn add_after_set_folds_into_the_set_value() {
    let mut seq = build(&[1, 1, 1, 1]);
    seq.range_set(0, 4, 5);
    seq.range_add(1, 2, 3);
    assert_contents(&mut seq, &[5, 8, 8, 5]);
}

#[test]
fn range_reverse_is_involutive() {
    let original = [1, 2, 3, 4, 5, 6, 7];
    let mut seq = build(&original);
    seq.range_reverse(1, 5);
    assert_contents(&mut seq, &[1, 6, 5, 4, 3, 2, 7]);
    seq.range_reverse(1, 5);
    assert_contents(&mut seq, &original);
}

#[test]
fn next_permutation_on_123_cycles_through_all_six_orderings() {
    let mut seq = build(&[1, 2, 3]);
    let expect: [[i64; 3]; 6] = [
        [1, 3, 2],
        [2, 1, 3],
        [2, 3, 1],
        [3, 1, 2],
        [3, 2, 1],
        [1, 2, 3],
    ];
    for step in expect {
        seq.range_next_permutation(0, 3);
        assert_contents(&mut seq, &step);
    }
}

#[test]
fn prev_permutation_on_123_cycles_backwards_through_all_six_orderings() {
    let mut seq = build(&[1, 2, 3]);
    let expect: [[i64; 3]; 6] = [
        [3, 2, 1],
        [3, 1, 2],
        [2, 3, 1],
        [2, 1, 3],
        [1, 3, 2],
        [1, 2, 3],
    ];
    for step in expect {
        seq.range_prev_permutation(0, 3);
        assert_contents(&mut seq, &step);
    }
}

#[test]
fn next_then_prev_permutation_are_inverses() {
    let mut seq = build(&[4, 1, 3, 2, 5]);
    let before = seq.to_vec();
    seq.range_next_permutation(0, 5);
    seq.range_prev_permutation(0, 5);
    assert_eq!(seq.to_vec(), before);
}

#[test]
fn next_permutation_on_an_all_equal_range_is_a_no_op() {
    let mut seq = build(&[5, 5, 5]);
    seq.range_next_permutation(0, 3);
    assert_contents(&mut seq, &[5, 5, 5]);
    seq.range_prev_permutation(0, 3);
    assert_contents(&mut seq, &[5, 5, 5]);
}

#[test]
fn next_permutation_wraps_from_the_greatest_to_the_least() {
    let mut seq = build(&[3, 2, 1]);
    seq.range_next_permutation(0, 3);
    assert_contents(&mut seq, &[1, 2, 3]);
}

#[test]
fn prev_permutation_wraps_from_the_least_to_the_greatest() {
    let mut seq = build(&[1, 2, 3]);
    seq.range_prev_permutation(0, 3);
    assert_contents(&mut seq, &[3, 2, 1]);
}

#[test]
fn permutation_applies_only_to_the_given_subrange() {
    let mut seq = build(&[9, 1, 2, 3, 9]);
    seq.range_next_permutation(1, 3);
    assert_contents(&mut seq, &[9, 1, 3, 2, 9]);
}

#[test]
fn all_24_permutations_of_four_distinct_elements_are_reachable() {
    let mut seq = build(&[1, 2, 3, 4]);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..24 {
        seen.insert(seq.to_vec());
        seq.range_next_permutation(0, 4);
    }
    assert_eq!(seen.len(), 24);
    assert_contents(&mut seq, &[1, 2, 3, 4]);
}

#[test]
fn random_operations_match_naive_model() {
    // spec.md §8 Scenario D: n = 1000, all ones, 10 000 random
    // (insert, erase, range_set, range_add, range_reverse, range_sum,
    // range_min, range_max) operations cross-checked against a naive list.
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut naive = NaiveSequence::new(1000, 1);
    let mut seq = Sequence::new(1000, 1i64);

    for iter in 0..10_000 {
        assert_eq!(naive.len(), seq.len());
        let n = naive.len();
        let op = if n == 0 { 0 } else { rng.gen_range(0..6) };
        match op {
            0 => {
                let pos = rng.gen_range(0..=n);
                let v = rng.gen_range(-50..50);
                naive.insert(pos, v);
                seq.insert(pos, v);
            }
            1 => {
                let pos = rng.gen_range(0..n);
                naive.erase(pos);
                seq.erase(pos);
            }
            2 => {
                let (start, len) = random_range(&mut rng, n);
                assert_eq!(naive.range_sum(start, len), seq.range_sum(start, len));
                assert_eq!(naive.range_min(start, len), seq.range_min(start, len));
                assert_eq!(naive.range_max(start, len), seq.range_max(start, len));
            }
            3 => {
                let (start, len) = random_range(&mut rng, n);
                let v = rng.gen_range(-50..50);
                naive.range_set(start, len, v);
                seq.range_set(start, len, v);
            }
            4 => {
                let (start, len) = random_range(&mut rng, n);
                let v = rng.gen_range(-50..50);
                naive.range_add(start, len, v);
                seq.range_add(start, len, v);
            }
            _ => {
                let (start, len) = random_range(&mut rng, n);
                naive.range_reverse(start, len);
                seq.range_reverse(start, len);
            }
        }
        assert_eq!(
            naive.0,
            seq.to_vec(),
            "diverged after op {op} (iteration {iter})"
        );
    }
}

fn random_range(rng: &mut StdRng, n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let start = rng.gen_range(0..n);
    let len = rng.gen_range(0..=(n - start));
    (start, len)
}
