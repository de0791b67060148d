use std::sync::{LazyLock, Mutex};

use flexi_logger::{Logger, LoggerHandle};

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .set_palette("196;208;3;7;8".to_owned())
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}

/// A `Vec<i64>`-backed reference model with the same operations as
/// `splay_sequence::Sequence`, used to cross-check the splay tree under
/// randomized stress (tests/sequence.rs's `random_operations_match_naive_model`).
#[derive(Debug, Default)]
pub struct NaiveSequence(pub Vec<i64>);

impl NaiveSequence {
    pub fn new(n: usize, v: i64) -> Self {
        Self(vec![v; n])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, i: usize) -> i64 {
        self.0[i]
    }

    pub fn set(&mut self, i: usize, v: i64) {
        self.0[i] = v;
    }

    pub fn insert(&mut self, pos: usize, v: i64) {
        self.0.insert(pos, v);
    }

    pub fn erase(&mut self, pos: usize) {
        self.0.remove(pos);
    }

    pub fn range_sum(&self, start: usize, len: usize) -> i64 {
        self.0[start..start + len].iter().sum()
    }

    pub fn range_min(&self, start: usize, len: usize) -> Option<i64> {
        self.0[start..start + len].iter().copied().min()
    }

    pub fn range_max(&self, start: usize, len: usize) -> Option<i64> {
        self.0[start..start + len].iter().copied().max()
    }

    pub fn range_set(&mut self, start: usize, len: usize, v: i64) {
        self.0[start..start + len].fill(v);
    }

    pub fn range_add(&mut self, start: usize, len: usize, v: i64) {
        for x in &mut self.0[start..start + len] {
            *x += v;
        }
    }

    pub fn range_reverse(&mut self, start: usize, len: usize) {
        self.0[start..start + len].reverse();
    }

    /// The textbook three-step algorithm (find pivot, find swap target,
    /// reverse the suffix), used as the oracle for `Tree::permute`.
    pub fn range_next_permutation(&mut self, start: usize, len: usize) {
        let s = &mut self.0[start..start + len];
        if let Some(i) = (0..s.len().saturating_sub(1))
            .rev()
            .find(|&i| s[i] < s[i + 1])
        {
            let j = (i + 1..s.len()).rev().find(|&j| s[j] > s[i]).unwrap();
            s.swap(i, j);
            s[i + 1..].reverse();
        } else {
            s.reverse();
        }
    }

    pub fn range_prev_permutation(&mut self, start: usize, len: usize) {
        let s = &mut self.0[start..start + len];
        if let Some(i) = (0..s.len().saturating_sub(1))
            .rev()
            .find(|&i| s[i] > s[i + 1])
        {
            let j = (i + 1..s.len()).rev().find(|&j| s[j] < s[i]).unwrap();
            s.swap(i, j);
            s[i + 1..].reverse();
        } else {
            s.reverse();
        }
    }
}
