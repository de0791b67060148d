//! The reference text protocol adapter (spec.md §6): reads a script of
//! operations from standard input and drives a [`Sequence`], exactly the
//! "thin command-line frontend" spec.md §1 places out of scope for the
//! core but in scope as an adapter. Modeled on the `main()` from Andrei
//! Golovatskii's splay-tree next-permutation homework
//! (`next_permutation_subset/task_contest/main.cpp`), kept as plain a `fn
//! main` as `dynamic_2core`'s own `src/bin/example.rs`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{bail, Context, Result};
use splay_sequence::Sequence;

fn next_token<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str> {
    tokens.next().with_context(|| format!("expected {what}"))
}

fn parse_i64<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<i64> {
    next_token(tokens, what)?
        .parse()
        .with_context(|| format!("{what} is not an integer"))
}

fn parse_usize<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<usize> {
    next_token(tokens, what)?
        .parse()
        .with_context(|| format!("{what} is not a non-negative integer"))
}

fn run(input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut lines = input.lines();

    let header = lines.next().context("missing n")??;
    let n: usize = header.trim().parse().context("n is not an integer")?;

    let values_line = lines.next().context("missing initial values")??;
    let mut values = Vec::with_capacity(n);
    let mut tokens = values_line.split_whitespace();
    for i in 0..n {
        values.push(parse_i64(&mut tokens, &format!("initial value {i}"))?);
    }

    let mut seq = Sequence::new(n, 0i64);
    for (i, v) in values.into_iter().enumerate() {
        seq.set(i, v);
    }

    let q_line = lines.next().context("missing q")??;
    let q: usize = q_line.trim().parse().context("q is not an integer")?;

    for query_idx in 0..q {
        let line = lines
            .next()
            .with_context(|| format!("missing command {query_idx}"))??;
        let mut tokens = line.split_whitespace();
        let tag: u32 = parse_usize(&mut tokens, "command tag")? as u32;
        match tag {
            1 => {
                let l = parse_usize(&mut tokens, "l")?;
                let r = parse_usize(&mut tokens, "r")?;
                let sum = seq.range_sum(l, r - l + 1);
                writeln!(output, "{sum}")?;
            }
            2 => {
                let x = parse_i64(&mut tokens, "x")?;
                let pos = parse_usize(&mut tokens, "pos")?;
                seq.insert(pos, x);
            }
            3 => {
                let pos = parse_usize(&mut tokens, "pos")?;
                seq.erase(pos);
            }
            4 => {
                let x = parse_i64(&mut tokens, "x")?;
                let l = parse_usize(&mut tokens, "l")?;
                let r = parse_usize(&mut tokens, "r")?;
                seq.range_set(l, r - l + 1, x);
            }
            5 => {
                let x = parse_i64(&mut tokens, "x")?;
                let l = parse_usize(&mut tokens, "l")?;
                let r = parse_usize(&mut tokens, "r")?;
                seq.range_add(l, r - l + 1, x);
            }
            6 => {
                let l = parse_usize(&mut tokens, "l")?;
                let r = parse_usize(&mut tokens, "r")?;
                seq.range_next_permutation(l, r - l + 1);
            }
            7 => {
                let l = parse_usize(&mut tokens, "l")?;
                let r = parse_usize(&mut tokens, "r")?;
                seq.range_prev_permutation(l, r - l + 1);
            }
            other => bail!("unknown command tag {other}"),
        }
    }

    let final_values = seq.to_vec();
    let rendered = final_values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(output, "{rendered}")?;
    Ok(())
}

/// Reads its script from the file named by the first CLI argument, or from
/// stdin if none is given.
fn main() -> Result<()> {
    let stdout = io::stdout();
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening {path}"))?;
            run(BufReader::new(file), stdout.lock())
        }
        None => {
            let stdin = io::stdin();
            run(stdin.lock(), stdout.lock())
        }
    }
}
