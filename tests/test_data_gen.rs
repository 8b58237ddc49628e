//! Deterministic data and pipeline builders shared by the integration tests.

#![allow(dead_code)]

use ginq::{ops, Queryable};

/// Small LCG so tests get varied but reproducible inputs.
pub fn generate_i64s(len: usize, seed: u64) -> Vec<i64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % 1000) as i64 - 500
        })
        .collect()
}

/// Streaming-only pipeline: keep multiples of 3, add 1, skip the first 2.
pub fn streaming_pipeline(source: Vec<i64>) -> Queryable<i64> {
    Queryable::new(source, "i64")
        .then(ops::filter(|x: &i64| x % 3 == 0))
        .then(ops::map(|x: i64| x + 1))
        .then(ops::skip(2))
}

/// Mixed pipeline with two bulk boundaries and a streaming stage between.
pub fn mixed_pipeline(source: Vec<i64>) -> Queryable<i64> {
    Queryable::new(source, "i64")
        .then(ops::map(|x: i64| x.abs() % 50))
        .then(ops::distinct())
        .then(ops::filter(|x: &i64| x % 2 == 0))
        .then(ops::sort())
        .then(ops::take(10))
}

/// Pull one value at a time until exhaustion.
pub fn pull_all(q: &mut Queryable<i64>) -> Vec<i64> {
    let mut out = Vec::new();
    while let Some(v) = q.pull_next().expect("pull failed") {
        out.push(v);
    }
    out
}
