//! Parallel processing utilities using Rayon.

use rayon::prelude::*;

/// Minimum number of items before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread coordination overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Configure the global Rayon thread pool.
///
/// `None` keeps the default (one thread per CPU). Safe to call once at
/// startup, before any parallel work runs.
pub fn configure_threads(threads: Option<usize>) {
    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to initialize thread pool");
    }
}

/// Sort byte strings ascending, in parallel above [`PARALLEL_THRESHOLD`].
pub fn sort_lines(mut lines: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    if lines.len() >= PARALLEL_THRESHOLD {
        lines.par_sort_unstable();
    } else {
        lines.sort_unstable();
    }
    lines
}
