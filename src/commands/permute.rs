//! Permute command implementation.
//!
//! Prints every permutation of the input's bytes in ascending order, one
//! per line. Repeated characters produce repeated permutations, so the
//! output always has exactly `len!` lines.

use crate::output::LineWriter;
use crate::parallel::sort_lines;
use crate::scanner::Result;
use std::io::Write;

/// Permute command configuration.
#[derive(Debug, Clone, Default)]
pub struct PermuteCommand;

impl PermuteCommand {
    pub fn new() -> Self {
        Self
    }

    /// All `len!` permutations of `input`, sorted ascending.
    pub fn permutations(&self, input: &[u8]) -> Vec<Vec<u8>> {
        if input.is_empty() {
            return vec![Vec::new()];
        }
        let mut work = input.to_vec();
        let mut out = Vec::new();
        generate(&mut work, 0, &mut out);
        sort_lines(out)
    }

    /// Write all permutations of `input` to `output`, one per line.
    pub fn run<W: Write>(&self, input: &[u8], output: &mut W) -> Result<()> {
        let mut writer = LineWriter::new(output);
        for perm in self.permutations(input) {
            writer.write_line(&perm)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Swap-based generation: each position takes every remaining byte in turn,
/// restoring the buffer on the way back up.
fn generate(work: &mut [u8], left: usize, out: &mut Vec<Vec<u8>>) {
    if left == work.len() {
        out.push(work.to_vec());
        return;
    }
    for i in left..work.len() {
        work.swap(left, i);
        generate(work, left + 1, out);
        work.swap(left, i);
    }
}
