//! Generate synthetic line data for exercising the reader and the other
//! subcommands at size.
//!
//! Output is deterministic for a given seed, so generated fixtures can be
//! regenerated instead of checked in.

use crate::scanner::{LineError, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::{BufWriter, Write};

/// Buffer size for generation output (1 MB).
const BUF_SIZE: usize = 1024 * 1024;

/// Line count specification (parses 1K, 2M, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub count: u64,
}

impl SizeSpec {
    /// Parse a count from a string (e.g., "100", "10K", "2M", "1G").
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        if s.is_empty() {
            return None;
        }

        let (num_part, multiplier) = if s.ends_with('K') {
            (&s[..s.len() - 1], 1_000u64)
        } else if s.ends_with('M') {
            (&s[..s.len() - 1], 1_000_000u64)
        } else if s.ends_with('G') {
            (&s[..s.len() - 1], 1_000_000_000u64)
        } else {
            (s.as_str(), 1u64)
        };

        num_part.parse::<u64>().ok().map(|n| Self {
            count: n * multiplier,
        })
    }
}

/// Configuration for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Number of lines to emit.
    pub lines: u64,
    /// RNG seed; the same seed reproduces the same output.
    pub seed: u64,
    /// Minimum line length in bytes (newline excluded).
    pub min_len: usize,
    /// Maximum line length in bytes (newline excluded).
    pub max_len: usize,
    /// Terminate the final line with a newline.
    pub trailing_newline: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            lines: 1_000,
            seed: 42,
            min_len: 0,
            max_len: 80,
            trailing_newline: true,
        }
    }
}

/// Generate command.
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    pub config: GenerateConfig,
}

impl GenerateCommand {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Write the configured number of random printable-ASCII lines.
    pub fn run<W: Write>(&self, output: &mut W) -> Result<()> {
        let cfg = &self.config;
        if cfg.min_len > cfg.max_len {
            return Err(LineError::Config(format!(
                "min length {} exceeds max length {}",
                cfg.min_len, cfg.max_len
            )));
        }

        let mut rng = SmallRng::seed_from_u64(cfg.seed);
        let mut out = BufWriter::with_capacity(BUF_SIZE, output);
        let mut line = Vec::with_capacity(cfg.max_len + 1);

        for i in 0..cfg.lines {
            line.clear();
            let len = rng.gen_range(cfg.min_len..=cfg.max_len);
            for _ in 0..len {
                // Printable ASCII, space through tilde; never a newline.
                line.push(rng.gen_range(b' '..=b'~'));
            }
            if cfg.trailing_newline || i + 1 < cfg.lines {
                line.push(b'\n');
            }
            out.write_all(&line)?;
        }
        out.flush()?;
        Ok(())
    }
}
