//! Filter command implementation.
//!
//! Replaces every occurrence of a pattern in the input with asterisks,
//! preserving everything else byte for byte.

use crate::scanner::{LineError, Result};
use memchr::memmem;
use std::io::{Read, Write};

/// Filter command configuration.
#[derive(Debug, Clone)]
pub struct FilterCommand {
    /// Byte pattern to mask. Must be non-empty.
    pub pattern: Vec<u8>,
}

impl FilterCommand {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Replace each non-overlapping occurrence of the pattern, scanning
    /// left to right, with `*` repeated to the pattern's length.
    pub fn mask(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        let mut last = 0;
        for hit in memmem::find_iter(data, &self.pattern) {
            out.extend_from_slice(&data[last..hit]);
            out.resize(out.len() + self.pattern.len(), b'*');
            last = hit + self.pattern.len();
        }
        out.extend_from_slice(&data[last..]);
        out
    }

    /// Read all of `input`, mask, and write the result to `output`.
    ///
    /// The whole input is buffered before masking: an occurrence may span
    /// any boundary a chunked scan would introduce, newlines included.
    pub fn run<R: Read, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        if self.pattern.is_empty() {
            return Err(LineError::Config("pattern must not be empty".to_string()));
        }

        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        output.write_all(&self.mask(&data))?;
        Ok(())
    }
}
