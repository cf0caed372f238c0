//! Buffered output formatting for the command-line tools.
//!
//! Uses itoa for integer formatting to avoid allocation in hot output
//! loops; floats that need a fixed number of decimals go through std
//! formatting, which matches C printf rounding.

use crate::scanner::Result;
use std::io::{BufWriter, Write};

/// Output buffer size (256 KB).
const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Buffered writer with zero-allocation integer formatting.
pub struct LineWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> LineWriter<W> {
    /// Create a writer with the default buffer size.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a writer with an explicit buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// Write a full line followed by a newline.
    #[inline]
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<()> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    /// Write a single space.
    #[inline]
    pub fn write_space(&mut self) -> Result<()> {
        self.writer.write_all(b" ")?;
        Ok(())
    }

    /// Write a newline character.
    #[inline]
    pub fn write_newline(&mut self) -> Result<()> {
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write a float with exactly 2 decimal places.
    #[inline]
    pub fn write_float_2dp(&mut self, f: f32) -> Result<()> {
        write!(self.writer, "{:.2}", f)?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get mutable access to the underlying buffered writer.
    pub fn inner_mut(&mut self) -> &mut BufWriter<W> {
        &mut self.writer
    }
}
