//! Incremental line extraction over handle-addressed byte streams.
//!
//! A [`LineScanner`] turns a raw chunked read primitive into successive
//! newline-terminated lines. Input may arrive in arbitrary-sized chunks, a
//! newline may span chunk boundaries, and several streams can be read
//! concurrently by call order: bytes read past a line boundary are kept per
//! handle and served on the next call for that handle.

use crate::buffer;
use crate::config::ScanConfig;
use crate::registry::Registry;
use std::collections::TryReserveError;
use std::io::{self, Read};
use thiserror::Error;

/// Identifier for one input stream, supplied and owned by the caller.
///
/// A handle is only an index: the scanner never opens or closes anything.
/// Reusing a handle value for a different underlying stream without an
/// intervening [`LineScanner::release`] leaves the old stream's pending
/// bytes in front of the new stream's data; callers must not do that.
pub type Handle = u32;

/// Errors reported by the scanner.
///
/// Every error path leaves the affected handle with no pending bytes, so a
/// later call for the same handle behaves as if the handle were fresh.
#[derive(Error, Debug)]
pub enum LineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid handle {handle}: outside configured range 0..{limit}")]
    InvalidHandle { handle: Handle, limit: u32 },

    #[error("read failed on handle {handle}: {source}")]
    Read { handle: Handle, source: io::Error },

    #[error("buffer allocation failed on handle {handle}: {source}")]
    OutOfMemory {
        handle: Handle,
        source: TryReserveError,
    },
}

pub type Result<T> = std::result::Result<T, LineError>;

/// The raw chunked read primitive the scanner consumes.
///
/// Semantics follow blocking byte-stream reads: `Ok(n)` with `n > 0` means
/// `n` bytes were written to the front of `buf` (short reads are fine, the
/// scanner loops), `Ok(0)` means the stream behind `handle` is exhausted,
/// and `Err` means a read fault. A fault is terminal for the handle's
/// pending bytes; the scanner does not retry.
pub trait RawRead {
    fn raw_read(&mut self, handle: Handle, buf: &mut [u8]) -> io::Result<usize>;
}

/// Incremental line reader over a [`RawRead`] source.
///
/// Each call to [`next_line`](Self::next_line) returns one line for one
/// handle; unconsumed bytes stay registered for that handle. The scanner is
/// single-threaded by construction: every operation takes `&mut self`, so
/// calls for any handle are serialized by the borrow checker. Independent
/// scanners (one per thread, per test, per subsystem) do not share state.
pub struct LineScanner<S: RawRead> {
    source: S,
    registry: Registry,
    chunk: Vec<u8>,
}

impl<S: RawRead> LineScanner<S> {
    /// Create a scanner with the default configuration.
    pub fn new(source: S) -> Self {
        // Default config always passes validation.
        Self::with_config(source, ScanConfig::default())
            .expect("default ScanConfig is valid")
    }

    /// Create a scanner with an explicit configuration.
    ///
    /// Fails fast on a zero chunk size or a zero handle bound.
    pub fn with_config(source: S, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            registry: Registry::new(config.max_handles),
            chunk: vec![0u8; config.chunk_size],
        })
    }

    /// Return the next line for `handle`, or `Ok(None)` at end of stream.
    ///
    /// The returned line includes its terminating newline; the final line of
    /// a stream that ends without one is returned as-is. End of stream is a
    /// normal terminal signal: calling again keeps returning `Ok(None)` as
    /// long as the source keeps reporting exhaustion.
    ///
    /// On [`LineError::Read`] or [`LineError::OutOfMemory`] the handle's
    /// pending bytes are discarded; buffered data cannot be trusted to line
    /// up with the stream after a fault, so the handle restarts clean.
    pub fn next_line(&mut self, handle: Handle) -> Result<Option<Vec<u8>>> {
        self.registry.check(handle)?;

        // Pending bytes move out of the registry for the duration of the
        // call; every early return below therefore leaves the entry absent.
        let mut pending = self.registry.take(handle);
        let mut newline = buffer::find_byte(&pending, b'\n');

        while newline.is_none() {
            let n = match self.source.raw_read(handle, &mut self.chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => return Err(LineError::Read { handle, source: e }),
            };
            let searched = pending.len();
            if let Err(e) = buffer::append(&mut pending, &self.chunk[..n]) {
                return Err(LineError::OutOfMemory { handle, source: e });
            }
            // Only the newly appended suffix can contain the first newline.
            newline = buffer::find_byte(&pending[searched..], b'\n').map(|i| searched + i);
        }

        if pending.is_empty() {
            return Ok(None);
        }

        let split = newline.map_or(pending.len(), |i| i + 1);
        let line = buffer::take_prefix(&mut pending, split);
        self.registry.put(handle, pending);
        Ok(Some(line))
    }

    /// Iterate over the lines of one handle.
    pub fn lines(&mut self, handle: Handle) -> Lines<'_, S> {
        Lines {
            scanner: self,
            handle,
            done: false,
        }
    }

    /// Bytes buffered for `handle` but not yet returned.
    pub fn pending(&self, handle: Handle) -> usize {
        self.registry.pending(handle)
    }

    /// Number of handles currently carrying pending bytes.
    pub fn tracked(&self) -> usize {
        self.registry.tracked()
    }

    /// Drop pending bytes for one handle.
    ///
    /// Required before reusing the handle value for a different stream, and
    /// for releasing memory of a handle that will never be drained.
    pub fn release(&mut self, handle: Handle) {
        self.registry.discard(handle);
    }

    /// Drop pending bytes for all handles.
    pub fn reset(&mut self) {
        self.registry.clear();
    }

    /// Access the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the scanner, returning the source.
    pub fn into_source(self) -> S {
        self.source
    }
}

/// Iterator over the lines of one handle.
///
/// Yields `Err` once for a failed call, then ends; end of stream ends the
/// iteration directly.
pub struct Lines<'a, S: RawRead> {
    scanner: &'a mut LineScanner<S>,
    handle: Handle,
    done: bool,
}

impl<S: RawRead> Iterator for Lines<'_, S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next_line(self.handle) {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Bridge from ordinary [`Read`] values to the handle-addressed primitive.
///
/// Readers are assigned ascending handles in registration order. The pool
/// never removes readers; an exhausted reader simply keeps reporting 0.
pub struct ReadPool<R: Read> {
    readers: Vec<R>,
}

impl<R: Read> ReadPool<R> {
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Register a reader and return its handle.
    pub fn register(&mut self, reader: R) -> Handle {
        self.readers.push(reader);
        (self.readers.len() - 1) as Handle
    }

    /// Number of registered readers.
    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl<R: Read> Default for ReadPool<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read> RawRead for ReadPool<R> {
    fn raw_read(&mut self, handle: Handle, buf: &mut [u8]) -> io::Result<usize> {
        let reader = self.readers.get_mut(handle as usize).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no reader registered for handle")
        })?;
        reader.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Scripted source: each handle pops pre-arranged read outcomes, then
    /// reports end of stream. Chunks model short reads of any size.
    struct Scripted {
        events: Vec<VecDeque<io::Result<Vec<u8>>>>,
    }

    impl Scripted {
        fn new(scripts: Vec<Vec<io::Result<Vec<u8>>>>) -> Self {
            Self {
                events: scripts.into_iter().map(VecDeque::from).collect(),
            }
        }

        fn chunks(chunks: &[&[u8]]) -> Self {
            Self::new(vec![chunks.iter().map(|c| Ok(c.to_vec())).collect()])
        }
    }

    impl RawRead for Scripted {
        fn raw_read(&mut self, handle: Handle, buf: &mut [u8]) -> io::Result<usize> {
            match self.events[handle as usize].pop_front() {
                Some(Ok(chunk)) => {
                    assert!(chunk.len() <= buf.len(), "scripted chunk exceeds request");
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    fn small_scanner<S: RawRead>(source: S) -> LineScanner<S> {
        LineScanner::with_config(
            source,
            ScanConfig::new().with_chunk_size(16).with_max_handles(8),
        )
        .unwrap()
    }

    #[test]
    fn test_three_lines_no_trailing_newline() {
        let mut scanner = small_scanner(Scripted::chunks(&[b"a\nb\nc"]));

        assert_eq!(scanner.next_line(0).unwrap(), Some(b"a\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"b\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"c".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), None);
    }

    #[test]
    fn test_empty_stream() {
        let mut scanner = small_scanner(Scripted::chunks(&[]));
        assert_eq!(scanner.next_line(0).unwrap(), None);
    }

    #[test]
    fn test_only_newlines() {
        let mut scanner = small_scanner(Scripted::chunks(&[b"\n\n"]));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), None);
    }

    #[test]
    fn test_newline_spanning_chunks() {
        // The newline arrives in a later chunk than the line body.
        let mut scanner = small_scanner(Scripted::chunks(&[b"ab", b"cd", b"\nef"]));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"abcd\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"ef".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), None);
    }

    #[test]
    fn test_end_of_stream_is_idempotent() {
        let mut scanner = small_scanner(Scripted::chunks(&[b"x\n"]));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"x\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), None);
        assert_eq!(scanner.next_line(0).unwrap(), None);
        assert_eq!(scanner.next_line(0).unwrap(), None);
    }

    #[test]
    fn test_invalid_handle_leaves_registry_alone() {
        let mut scanner = small_scanner(Scripted::chunks(&[b"data\nrest"]));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"data\n".to_vec()));
        assert_eq!(scanner.tracked(), 1);

        let err = scanner.next_line(99).unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidHandle { handle: 99, limit: 8 }
        ));
        assert_eq!(scanner.tracked(), 1);
        assert_eq!(scanner.pending(0), 4);
    }

    #[test]
    fn test_read_error_discards_pending() {
        let gone = io::Error::other("device gone");
        let mut scanner = small_scanner(Scripted::new(vec![vec![
            Ok(b"part".to_vec()),
            Err(gone),
            Ok(b"second\n".to_vec()),
        ]]));

        let err = scanner.next_line(0).unwrap_err();
        assert!(matches!(err, LineError::Read { handle: 0, .. }));
        assert_eq!(scanner.pending(0), 0);

        // The handle behaves as fresh: no stale "part" bytes resurface.
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"second\n".to_vec()));
    }

    #[test]
    fn test_interleaved_handles_do_not_mix() {
        let mut scanner = small_scanner(Scripted::new(vec![
            vec![Ok(b"aaa\naa".to_vec())],
            vec![Ok(b"bb\nbbb\n".to_vec())],
        ]));

        assert_eq!(scanner.next_line(0).unwrap(), Some(b"aaa\n".to_vec()));
        assert_eq!(scanner.next_line(1).unwrap(), Some(b"bb\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"aa".to_vec()));
        assert_eq!(scanner.next_line(1).unwrap(), Some(b"bbb\n".to_vec()));
        assert_eq!(scanner.next_line(0).unwrap(), None);
        assert_eq!(scanner.next_line(1).unwrap(), None);
    }

    #[test]
    fn test_release_drops_pending_bytes() {
        let mut scanner = small_scanner(Scripted::chunks(&[b"one\ntwo"]));
        assert_eq!(scanner.next_line(0).unwrap(), Some(b"one\n".to_vec()));
        assert_eq!(scanner.pending(0), 3);

        scanner.release(0);
        assert_eq!(scanner.pending(0), 0);
        assert_eq!(scanner.next_line(0).unwrap(), None);
    }

    #[test]
    fn test_lines_iterator() {
        let mut scanner = small_scanner(Scripted::chunks(&[b"x\ny\nz"]));
        let lines: Vec<Vec<u8>> = scanner.lines(0).collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec![b"x\n".to_vec(), b"y\n".to_vec(), b"z".to_vec()]);
    }

    #[test]
    fn test_read_pool_over_cursors() {
        let mut pool = ReadPool::new();
        let a = pool.register(Cursor::new(b"left\n".to_vec()));
        let b = pool.register(Cursor::new(b"right\n".to_vec()));

        let mut scanner = LineScanner::new(pool);
        assert_eq!(scanner.next_line(b).unwrap(), Some(b"right\n".to_vec()));
        assert_eq!(scanner.next_line(a).unwrap(), Some(b"left\n".to_vec()));
        assert_eq!(scanner.next_line(a).unwrap(), None);
        assert_eq!(scanner.next_line(b).unwrap(), None);
    }

    #[test]
    fn test_read_pool_unregistered_handle_is_read_error() {
        let mut pool: ReadPool<Cursor<Vec<u8>>> = ReadPool::new();
        pool.register(Cursor::new(b"x\n".to_vec()));

        let mut scanner = LineScanner::new(pool);
        // Handle 5 is within the scanner's range but has no reader behind it.
        let err = scanner.next_line(5).unwrap_err();
        assert!(matches!(err, LineError::Read { handle: 5, .. }));
    }

    #[test]
    fn test_chunk_size_one() {
        let source = ReadPool::new();
        let mut scanner = LineScanner::with_config(
            source,
            ScanConfig::new().with_chunk_size(1).with_max_handles(2),
        )
        .unwrap();
        let h = scanner.source_mut().register(Cursor::new(b"ab\ncd".to_vec()));

        assert_eq!(scanner.next_line(h).unwrap(), Some(b"ab\n".to_vec()));
        assert_eq!(scanner.next_line(h).unwrap(), Some(b"cd".to_vec()));
        assert_eq!(scanner.next_line(h).unwrap(), None);
    }
}
