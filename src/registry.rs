//! Per-handle registry of pending bytes.
//!
//! Each active handle maps to the bytes read from its stream but not yet
//! returned as part of a complete line. Storage is a sparse map behind a
//! validated handle bound, so a pathological handle value costs a range
//! check, not a table slot.

use crate::scanner::{Handle, LineError, Result};
use rustc_hash::FxHashMap;

/// Bounded sparse storage of per-handle pending bytes.
///
/// Invariant: the map only ever holds non-empty buffers. An entry appears
/// when a split leaves a remainder and disappears when the remainder is
/// consumed or discarded.
#[derive(Debug)]
pub struct Registry {
    slots: FxHashMap<Handle, Vec<u8>>,
    max_handles: u32,
}

impl Registry {
    /// Create a registry accepting handles in `0..max_handles`.
    pub fn new(max_handles: u32) -> Self {
        Self {
            slots: FxHashMap::default(),
            max_handles,
        }
    }

    /// Validate a handle against the configured bound.
    ///
    /// Read-only: an out-of-range handle never creates or disturbs storage.
    #[inline]
    pub fn check(&self, handle: Handle) -> Result<()> {
        if handle >= self.max_handles {
            return Err(LineError::InvalidHandle {
                handle,
                limit: self.max_handles,
            });
        }
        Ok(())
    }

    /// Remove and return the pending bytes for `handle`.
    ///
    /// Returns an empty buffer when nothing is pending, so first use of a
    /// handle needs no separate initialization step.
    #[inline]
    pub fn take(&mut self, handle: Handle) -> Vec<u8> {
        self.slots.remove(&handle).unwrap_or_default()
    }

    /// Store pending bytes for `handle`.
    ///
    /// An empty buffer clears the entry instead of storing it.
    #[inline]
    pub fn put(&mut self, handle: Handle, bytes: Vec<u8>) {
        if !bytes.is_empty() {
            self.slots.insert(handle, bytes);
        }
    }

    /// Drop any pending bytes for `handle`.
    #[inline]
    pub fn discard(&mut self, handle: Handle) {
        self.slots.remove(&handle);
    }

    /// Number of bytes pending for `handle` (0 when untracked).
    #[inline]
    pub fn pending(&self, handle: Handle) -> usize {
        self.slots.get(&handle).map_or(0, Vec::len)
    }

    /// Number of handles currently carrying pending bytes.
    #[inline]
    pub fn tracked(&self) -> usize {
        self.slots.len()
    }

    /// The configured handle bound.
    #[inline]
    pub fn limit(&self) -> u32 {
        self.max_handles
    }

    /// Drop all pending bytes for all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
