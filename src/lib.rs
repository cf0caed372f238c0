// Clippy allows for the whole crate
#![allow(clippy::should_implement_trait)]

//! LineKit: incremental line extraction toolkit
//!
//! This library turns a raw chunked read primitive into successive
//! newline-terminated lines, with per-handle buffering so several streams
//! can be read concurrently by call order.
//!
//! # Features
//!
//! - **Chunked input**: lines are reassembled correctly however the source
//!   splits its bytes, newline-across-chunks included
//! - **Multiple streams**: one scanner tracks pending bytes per handle, up
//!   to a configured bound
//! - **Explicit state**: scanners are plain values; no globals, one per
//!   test or per subsystem
//!
//! # Example
//!
//! ```rust,no_run
//! use linekit::{LineScanner, ReadPool};
//! use std::fs::File;
//!
//! let mut pool = ReadPool::new();
//! let log = pool.register(File::open("app.log").unwrap());
//!
//! let mut scanner = LineScanner::new(pool);
//! while let Some(line) = scanner.next_line(log).unwrap() {
//!     // `line` includes its trailing newline, except possibly the last.
//!     print!("{}", String::from_utf8_lossy(&line));
//! }
//! ```

pub mod buffer;
pub mod commands;
pub mod config;
pub mod output;
pub mod parallel;
pub mod registry;
pub mod scanner;

// Re-export commonly used types
pub use config::ScanConfig;
pub use registry::Registry;
pub use scanner::{Handle, LineError, LineScanner, Lines, RawRead, ReadPool, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{
        FilterCommand, GenerateCommand, PermuteCommand, QueensCommand, TspCommand,
    };
    pub use crate::config::ScanConfig;
    pub use crate::scanner::{Handle, LineError, LineScanner, RawRead, ReadPool};
}
