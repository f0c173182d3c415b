//! Utility functions and helpers.
//!
//! This module provides common functionality used across commands:
//!
//! - [`discover`] - Recursive input file discovery
//! - [`logging`] - `tracing` subscriber setup
//! - [`parallel`] - Sequential or rayon-backed per-file execution
//! - [`progress`] - Progress tracking and display utilities
//! - [`reader`] - Smart file reader with automatic decompression
//! - [`time`] - MEF3 timestamp formatting helpers
//!
//! # Examples
//!
//! ## Reformatting timestamps
//!
//! ```
//! use san_audit_tools::utils::time::reformat_compact_timestamp;
//!
//! assert_eq!(reformat_compact_timestamp("20240115093000"), "2024-01-15-09.30.00");
//! ```
//!
//! ## Reading compressed files
//!
//! ```no_run
//! use san_audit_tools::utils::reader::read_to_string_lossy;
//!
//! // Automatically decompresses .gz and .zst files
//! let text = read_to_string_lossy("sw01.userconfig.txt.gz").unwrap();
//! ```

pub mod discover;
pub mod logging;
pub mod parallel;
pub mod progress;
pub mod reader;
pub mod time;
