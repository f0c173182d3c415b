//! Typed errors raised by the converters.
//!
//! Commands propagate these through [`anyhow::Result`] so that `main` can
//! print them and exit nonzero. Malformed input lines are never errors: they
//! are skipped where they are read.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The raw directory scan matched nothing
    #[error("No raw files found under: {}", .0.display())]
    NoInputFiles(PathBuf),

    /// `--customer` was given but is blank
    #[error("Customer cannot be empty")]
    EmptyCustomer,

    /// The hosts file had no usable hostname/ip rows
    #[error("No valid hostname/ip lines found")]
    NoHostLines,

    #[error("Invalid IP: {ip} (hostname={hostname})")]
    InvalidIp { ip: String, hostname: String },

    /// One or more files failed while running with `--continue-on-error`
    #[error("{failed} of {total} file(s) failed to convert")]
    Batch { failed: usize, total: usize },
}
