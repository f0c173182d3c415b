//! Command implementations.
//!
//! Each module implements one `san-audit` subcommand:
//!
//! - [`generate_mef3`] - Convert raw `userconfig` dumps into MEF3 audit files
//! - [`inventory`] - Build the collection inventory from a hostname/IP list

pub mod generate_mef3;
pub mod inventory;
