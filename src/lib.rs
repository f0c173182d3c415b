//! # SAN Audit Tools
//!
//! Command-line tools for access-compliance reporting on SAN switches.
//!
//! ## Overview
//!
//! The collection playbook captures `userconfig --show -a` from every
//! Brocade switch in a customer's inventory. This crate turns those raw
//! captures into MEF3 audit files: one delimited record per local account,
//! each mapped to the human identity behind it, closed by a trailer carrying
//! a checksum of the records.
//!
//! It also builds the playbook's inventory from the host lists customers
//! usually hand over as spreadsheets.
//!
//! ## Architecture
//!
//! - [`userconfig`] - Dump header directives, block parsing, account records
//! - [`identity`] - Identity table index and ordered identity resolution
//! - [`mef3`] - Body records, checksum, trailer and file naming
//! - [`commands`] - Batch drivers behind each subcommand
//! - [`utils`] - File discovery, decompression, progress, logging, time
//! - [`error`] - Typed errors for fatal conditions
//!
//! ## Example Usage
//!
//! ```bash
//! # Build the inventory the collector runs against
//! san-audit inventory hosts.csv inventory/san.yml --customer ACME
//!
//! # Convert every capture under raw/ into mef3/
//! san-audit generate-mef3 raw/ mef3/ --gecos gecos.txt
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use san_audit_tools::identity::IdentityIndex;
//! use san_audit_tools::mef3::Mef3Document;
//! use san_audit_tools::userconfig::{header::RawDump, parse_userconfig};
//! use chrono::Utc;
//!
//! let dump = RawDump::parse(
//!     "### CUSTOMER=ACME\n### HOST=SW01\n### TS=20240115093000\n\
//!      Account Name: admin\nDescription: root\nEnabled: yes\nLocked: no\nRole: admin\n",
//! );
//! let header = dump.header("sw01", Utc::now());
//! let accounts = parse_userconfig(&dump.body);
//! let doc = Mef3Document::render(header, accounts, &IdentityIndex::empty(), "/tmp/out", &Utc::now());
//!
//! assert_eq!(doc.file_name(), "ACME-SAN_SW01_20240115093000.mef3");
//! assert_eq!(doc.body[0], "ACME|S|SW01|SAN|admin||root|enable||admin|admin");
//! ```

pub mod commands;
pub mod error;
pub mod identity;
pub mod mef3;
pub mod userconfig;
pub mod utils;
