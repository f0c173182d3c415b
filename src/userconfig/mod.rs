//! Parsing of raw Brocade `userconfig --show -a` dumps.
//!
//! A dump is turned into records in three steps:
//!
//! 1. [`header`] splits off the `### KEY=VALUE` directives
//! 2. [`parser`] groups the CLI body into key/value blocks
//! 3. [`account`] keeps the blocks that describe an account

pub mod account;
pub mod header;
pub mod parser;

use account::{extract_accounts, AccountRecord};
use parser::parse_blocks;

/// Parses CLI body text straight into account records.
pub fn parse_userconfig(body: &str) -> Vec<AccountRecord> {
    extract_accounts(&parse_blocks(body))
}
