//! MEF3 trailer lines and payload checksum.
//!
//! The trailer is two lines that downstream ingestion matches literally:
//!
//! ```text
//! ACME|S|SW01|SAN|NOTaRealID-Ansible||00/V///2024-01-15-09.30.00:FN=iam_extract.ps1:VER=V2.0.74:CKSUM=123|||#a:tricode#o:/tmp/iam_extract.mef3
//! #kyndrylonly #g:Ansible ### FINAL_TS=2025-03-04-05.06.07 PROCNUM=1:PROCSPEED=2295:MEM=17179332608:NETWORK=10000000000 10000000000 10000000000|0|
//! ```
//!
//! The first line carries the dump's own timestamp, the second the time the
//! file was written. They are different clocks and stay separate.

use crate::mef3::record::{ASSET_CLASS, CATEGORY, FIELD_SEP};
use crate::userconfig::header::AuditFileHeader;
use crate::utils::time::{format_mef3_timestamp, reformat_compact_timestamp};
use chrono::{DateTime, Utc};

/// Placeholder account name marking the trailer record
pub const TRAILER_ACCOUNT: &str = "NOTaRealID-Ansible";
pub const TOOL_NAME: &str = "iam_extract.ps1";
pub const TOOL_VERSION: &str = "V2.0.74";
pub const DEFAULT_OUTPUT_TAG_PATH: &str = "/tmp/iam_extract.mef3";
const HOST_RESOURCES: &str =
    "PROCNUM=1:PROCSPEED=2295:MEM=17179332608:NETWORK=10000000000 10000000000 10000000000";

/// Adler-32 over the body lines joined by `\n`, plus one trailing `\n`.
pub fn checksum<S: AsRef<str>>(body_lines: &[S]) -> u32 {
    let mut hasher = adler2::Adler32::new();
    for (i, line) in body_lines.iter().enumerate() {
        if i > 0 {
            hasher.write_slice(b"\n");
        }
        hasher.write_slice(line.as_ref().as_bytes());
    }
    hasher.write_slice(b"\n");
    hasher.checksum()
}

/// Builds both trailer lines.
pub fn trailer_lines(
    header: &AuditFileHeader,
    checksum: u32,
    output_tag_path: &str,
    written_at: &DateTime<Utc>,
) -> [String; 2] {
    let metadata = format!(
        "00/V///{}:FN={}:VER={}:CKSUM={}|||#a:tricode#o:{}",
        reformat_compact_timestamp(&header.timestamp),
        TOOL_NAME,
        TOOL_VERSION,
        checksum,
        output_tag_path
    );
    let summary = [
        header.customer.as_str(),
        ASSET_CLASS,
        header.asset_id.as_str(),
        CATEGORY,
        TRAILER_ACCOUNT,
        "",
        metadata.as_str(),
    ]
    .join(FIELD_SEP);

    let final_line = format!(
        "#kyndrylonly #g:Ansible ### FINAL_TS={} {}|0|",
        format_mef3_timestamp(written_at),
        HOST_RESOURCES
    );

    [summary, final_line]
}
