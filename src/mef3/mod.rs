//! MEF3 audit file rendering.
//!
//! A MEF3 file lists one body record per switch account (see [`record`])
//! followed by the two trailer lines (see [`trailer`]). The trailer checksum
//! covers the body lines only, so re-rendering the same accounts always
//! gives the same checksum.

pub mod record;
pub mod trailer;

use crate::identity::{resolve, IdentityIndex, Resolution};
use crate::userconfig::account::AccountRecord;
use crate::userconfig::header::AuditFileHeader;
use chrono::{DateTime, Utc};

/// An account paired with the identity it resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedAccount {
    pub record: AccountRecord,
    pub resolution: Resolution,
}

/// A fully rendered MEF3 file, ready to write.
#[derive(Debug, Clone)]
pub struct Mef3Document {
    pub header: AuditFileHeader,
    pub accounts: Vec<ResolvedAccount>,
    pub body: Vec<String>,
    pub checksum: u32,
    pub trailer: [String; 2],
}

impl Mef3Document {
    /// Resolves every account against `index` and renders body and trailer.
    /// `written_at` feeds the trailer's `FINAL_TS`.
    pub fn render(
        header: AuditFileHeader,
        records: Vec<AccountRecord>,
        index: &IdentityIndex,
        output_tag_path: &str,
        written_at: &DateTime<Utc>,
    ) -> Self {
        let accounts: Vec<ResolvedAccount> = records
            .into_iter()
            .map(|record| {
                let resolution = resolve(&record, index);
                ResolvedAccount { record, resolution }
            })
            .collect();

        let body: Vec<String> = accounts
            .iter()
            .map(|a| record::body_line(&header, &a.record, &a.resolution.identity))
            .collect();
        let checksum = trailer::checksum(&body);
        let trailer = trailer::trailer_lines(&header, checksum, output_tag_path, written_at);

        Self {
            header,
            accounts,
            body,
            checksum,
            trailer,
        }
    }

    /// `{customer}-SAN_{asset}_{timestamp}.mef3`
    pub fn file_name(&self) -> String {
        output_file_name(&self.header)
    }

    /// Body then trailer, every line newline-terminated.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for line in self.body.iter().chain(self.trailer.iter()) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

pub fn output_file_name(header: &AuditFileHeader) -> String {
    format!(
        "{}-{}_{}_{}.mef3",
        header.customer,
        record::CATEGORY,
        header.asset_id,
        header.timestamp
    )
}
