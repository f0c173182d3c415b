//! MEF3 body records.
//!
//! Every account becomes one line of exactly eleven `|`-separated fields:
//!
//! ```text
//! customer|S|asset|SAN|username||identity|enable||role|role
//! ```

use crate::userconfig::account::AccountRecord;
use crate::userconfig::header::AuditFileHeader;

pub const FIELD_SEP: &str = "|";
/// Field 2: asset class for storage devices
pub const ASSET_CLASS: &str = "S";
/// Field 4: SAN switches are reported apart from other storage
pub const CATEGORY: &str = "SAN";

pub const BODY_FIELD_COUNT: usize = 11;

/// Renders the body line for one account and its resolved identity.
pub fn body_line(header: &AuditFileHeader, record: &AccountRecord, identity: &str) -> String {
    let fields: [&str; BODY_FIELD_COUNT] = [
        &header.customer,
        ASSET_CLASS,
        &header.asset_id,
        CATEGORY,
        &record.username,
        "",
        identity,
        record.status.as_str(),
        "",
        &record.role,
        &record.role,
    ];
    fields.join(FIELD_SEP)
}
