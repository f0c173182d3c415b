//! Account records extracted from parsed userconfig blocks.

use crate::userconfig::parser::FieldMap;
use std::fmt;

const ENABLED_VALUES: [&str; 3] = ["yes", "true", "enabled"];
const LOCKED_VALUES: [&str; 3] = ["yes", "true", "locked"];

/// Whether an account can log in, as written to MEF3 field 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Enabled,
    Disabled,
}

impl AccountStatus {
    /// An account is enabled only when explicitly enabled and not locked.
    /// Absent fields count as empty strings.
    pub fn from_flags(enabled: &str, locked: &str) -> Self {
        let enabled = enabled.to_lowercase();
        let locked = locked.to_lowercase();
        if ENABLED_VALUES.contains(&enabled.as_str()) && !LOCKED_VALUES.contains(&locked.as_str())
        {
            AccountStatus::Enabled
        } else {
            AccountStatus::Disabled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Enabled => "enable",
            AccountStatus::Disabled => "disable",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One local switch account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub username: String,
    pub description: String,
    pub status: AccountStatus,
    pub role: String,
}

impl AccountRecord {
    /// Builds a record from a block, or `None` when the block has no
    /// `account name` field.
    pub fn from_fields(fields: &FieldMap) -> Option<Self> {
        let username = fields.get("account name")?;
        let field = |key: &str| fields.get(key).map(String::as_str).unwrap_or("");

        Some(Self {
            username: username.clone(),
            description: field("description").to_string(),
            status: AccountStatus::from_flags(field("enabled"), field("locked")),
            role: field("role").to_string(),
        })
    }
}

/// Keeps only account blocks, preserving their order.
pub fn extract_accounts(blocks: &[FieldMap]) -> Vec<AccountRecord> {
    blocks.iter().filter_map(AccountRecord::from_fields).collect()
}
