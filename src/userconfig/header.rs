//! `### KEY=VALUE` header directives written by the collection playbook.
//!
//! The collector prepends lines such as `### CUSTOMER=ACME` to each dump.
//! A directive starts with `### ` (three hashes and a space). Such lines are
//! never part of the CLI body, even when their key is unknown or they lack
//! an `=`. Anything else, `###KEY=VALUE` included, stays in the body.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

const DIRECTIVE_PREFIX: &str = "### ";

/// Format of the `TS` directive and of the output file name timestamp.
pub const COMPACT_TS_FORMAT: &str = "%Y%m%d%H%M%S";

/// A dump split into its directives and the remaining CLI text.
#[derive(Debug, Default)]
pub struct RawDump {
    pub directives: HashMap<String, String>,
    pub body: String,
}

impl RawDump {
    pub fn parse(content: &str) -> Self {
        let mut directives = HashMap::new();
        let mut body_lines = Vec::new();

        for line in content.lines() {
            match line.strip_prefix(DIRECTIVE_PREFIX) {
                Some(rest) => {
                    if let Some((key, value)) = rest.split_once('=') {
                        directives.insert(key.trim().to_string(), value.trim().to_string());
                    }
                }
                None => body_lines.push(line),
            }
        }

        Self {
            directives,
            body: body_lines.join("\n"),
        }
    }

    fn directive(&self, key: &str) -> Option<&str> {
        self.directives.get(key).map(String::as_str)
    }

    /// Resolves the header, falling back to `file_stem` for the asset id and
    /// to `now` for the timestamp when the directive is absent.
    pub fn header(&self, file_stem: &str, now: DateTime<Utc>) -> AuditFileHeader {
        AuditFileHeader {
            customer: self.directive("CUSTOMER").unwrap_or_default().to_string(),
            asset_id: self.directive("HOST").unwrap_or(file_stem).trim().to_string(),
            timestamp: self
                .directive("TS")
                .map(str::to_string)
                .unwrap_or_else(|| now.format(COMPACT_TS_FORMAT).to_string()),
        }
    }
}

/// Identifies the customer, device and capture time of one dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFileHeader {
    pub customer: String,
    pub asset_id: String,
    /// Normally 14 digits, `YYYYMMDDHHMMSS`
    pub timestamp: String,
}
