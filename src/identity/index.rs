//! Lookup tables built from the gecos-style identity file.
//!
//! Each line of the table is `/`-separated with at least five segments, for
//! example `US/K/A123456/IBM/Jane Doe`. The second segment marks the kind of
//! id (`K` for a company account id) and the last segment is the "tail
//! token" used for looser matches. Lookups always hand back the whole raw
//! line, exactly as written minus its line terminator, so the audit record
//! shows where an identity came from. Surrounding whitespace is ignored only
//! when deciding whether a line is blank, a comment or a key.

use crate::utils::reader::read_to_string_lossy;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

const MIN_SEGMENTS: usize = 5;

/// Immutable identity lookup, shared read-only across a batch.
#[derive(Debug, Default, Clone)]
pub struct IdentityIndex {
    by_account_id: HashMap<String, String>,
    by_tail_token: HashMap<String, String>,
}

impl IdentityIndex {
    /// An index with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds both maps from table text. Blank lines, `#` comments and lines
    /// with fewer than five segments are skipped. When a key repeats, the
    /// later line wins.
    pub fn from_table(text: &str) -> Self {
        let mut index = Self::default();

        for (line_num, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let segments: Vec<&str> = line.split('/').collect();
            if segments.len() < MIN_SEGMENTS {
                tracing::debug!(line = line_num + 1, "skipping short identity table line");
                continue;
            }

            if segments[1].trim().eq_ignore_ascii_case("k") {
                let account_id = segments[2].trim().to_lowercase();
                if !account_id.is_empty() {
                    index.by_account_id.insert(account_id, raw.to_string());
                }
            }

            let tail = segments[segments.len() - 1].trim().to_lowercase();
            if !tail.is_empty() {
                index.by_tail_token.insert(tail, raw.to_string());
            }
        }

        index
    }

    /// Loads the table from `path`. A missing file yields an empty index so
    /// that conversion still runs with description fallbacks.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "identity table not found, identities fall back to descriptions"
            );
            return Ok(Self::empty());
        }

        let text = read_to_string_lossy(path)?;
        let index = Self::from_table(&text);
        tracing::info!(
            path = %path.display(),
            account_ids = index.by_account_id.len(),
            tail_tokens = index.by_tail_token.len(),
            "loaded identity table"
        );
        if index.is_empty() {
            tracing::warn!(path = %path.display(), "identity table has no usable lines");
        }
        Ok(index)
    }

    /// Looks up a lowercased account id (`K` lines only).
    pub fn by_account_id(&self, key: &str) -> Option<&str> {
        self.by_account_id.get(key).map(String::as_str)
    }

    /// Looks up a lowercased final segment.
    pub fn by_tail_token(&self, key: &str) -> Option<&str> {
        self.by_tail_token.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_account_id.is_empty() && self.by_tail_token.is_empty()
    }
}
