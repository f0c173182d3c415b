//! Ordered identity resolution for switch accounts.
//!
//! Strategies run in priority order and the first non-empty answer wins:
//!
//! | Order | Source | Match |
//! |-------|--------|-------|
//! | 1 | `account-id` | cleaned username against `K` account ids |
//! | 2 | `tail-username` | cleaned username against tail tokens |
//! | 3 | `tail-description` | description against tail tokens |
//! | 4 | `preformed` | description already shaped like a table line |
//! | 5 | `description` | description with whitespace collapsed |
//!
//! The last step always answers, so resolution cannot fail.

use crate::identity::index::IdentityIndex;
use crate::userconfig::account::AccountRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static PREFORMED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}/[KF]/[^/]+/[^/]+").expect("identity pattern is valid"));

/// Which strategy produced an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    AccountId,
    TailUsername,
    TailDescription,
    Preformed,
    Description,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionSource::AccountId => "account-id",
            ResolutionSource::TailUsername => "tail-username",
            ResolutionSource::TailDescription => "tail-description",
            ResolutionSource::Preformed => "preformed",
            ResolutionSource::Description => "description",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub identity: String,
    pub source: ResolutionSource,
}

type Strategy = fn(&AccountRecord, &IdentityIndex) -> Option<String>;

const STRATEGIES: [(ResolutionSource, Strategy); 4] = [
    (ResolutionSource::AccountId, by_account_id),
    (ResolutionSource::TailUsername, by_username_tail),
    (ResolutionSource::TailDescription, by_description_tail),
    (ResolutionSource::Preformed, preformed_description),
];

/// Lowercased username with the vendor's trailing `*` markers removed.
pub fn clean_username(username: &str) -> String {
    username.trim_end_matches('*').to_lowercase()
}

/// True when `text` already looks like an identity table line,
/// e.g. `US/K/A123456/IBM/...`.
pub fn is_preformed_identity(text: &str) -> bool {
    PREFORMED_RE.is_match(text)
}

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn by_account_id(record: &AccountRecord, index: &IdentityIndex) -> Option<String> {
    index
        .by_account_id(&clean_username(&record.username))
        .map(str::to_string)
}

fn by_username_tail(record: &AccountRecord, index: &IdentityIndex) -> Option<String> {
    index
        .by_tail_token(&clean_username(&record.username))
        .map(str::to_string)
}

fn by_description_tail(record: &AccountRecord, index: &IdentityIndex) -> Option<String> {
    index
        .by_tail_token(record.description.to_lowercase().trim())
        .map(str::to_string)
}

fn preformed_description(record: &AccountRecord, _index: &IdentityIndex) -> Option<String> {
    is_preformed_identity(&record.description).then(|| record.description.clone())
}

/// Resolves the canonical identity for `record`.
pub fn resolve(record: &AccountRecord, index: &IdentityIndex) -> Resolution {
    for (source, strategy) in STRATEGIES {
        if let Some(identity) = strategy(record, index).filter(|id| !id.is_empty()) {
            tracing::debug!(username = %record.username, %source, "resolved identity");
            return Resolution { identity, source };
        }
    }

    Resolution {
        identity: collapse_whitespace(&record.description),
        source: ResolutionSource::Description,
    }
}
