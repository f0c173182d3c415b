//! Block parser for `userconfig --show -a` output.
//!
//! The switch prints one blank-line separated block per account, each line a
//! `Key: value` pair. Interactive prompt lines such as `switch:admin>` are
//! echoed into captured dumps and must be dropped before grouping.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static PROMPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\S+>\s*$").expect("prompt pattern is valid"));

/// Lowercased key to trimmed value, for one block.
pub type FieldMap = HashMap<String, String>;

/// Returns true for device shell prompt lines (`host:user>`).
pub fn is_prompt_line(line: &str) -> bool {
    PROMPT_RE.is_match(line)
}

/// Splits `key: value`, lowercasing the key.
///
/// The key is everything before the first colon, so values may themselves
/// contain colons. Lines without a colon, or with nothing before it, yield
/// `None`.
pub fn parse_field(line: &str) -> Option<(String, String)> {
    let (key, value) = line.trim().split_once(':')?;
    if key.is_empty() {
        return None;
    }
    Some((key.trim().to_lowercase(), value.trim().to_string()))
}

/// Groups the non-prompt lines of `text` into blocks of contiguous
/// non-blank lines.
pub fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if is_prompt_line(line) {
            continue;
        }
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parses the whole body into one field map per block, in source order.
pub fn parse_blocks(text: &str) -> Vec<FieldMap> {
    split_blocks(text)
        .into_iter()
        .map(|block| {
            let mut fields = FieldMap::new();
            for line in block {
                match parse_field(line) {
                    Some((key, value)) => {
                        fields.insert(key, value);
                    }
                    None => tracing::debug!(line, "skipping non key/value line"),
                }
            }
            fields
        })
        .collect()
}
