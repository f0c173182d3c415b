//! SAN switch inventory generation from a host list.
//!
//! Turns a loosely formatted `hostname ip` list (CSV, TSV, semicolons or
//! column-aligned text) into the YAML inventory used by the collection
//! playbook.
//!
//! # Usage
//!
//! ```bash
//! san-audit inventory hosts.csv inventory/san.yml --customer ACME
//! ```
//!
//! # Output
//!
//! ```yaml
//! all:
//!   children:
//!     san_brocade:
//!       hosts:
//!         SW01:
//!           ansible_host: 10.0.0.1
//!           customer: ACME
//!           category: SAN
//! ```

use crate::error::AuditError;
use crate::mef3::record::CATEGORY;
use crate::utils::reader::read_to_string_lossy;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;

static MULTI_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("column pattern is valid"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static UNSAFE_HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("hostname pattern is valid"));

const HOST_GROUP: &str = "san_brocade";
const HEADER_HOST_NAMES: [&str; 3] = ["hostname", "host", "name"];
const HEADER_IP_NAMES: [&str; 3] = ["ip", "ipaddress", "address"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
    pub ansible_host: String,
    pub customer: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
struct Inventory {
    all: AllGroup,
}

#[derive(Debug, Serialize)]
struct AllGroup {
    children: serde_yaml::Mapping,
}

#[derive(Debug, Serialize)]
struct HostGroup {
    hosts: serde_yaml::Mapping,
}

/// Splits one row into `(hostname, ip)`.
///
/// The separator is chosen per line: tab, then comma, then semicolon,
/// otherwise runs of two or more spaces. Rows with fewer than two
/// non-empty columns yield `None`.
pub fn split_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = if line.contains('\t') {
        line.split('\t').collect()
    } else if line.contains(',') {
        line.split(',').collect()
    } else if line.contains(';') {
        line.split(';').collect()
    } else {
        MULTI_SPACE_RE.split(line).collect()
    };

    let mut columns = parts.into_iter().map(str::trim).filter(|p| !p.is_empty());
    let hostname = columns.next()?;
    let ip = columns.next()?;
    Some((hostname.to_string(), ip.to_string()))
}

fn looks_like_header(hostname: &str, ip: &str) -> bool {
    HEADER_HOST_NAMES.contains(&hostname.to_lowercase().as_str())
        && HEADER_IP_NAMES.contains(&ip.to_lowercase().as_str())
}

/// Whitespace runs become `_`; anything outside `[A-Za-z0-9_.-]` is dropped.
pub fn safe_host(hostname: &str) -> String {
    let underscored = WHITESPACE_RE.replace_all(hostname.trim(), "_");
    UNSAFE_HOST_RE.replace_all(&underscored, "").into_owned()
}

/// Dotted-quad IPv4 check. Leading zeros are accepted.
pub fn is_ipv4(text: &str) -> bool {
    let parts: Vec<&str> = text.split('.').collect();
    parts.len() == 4
        && parts.iter().all(|p| {
            !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) && p.parse::<u8>().is_ok()
        })
}

/// Parses host list text into sanitized hostnames and their entries, keeping
/// first-seen order. A repeated hostname keeps its position but takes the
/// later address.
pub fn parse_hosts(text: &str, customer: &str) -> Result<Vec<(String, HostEntry)>, AuditError> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut rows: Vec<(String, String)> = text.lines().filter_map(split_line).collect();
    if rows.is_empty() {
        return Err(AuditError::NoHostLines);
    }
    if looks_like_header(&rows[0].0, &rows[0].1) {
        rows.remove(0);
    }

    let mut hosts: Vec<(String, HostEntry)> = Vec::new();
    for (hostname_raw, ip) in rows {
        let hostname = safe_host(&hostname_raw);
        if hostname.is_empty() || ip.is_empty() {
            continue;
        }
        if !is_ipv4(&ip) {
            return Err(AuditError::InvalidIp {
                ip,
                hostname: hostname_raw,
            });
        }

        let entry = HostEntry {
            ansible_host: ip,
            customer: customer.to_string(),
            category: CATEGORY.to_string(),
        };
        match hosts.iter_mut().find(|(name, _)| *name == hostname) {
            Some((_, existing)) => *existing = entry,
            None => hosts.push((hostname, entry)),
        }
    }

    Ok(hosts)
}

/// Renders the full inventory document.
pub fn render_inventory(hosts: &[(String, HostEntry)]) -> Result<String> {
    let mut host_map = serde_yaml::Mapping::new();
    for (name, entry) in hosts {
        host_map.insert(
            serde_yaml::Value::String(name.clone()),
            serde_yaml::to_value(entry)?,
        );
    }

    let mut children = serde_yaml::Mapping::new();
    children.insert(
        serde_yaml::Value::String(HOST_GROUP.to_string()),
        serde_yaml::to_value(HostGroup { hosts: host_map })?,
    );
    let inventory = Inventory {
        all: AllGroup { children },
    };
    Ok(serde_yaml::to_string(&inventory)?)
}

pub fn run(hosts_file: &Path, output: &Path, customer: &str) -> Result<usize> {
    let customer = customer.trim();
    if customer.is_empty() {
        return Err(AuditError::EmptyCustomer.into());
    }

    let text = read_to_string_lossy(hosts_file)?;
    let hosts = parse_hosts(&text, customer)?;
    let count = hosts.len();
    let yaml = render_inventory(&hosts)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(output, yaml)
        .with_context(|| format!("Failed to write inventory: {}", output.display()))?;

    println!("Wrote {} hosts to: {}", count, output.display());
    Ok(count)
}
