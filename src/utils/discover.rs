//! Input discovery for batch commands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name suffixes of raw `userconfig --show -a` captures
pub const DUMP_SUFFIXES: [&str; 3] = [
    ".userconfig.txt",
    ".userconfig.txt.gz",
    ".userconfig.txt.zst",
];

/// Recursively lists files under `root` whose name ends with one of
/// `suffixes`, sorted by path. A missing root yields no files.
pub fn find_files(root: &Path, suffixes: &[&str]) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry =
            entry.with_context(|| format!("Failed to scan directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if suffixes.iter().any(|suffix| name.ends_with(suffix)) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Finds raw switch dumps under `root`.
pub fn find_dumps(root: &Path) -> Result<Vec<PathBuf>> {
    find_files(root, &DUMP_SUFFIXES)
}
