//! Smart file reader with automatic decompression support.
//!
//! Switch dumps are often archived compressed next to the live ones, so
//! every input is opened through [`open_file`] and decoded leniently.
//!
//! # Supported Formats
//!
//! - Plain text files
//! - Gzip compressed files (.gz)
//! - Zstandard compressed files (.zst)
//!
//! # Examples
//!
//! ```no_run
//! use san_audit_tools::utils::reader::read_to_string_lossy;
//!
//! // Automatically handles .gz, .zst, or plain text
//! let text = read_to_string_lossy("dumps/sw01.userconfig.txt.gz").unwrap();
//! println!("{} bytes", text.len());
//! ```

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const COMPRESSED_EXTENSIONS: [&str; 2] = ["gz", "zst"];

/// Opens a file with automatic decompression based on extension.
///
/// Detects file type by extension:
/// - `.gz` → Gzip decompression
/// - `.zst` → Zstandard decompression
/// - Otherwise → Plain file
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read + Send>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "gz" => {
            let decoder = GzDecoder::new(file);
            Ok(Box::new(decoder))
        }
        "zst" => {
            let decoder = zstd::Decoder::new(file).with_context(|| {
                format!("Failed to create zstd decoder for: {}", path.display())
            })?;
            Ok(Box::new(decoder))
        }
        _ => Ok(Box::new(file)),
    }
}

/// Reads a whole (possibly compressed) file, replacing invalid UTF-8 with
/// U+FFFD instead of failing.
pub fn read_to_string_lossy(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut reader = open_file(path)?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// The path a compressed file would have once decompressed
/// (`sw01.userconfig.txt.gz` → `sw01.userconfig.txt`).
pub fn uncompressed_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if COMPRESSED_EXTENSIONS.contains(&ext) => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}
