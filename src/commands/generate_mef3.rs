//! MEF3 generation from raw switch user dumps.
//!
//! Scans a directory tree for `*.userconfig.txt` captures (optionally
//! `.gz`/`.zst` compressed), converts each one into a MEF3 audit file and
//! prints one status line per file.
//!
//! # Usage
//!
//! ```bash
//! # Convert every dump under raw/ into mef3/
//! san-audit generate-mef3 raw/ mef3/
//!
//! # Use a specific identity table and keep a resolution report
//! san-audit generate-mef3 raw/ mef3/ --gecos /etc/san-audit/gecos.txt --report accounts.csv
//!
//! # Large batches: convert files concurrently, report failures per file
//! san-audit generate-mef3 raw/ mef3/ --parallel --continue-on-error
//! ```
//!
//! # Input
//!
//! Each dump starts with the collector's `### KEY=VALUE` directives
//! (`CUSTOMER`, `HOST`, `TS`) followed by the `userconfig --show -a` output.
//!
//! # Output
//!
//! One `{customer}-SAN_{host}_{ts}.mef3` file per dump. Existing files with
//! the same name are overwritten. With `--report`, one row per account
//! showing which identity it resolved to and how.

use crate::error::AuditError;
use crate::identity::IdentityIndex;
use crate::mef3::Mef3Document;
use crate::userconfig::header::RawDump;
use crate::userconfig::parse_userconfig;
use crate::utils::discover::find_dumps;
use crate::utils::parallel::{process_files, FailurePolicy};
use crate::utils::progress::ProgressBar;
use crate::utils::reader::{read_to_string_lossy, uncompressed_path};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Identity table file name looked up next to the executable
pub const DEFAULT_IDENTITY_TABLE: &str = "gecos.txt";

/// Report file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    /// JSON for `.json` paths, CSV otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Csv,
        }
    }
}

/// Settings for one `generate-mef3` run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub raw_dir: PathBuf,
    pub out_dir: PathBuf,
    pub identity_table: PathBuf,
    /// Value of the `#o:` tag in the first trailer line
    pub output_tag_path: String,
    pub parallel: bool,
    pub continue_on_error: bool,
    pub report: Option<PathBuf>,
    pub report_format: Option<ReportFormat>,
}

impl GenerateOptions {
    pub fn new(raw_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            out_dir: out_dir.into(),
            identity_table: default_identity_table(),
            output_tag_path: crate::mef3::trailer::DEFAULT_OUTPUT_TAG_PATH.to_string(),
            parallel: false,
            continue_on_error: false,
            report: None,
            report_format: None,
        }
    }
}

/// `gecos.txt` beside the running binary, or in the working directory when
/// the binary location is unknown.
pub fn default_identity_table() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_IDENTITY_TABLE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_IDENTITY_TABLE))
}

/// One row of the resolution report
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub source_file: String,
    pub output_file: String,
    pub customer: String,
    pub asset_id: String,
    pub username: String,
    pub status: String,
    pub identity: String,
    pub resolution: String,
}

/// Outcome of converting one dump
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub document: Mef3Document,
}

impl ConvertedFile {
    pub fn users(&self) -> usize {
        self.document.accounts.len()
    }

    fn report_rows(&self) -> impl Iterator<Item = ReportRow> + '_ {
        let header = &self.document.header;
        let output_file = self
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.document.accounts.iter().map(move |account| ReportRow {
            source_file: self.source.display().to_string(),
            output_file: output_file.clone(),
            customer: header.customer.clone(),
            asset_id: header.asset_id.clone(),
            username: account.record.username.clone(),
            status: account.record.status.to_string(),
            identity: account.resolution.identity.clone(),
            resolution: account.resolution.source.to_string(),
        })
    }
}

/// Stem used as asset id when a dump has no `HOST` directive,
/// e.g. `sw01.userconfig` for `sw01.userconfig.txt.gz`.
pub fn dump_stem(path: &Path) -> String {
    uncompressed_path(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Converts a single dump and writes its MEF3 file into `out_dir`.
///
/// `now` is both the fallback capture time and the trailer's `FINAL_TS`.
pub fn convert_dump(
    path: &Path,
    out_dir: &Path,
    index: &IdentityIndex,
    output_tag_path: &str,
    now: DateTime<Utc>,
) -> Result<ConvertedFile> {
    let content = read_to_string_lossy(path)?;
    let dump = RawDump::parse(&content);
    let header = dump.header(&dump_stem(path), now);
    if header.customer.is_empty() {
        tracing::warn!(file = %path.display(), "dump has no CUSTOMER directive");
    }

    let records = parse_userconfig(&dump.body);
    tracing::debug!(file = %path.display(), accounts = records.len(), "parsed dump");

    let document = Mef3Document::render(header, records, index, output_tag_path, &now);
    let output = out_dir.join(document.file_name());
    fs::write(&output, document.contents())
        .with_context(|| format!("Failed to write MEF3 file: {}", output.display()))?;

    Ok(ConvertedFile {
        source: path.to_path_buf(),
        output,
        document,
    })
}

fn write_report(path: &Path, format: ReportFormat, files: &[ConvertedFile]) -> Result<()> {
    let rows: Vec<ReportRow> = files.iter().flat_map(ConvertedFile::report_rows).collect();
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;

    match format {
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(file);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        ReportFormat::Json => {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }

    eprintln!("Wrote {} account row(s) to: {}", rows.len(), path.display());
    Ok(())
}

pub fn run(options: &GenerateOptions) -> Result<Vec<ConvertedFile>> {
    let raw_files = find_dumps(&options.raw_dir)?;
    if raw_files.is_empty() {
        return Err(AuditError::NoInputFiles(options.raw_dir.clone()).into());
    }

    let index = IdentityIndex::load(&options.identity_table)?;
    fs::create_dir_all(&options.out_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            options.out_dir.display()
        )
    })?;

    let policy = if options.continue_on_error {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let progress = ProgressBar::new(raw_files.len(), "Converting");
    let results = process_files(&raw_files, options.parallel, policy, |path| {
        let converted = convert_dump(
            path,
            &options.out_dir,
            &index,
            &options.output_tag_path,
            Utc::now(),
        );
        progress.inc();
        converted
    });
    progress.finish_with_message(&format!("Converted {} file(s)", progress.position()));

    let mut converted = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result.outcome {
            Ok(file) => {
                progress.suspend(|| {
                    println!(
                        "OK  {}  ->  {}  (users={})",
                        file.source.display(),
                        file.document.file_name(),
                        file.users()
                    )
                });
                converted.push(file);
            }
            Err(err) if policy == FailurePolicy::Continue => {
                failed += 1;
                eprintln!("FAIL  {}  {:#}", result.file_path.display(), err);
            }
            Err(err) => {
                return Err(err.context(format!(
                    "Failed to convert {}",
                    result.file_path.display()
                )));
            }
        }
    }

    println!(
        "Generated {} MEF3 file(s) into: {}",
        converted.len(),
        options.out_dir.display()
    );

    if let Some(report) = &options.report {
        let format = options
            .report_format
            .unwrap_or_else(|| ReportFormat::from_path(report));
        write_report(report, format, &converted)?;
    }

    if failed > 0 {
        return Err(AuditError::Batch {
            failed,
            total: raw_files.len(),
        }
        .into());
    }

    Ok(converted)
}
