//! Per-file batch execution, sequential or on a rayon pool.
//!
//! Each file is handled independently, so files can be converted
//! concurrently. Results always come back in input order, which keeps the
//! console output and reports identical between the two modes.

use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of processing a single file
#[derive(Debug)]
pub struct FileProcessResult<T> {
    pub file_path: PathBuf,
    pub outcome: Result<T>,
}

/// How a batch reacts to a failing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure; later files are not reported
    Abort,
    /// Process every file and report each failure
    Continue,
}

/// Runs `processor` over `files` and returns one result per processed file,
/// in input order.
///
/// With [`FailurePolicy::Abort`] the returned list ends at the first failure
/// and no file after it is started once that failure is seen. In parallel
/// mode files already running on other workers still finish, but they are
/// not reported.
pub fn process_files<T, F>(
    files: &[PathBuf],
    parallel: bool,
    policy: FailurePolicy,
    processor: F,
) -> Vec<FileProcessResult<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Send + Sync,
{
    let run = |path: &PathBuf| FileProcessResult {
        file_path: path.clone(),
        outcome: processor(path.as_path()),
    };

    let mut results: Vec<FileProcessResult<T>> = if parallel {
        // Lowest index that has failed so far; files past it are skipped.
        let first_failure = AtomicUsize::new(usize::MAX);
        files
            .par_iter()
            .enumerate()
            .filter_map(|(idx, path)| {
                if policy == FailurePolicy::Abort && idx > first_failure.load(Ordering::SeqCst) {
                    return None;
                }
                let result = run(path);
                if result.outcome.is_err() {
                    first_failure.fetch_min(idx, Ordering::SeqCst);
                }
                Some(result)
            })
            .collect()
    } else {
        let mut results = Vec::with_capacity(files.len());
        for path in files {
            let result = run(path);
            let failed = result.outcome.is_err();
            results.push(result);
            if failed && policy == FailurePolicy::Abort {
                break;
            }
        }
        results
    };

    if policy == FailurePolicy::Abort {
        if let Some(first_err) = results.iter().position(|r| r.outcome.is_err()) {
            results.truncate(first_err + 1);
        }
    }

    results
}
