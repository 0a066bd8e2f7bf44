use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::counter::count_file_lines;
use crate::error::{CodelError, Result};
use crate::ignore::IgnoreSet;
use crate::stats::ScanResult;

use super::filter::{FileFilter, ScanFilter};
use super::tree::{FileEntry, snapshot};
use super::ScanWarning;

/// Receives progress while files are counted. Called from worker threads.
pub trait ProgressSink: Sync {
    /// Called once with the number of files that will be counted.
    fn start(&self, _total: u64) {}
    /// Called after each file is counted.
    fn inc(&self) {}
    fn finish(&self) {}
}

/// Progress sink that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Line count of one accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCount {
    pub path: PathBuf,
    pub extension: String,
    pub lines: usize,
    /// False when the file could not be read and was counted as zero lines.
    pub readable: bool,
}

/// Everything a scan produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub result: ScanResult,
    /// Counted files, sorted by path.
    pub files: Vec<FileCount>,
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Aggregate per-file counts. The result does not depend on the order of
    /// `files`.
    #[must_use]
    pub fn from_counts(mut files: Vec<FileCount>, mut warnings: Vec<ScanWarning>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut result = ScanResult::new();
        for file in &files {
            result.record(&file.extension, file.lines);
        }

        warnings.sort_by_key(|w| match w {
            ScanWarning::Pattern(p) => (0, p.line, PathBuf::new()),
            ScanWarning::Walk { path, .. } => (1, 0, path.clone().unwrap_or_default()),
            ScanWarning::Read { path, .. } => (2, 0, path.clone()),
        });

        Self {
            result,
            files,
            warnings,
        }
    }
}

/// Counts lines of accepted files below a root directory.
pub struct Scanner {
    filter: ScanFilter,
    threads: usize,
}

impl Scanner {
    pub fn new<I, S>(extensions: I, ignore: IgnoreSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filter: ScanFilter::new(extensions, ignore),
            threads: 0,
        }
    }

    /// Worker threads for line counting. `0` uses one per core.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Scan `root` without progress reporting.
    ///
    /// # Errors
    /// Returns [`CodelError::NotFound`] if `root` is not a directory.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        self.scan_with_progress(root, &NoProgress)
    }

    /// Scan `root`, reporting each counted file to `progress`.
    ///
    /// # Errors
    /// Returns [`CodelError::NotFound`] if `root` is not a directory. Unreadable
    /// files and unlistable directories become warnings instead.
    pub fn scan_with_progress<P: ProgressSink>(
        &self,
        root: &Path,
        progress: &P,
    ) -> Result<ScanReport> {
        if !root.is_dir() {
            return Err(CodelError::NotFound(root.to_path_buf()));
        }

        let (tree, walk_warnings) = snapshot(root, |dir| self.filter.can_prune_dir(dir));

        let candidates: Vec<&FileEntry> = tree
            .files()
            .into_iter()
            .filter(|file| {
                let relative = file.path().strip_prefix(root).unwrap_or(file.path());
                self.filter.should_include(relative)
            })
            .collect();

        tracing::debug!(
            root = %root.display(),
            candidates = candidates.len(),
            directories = tree.directory_count(),
            "snapshot complete"
        );

        progress.start(candidates.len() as u64);
        let counted = self.count_all(&candidates, progress);
        progress.finish();

        let mut warnings: Vec<ScanWarning> = self
            .filter
            .ignore()
            .warnings()
            .iter()
            .cloned()
            .map(ScanWarning::Pattern)
            .collect();
        warnings.extend(walk_warnings);

        let mut files = Vec::with_capacity(counted.len());
        for (count, read_error) in counted {
            if let Some(message) = read_error {
                warnings.push(ScanWarning::Read {
                    path: count.path.clone(),
                    message,
                });
            }
            files.push(count);
        }

        let report = ScanReport::from_counts(files, warnings);
        tracing::info!(
            files = report.result.total_files(),
            lines = report.result.total_lines(),
            "scan finished"
        );
        Ok(report)
    }

    fn count_all<P: ProgressSink>(
        &self,
        candidates: &[&FileEntry],
        progress: &P,
    ) -> Vec<(FileCount, Option<String>)> {
        let work = || {
            candidates
                .par_iter()
                .map(|file| {
                    let counted = count_one(file);
                    progress.inc();
                    counted
                })
                .collect::<Vec<_>>()
        };

        if self.threads == 0 {
            return work();
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => pool.install(work),
            Err(err) => {
                tracing::warn!("falling back to the global thread pool: {err}");
                work()
            }
        }
    }
}

fn count_one(file: &FileEntry) -> (FileCount, Option<String>) {
    let (lines, error) = match count_file_lines(file.path()) {
        Ok(lines) => (lines, None),
        Err(err) => {
            tracing::debug!(path = %file.path().display(), "read failed: {err}");
            (0, Some(err.to_string()))
        }
    };

    let count = FileCount {
        path: file.path().to_path_buf(),
        extension: file.extension().to_string(),
        lines,
        readable: error.is_none(),
    };
    (count, error)
}

/// Scan `root` with the given extensions and ignore pattern lines.
///
/// Patterns are compiled relative to `root`.
///
/// # Errors
/// Returns [`CodelError::NotFound`] if `root` is not a directory.
pub fn scan_directory<E, P>(root: &Path, extensions: E, ignore_lines: P) -> Result<ScanReport>
where
    E: IntoIterator,
    E::Item: Into<String>,
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    let ignore = IgnoreSet::new(root, ignore_lines);
    Scanner::new(extensions, ignore).scan(root)
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
