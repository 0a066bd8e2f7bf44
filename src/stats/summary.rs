use std::collections::BTreeMap;

use serde::Serialize;

/// Per-extension totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionStats {
    pub files: usize,
    pub lines: usize,
}

impl ExtensionStats {
    /// Mean lines per file within this extension, 0.0 when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_lines(&self) -> f64 {
        if self.files == 0 {
            0.0
        } else {
            self.lines as f64 / self.files as f64
        }
    }
}

/// Line counts grouped by extension, plus global totals.
///
/// Extensions iterate in ascending lexical order. The mean is kept as a
/// running value updated on every [`record`](Self::record).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    by_extension: BTreeMap<String, ExtensionStats>,
    total_files: usize,
    total_lines: usize,
    mean_lines_per_file: f64,
}

impl ScanResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one counted file.
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&mut self, extension: &str, lines: usize) {
        let entry = self.by_extension.entry(extension.to_string()).or_default();
        entry.files += 1;
        entry.lines += lines;

        self.total_files += 1;
        self.total_lines += lines;
        self.mean_lines_per_file +=
            (lines as f64 - self.mean_lines_per_file) / self.total_files as f64;
    }

    #[must_use]
    pub const fn by_extension(&self) -> &BTreeMap<String, ExtensionStats> {
        &self.by_extension
    }

    #[must_use]
    pub fn extension(&self, extension: &str) -> Option<&ExtensionStats> {
        self.by_extension.get(extension)
    }

    #[must_use]
    pub const fn total_files(&self) -> usize {
        self.total_files
    }

    #[must_use]
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    #[must_use]
    pub const fn mean_lines_per_file(&self) -> f64 {
        self.mean_lines_per_file
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
