use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::scanner::ScanReport;
use crate::stats::ExtensionStats;

use super::ReportFormatter;
use super::path::display_path;

/// Pretty-printed JSON document of a scan report.
///
/// Keys come out in a fixed order, so scanning an unchanged tree twice
/// produces byte-identical output.
pub struct JsonFormatter {
    project_root: Option<PathBuf>,
}

impl JsonFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self { project_root: None }
    }

    #[must_use]
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }

    fn display_path(&self, path: &Path) -> String {
        display_path(path, self.project_root.as_deref())
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: JsonSummary,
    by_extension: &'a BTreeMap<String, ExtensionStats>,
    files: Vec<JsonFile<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    total_files: usize,
    total_lines: usize,
    mean_lines_per_file: f64,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    extension: &'a str,
    lines: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    unreadable: bool,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let result = &report.result;
        let output = JsonOutput {
            summary: JsonSummary {
                total_files: result.total_files(),
                total_lines: result.total_lines(),
                mean_lines_per_file: result.mean_lines_per_file(),
            },
            by_extension: result.by_extension(),
            files: report
                .files
                .iter()
                .map(|f| JsonFile {
                    path: self.display_path(&f.path),
                    extension: &f.extension,
                    lines: f.lines,
                    unreadable: !f.readable,
                })
                .collect(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
