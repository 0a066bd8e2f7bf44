use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::scanner::ScanReport;

use super::path::display_path;
use super::{ColorMode, ReportFormatter, ansi};

const EXTENSION_HEADER: &str = "Extension";
const NO_EXTENSION: &str = "(none)";

/// Human-readable table of lines per extension.
pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
    project_root: Option<PathBuf>,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose > 0` every counted file is listed before the table.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: mode.for_stdout(),
            verbose,
            project_root: None,
        }
    }

    #[must_use]
    pub fn with_project_root(mut self, root: Option<PathBuf>) -> Self {
        self.project_root = root;
        self
    }

    #[cfg(test)]
    const fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn display_path(&self, path: &Path) -> String {
        display_path(path, self.project_root.as_deref())
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn write_files(&self, output: &mut String, report: &ScanReport) {
        if report.files.is_empty() {
            return;
        }
        writeln!(output, "Files:").ok();
        for file in &report.files {
            let path = self.display_path(&file.path);
            if file.readable {
                writeln!(output, "  {path}: {} lines", file.lines).ok();
            } else {
                let marker = self.paint(ansi::YELLOW, "(unreadable)");
                writeln!(output, "  {path}: 0 lines {marker}").ok();
            }
        }
        writeln!(output).ok();
    }

    fn write_table(&self, output: &mut String, report: &ScanReport) {
        let rows: Vec<(&str, usize, usize)> = report
            .result
            .by_extension()
            .iter()
            .map(|(ext, stats)| {
                let name = if ext.is_empty() { NO_EXTENSION } else { ext };
                (name, stats.files, stats.lines)
            })
            .collect();

        let width = rows
            .iter()
            .map(|(name, ..)| name.chars().count())
            .chain(std::iter::once(EXTENSION_HEADER.len()))
            .max()
            .unwrap_or(EXTENSION_HEADER.len());

        let header = format!("{EXTENSION_HEADER:<width$}  {:>8}  {:>10}", "Files", "Lines");
        let header = if self.use_colors {
            format!("{}{}{header}{}", ansi::BOLD, ansi::CYAN, ansi::RESET)
        } else {
            header
        };
        writeln!(output, "{header}").ok();

        for (name, files, lines) in rows {
            writeln!(output, "{name:<width$}  {files:>8}  {lines:>10}").ok();
        }
        writeln!(output).ok();
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();

        if self.verbose > 0 {
            self.write_files(&mut output, report);
        }

        if report.result.is_empty() {
            writeln!(output, "{}", self.paint(ansi::YELLOW, "No files counted.")).ok();
            return Ok(output);
        }

        self.write_table(&mut output, report);

        let result = &report.result;
        writeln!(output, "Summary:").ok();
        writeln!(output, "  Files: {}", result.total_files()).ok();
        writeln!(
            output,
            "  Total lines: {}",
            self.paint(ansi::GREEN, &result.total_lines().to_string())
        )
        .ok();
        writeln!(
            output,
            "  Mean lines per file: {:.1}",
            result.mean_lines_per_file()
        )
        .ok();

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
