use crate::cli::{Cli, CountArgs};
use crate::config::{FileSystem, RealFileSystem, SettingsStore};
use crate::ignore::IgnoreSetBuilder;
use crate::output::{
    ColorMode, ErrorOutput, JsonFormatter, OutputFormat, ReportFormatter, ScanProgress,
    TextFormatter,
};
use crate::scanner::{ScanReport, Scanner};
use crate::{CodelError, EXIT_SUCCESS, Result};

use super::context::{normalize_extensions, report_error, resolve_folder, write_output};

/// A finished count: the report and its rendering.
#[derive(Debug)]
pub struct CountOutcome {
    pub report: ScanReport,
    pub rendered: String,
}

#[must_use]
pub fn run_count(args: &CountArgs, cli: &Cli) -> i32 {
    let color = ColorMode::from(cli.color);
    let result = run_count_impl(args, cli, RealFileSystem).and_then(|outcome| {
        write_output(args.output.as_deref(), &outcome.rendered)?;
        Ok(outcome)
    });

    match result {
        Ok(outcome) => {
            if !cli.quiet {
                let out = ErrorOutput::new(color);
                for warning in &outcome.report.warnings {
                    out.print_warning(&warning.to_string());
                }
            }
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, color),
    }
}

/// Resolve inputs, scan and render.
///
/// Command-line lists replace stored defaults; missing ones fall back to the
/// folder settings, then the user settings.
///
/// # Errors
/// Returns [`CodelError::NotFound`] for a missing folder and
/// [`CodelError::Config`] when no extension list can be resolved.
pub fn run_count_impl<F: FileSystem>(args: &CountArgs, cli: &Cli, fs: F) -> Result<CountOutcome> {
    let root = resolve_folder(&args.folder)?;
    let settings = SettingsStore::with_fs(fs, &root).resolve()?;

    let extensions = args
        .extensions
        .clone()
        .or(settings.extensions)
        .ok_or_else(|| {
            CodelError::Config(
                "No extensions given and none stored in the folder or user settings".to_string(),
            )
        })?;
    let extensions = normalize_extensions(extensions);
    let ignore_lines = args.ignore.clone().unwrap_or(settings.ignore);
    let case_insensitive = args.case_insensitive || settings.case_insensitive;

    tracing::info!(
        root = %root.display(),
        extensions = ?extensions,
        patterns = ignore_lines.len(),
        case_insensitive,
        "starting count"
    );

    let ignore = IgnoreSetBuilder::new(&root)
        .case_insensitive(case_insensitive)
        .add_lines(&ignore_lines)
        .build();
    let scanner = Scanner::new(extensions, ignore).with_threads(args.threads);

    let progress = ScanProgress::new(cli.quiet);
    let report = scanner.scan_with_progress(&root, &progress)?;

    let color = ColorMode::from(cli.color);
    let project_root = Some(root);
    let rendered = match args.format {
        OutputFormat::Text => TextFormatter::with_verbose(color, cli.verbose)
            .with_project_root(project_root)
            .format(&report)?,
        OutputFormat::Json => {
            let mut json = JsonFormatter::new()
                .with_project_root(project_root)
                .format(&report)?;
            json.push('\n');
            json
        }
    };

    Ok(CountOutcome { report, rendered })
}

#[cfg(test)]
#[path = "count_tests.rs"]
mod tests;
