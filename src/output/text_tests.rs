use std::path::PathBuf;

use super::*;
use crate::scanner::{FileCount, ScanWarning};

fn count(path: &str, extension: &str, lines: usize) -> FileCount {
    FileCount {
        path: PathBuf::from("/p").join(path),
        extension: extension.to_string(),
        lines,
        readable: true,
    }
}

fn sample() -> ScanReport {
    ScanReport::from_counts(
        vec![
            count("a.py", ".py", 3),
            count("b.py", ".py", 0),
            count("lib.rs", ".rs", 10),
        ],
        Vec::new(),
    )
}

fn plain(verbose: u8) -> TextFormatter {
    TextFormatter::with_verbose(ColorMode::Never, verbose)
        .with_colors(false)
        .with_project_root(Some(PathBuf::from("/p")))
}

#[test]
fn table_lists_extensions_in_order() {
    let output = plain(0).format(&sample()).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines[0].starts_with("Extension"));
    assert!(lines[0].contains("Files"));
    assert!(lines[0].contains("Lines"));
    assert!(lines[1].starts_with(".py"));
    assert!(lines[1].ends_with(" 3"));
    assert!(lines[2].starts_with(".rs"));
    assert!(lines[2].ends_with(" 10"));
}

#[test]
fn summary_shows_totals_and_mean() {
    let output = plain(0).format(&sample()).unwrap();
    assert!(output.contains("Summary:\n"));
    assert!(output.contains("  Files: 3\n"));
    assert!(output.contains("  Total lines: 13\n"));
    assert!(output.contains("  Mean lines per file: 4.3\n"));
}

#[test]
fn files_listed_only_when_verbose() {
    let quiet = plain(0).format(&sample()).unwrap();
    assert!(!quiet.contains("a.py"));

    let verbose = plain(1).format(&sample()).unwrap();
    assert!(verbose.contains("Files:\n  a.py: 3 lines\n  b.py: 0 lines\n  lib.rs: 10 lines\n"));
}

#[test]
fn unreadable_file_is_marked() {
    let mut file = count("bad.py", ".py", 0);
    file.readable = false;
    let report = ScanReport::from_counts(
        vec![file.clone()],
        vec![ScanWarning::Read {
            path: file.path,
            message: "stream did not contain valid UTF-8".into(),
        }],
    );
    let output = plain(1).format(&report).unwrap();
    assert!(output.contains("bad.py: 0 lines (unreadable)"));
}

#[test]
fn files_without_extension_get_placeholder() {
    let report = ScanReport::from_counts(vec![count("Makefile", "", 4)], Vec::new());
    let output = plain(0).format(&report).unwrap();
    assert!(output.contains("(none)"));
}

#[test]
fn empty_report() {
    let output = plain(0).format(&ScanReport::default()).unwrap();
    assert_eq!(output, "No files counted.\n");
}

#[test]
fn colors_wrap_header() {
    let formatter = plain(0).with_colors(true);
    let output = formatter.format(&sample()).unwrap();
    assert!(output.contains(ansi::CYAN));
    assert!(output.contains(ansi::RESET));
}
