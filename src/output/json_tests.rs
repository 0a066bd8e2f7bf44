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

fn formatter() -> JsonFormatter {
    JsonFormatter::new().with_project_root(Some(PathBuf::from("/p")))
}

#[test]
fn json_structure() {
    let report = ScanReport::from_counts(
        vec![count("a.py", ".py", 3), count("b.py", ".py", 0)],
        Vec::new(),
    );
    let output = formatter().format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["summary"]["total_files"], 2);
    assert_eq!(value["summary"]["total_lines"], 3);
    assert_eq!(value["summary"]["mean_lines_per_file"], 1.5);
    assert_eq!(value["by_extension"][".py"]["files"], 2);
    assert_eq!(value["by_extension"][".py"]["lines"], 3);
    assert_eq!(value["files"][0]["path"], "a.py");
    assert!(value.get("warnings").is_none());
    assert!(value["files"][0].get("unreadable").is_none());
}

#[test]
fn warnings_and_unreadable_files_are_reported() {
    let mut bad = count("bad.py", ".py", 0);
    bad.readable = false;
    let report = ScanReport::from_counts(
        vec![bad.clone()],
        vec![ScanWarning::Read {
            path: bad.path,
            message: "invalid data".into(),
        }],
    );
    let value: serde_json::Value =
        serde_json::from_str(&formatter().format(&report).unwrap()).unwrap();

    assert_eq!(value["files"][0]["unreadable"], true);
    assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn output_is_stable_regardless_of_input_order() {
    let files = vec![
        count("z.rs", ".rs", 1),
        count("a.py", ".py", 2),
        count("m.go", ".go", 3),
    ];
    let mut reversed = files.clone();
    reversed.reverse();

    let first = formatter()
        .format(&ScanReport::from_counts(files, Vec::new()))
        .unwrap();
    let second = formatter()
        .format(&ScanReport::from_counts(reversed, Vec::new()))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_report() {
    let value: serde_json::Value =
        serde_json::from_str(&formatter().format(&ScanReport::default()).unwrap()).unwrap();
    assert_eq!(value["summary"]["total_files"], 0);
    assert_eq!(value["summary"]["mean_lines_per_file"], 0.0);
    assert!(value["files"].as_array().unwrap().is_empty());
}
