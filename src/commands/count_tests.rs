use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::cli::Commands;
use crate::commands::test_fs::TempConfigFs;

fn parse(args: &[&str]) -> (Cli, CountArgs) {
    let cli = Cli::try_parse_from(args).unwrap();
    let Commands::Count(ref count) = cli.command else {
        panic!("expected count");
    };
    let count = count.clone();
    (cli, count)
}

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.py"), "x = 1\ny = 2\nz = 3").unwrap();
    fs::write(root.join("b.py"), "").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.py"), "1\n2\n3\n4\n5\n").unwrap();
    fs::write(root.join("notes.md"), "# notes\n").unwrap();
    temp
}

fn run(root: &Path, config_dir: &Path, extra: &[&str]) -> Result<CountOutcome> {
    let folder = root.to_string_lossy().into_owned();
    let mut argv = vec!["codel", "-q", "--color", "never", "count", "-f", folder.as_str()];
    argv.extend_from_slice(extra);
    let (cli, args) = parse(&argv);
    run_count_impl(&args, &cli, TempConfigFs::new(config_dir))
}

#[test]
fn counts_with_command_line_lists() {
    let temp = fixture();
    let config = TempDir::new().unwrap();

    let outcome = run(temp.path(), config.path(), &["-e", "py", "-i", "sub/"]).unwrap();
    let py = outcome.report.result.extension(".py").unwrap();
    assert_eq!(py.files, 2);
    assert_eq!(py.lines, 3);
    assert!((outcome.report.result.mean_lines_per_file() - 1.5).abs() < f64::EPSILON);
    assert!(outcome.rendered.contains("Total lines: 3"));
}

#[test]
fn missing_extensions_is_config_error() {
    let temp = fixture();
    let config = TempDir::new().unwrap();

    let err = run(temp.path(), config.path(), &[]).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn missing_folder_is_not_found() {
    let config = TempDir::new().unwrap();
    let (cli, args) = parse(&["codel", "count", "-f", "/no/such/folder", "-e", ".py"]);

    let err = run_count_impl(&args, &cli, TempConfigFs::new(config.path())).unwrap_err();
    assert!(matches!(err, CodelError::NotFound(_)));
}

#[test]
fn falls_back_to_folder_settings() {
    let temp = fixture();
    let config = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".codel")).unwrap();
    fs::write(
        temp.path().join(".codel/config.toml"),
        "[defaults]\nextensions = [\".py\", \".md\"]\nignore = [\"sub/\"]\n",
    )
    .unwrap();

    let outcome = run(temp.path(), config.path(), &[]).unwrap();
    assert_eq!(outcome.report.result.total_files(), 3);
    assert!(outcome.report.result.extension(".md").is_some());
}

#[test]
fn falls_back_to_user_settings() {
    let temp = fixture();
    let config = TempDir::new().unwrap();
    fs::write(
        config.path().join("config.toml"),
        "[defaults]\nextensions = [\"md\"]\n",
    )
    .unwrap();

    let outcome = run(temp.path(), config.path(), &[]).unwrap();
    assert_eq!(outcome.report.result.total_files(), 1);
    assert_eq!(outcome.report.result.extension(".md").unwrap().lines, 1);
}

#[test]
fn command_line_overrides_settings() {
    let temp = fixture();
    let config = TempDir::new().unwrap();
    fs::write(
        config.path().join("config.toml"),
        "[defaults]\nextensions = [\".md\"]\nignore = [\"*.py\"]\n",
    )
    .unwrap();

    let outcome = run(temp.path(), config.path(), &["-e", ".py", "-i", "sub/"]).unwrap();
    assert_eq!(outcome.report.result.total_files(), 2);
}

#[test]
fn json_output_ends_with_newline() {
    let temp = fixture();
    let config = TempDir::new().unwrap();

    let outcome = run(temp.path(), config.path(), &["-e", ".py", "--format", "json"]).unwrap();
    assert!(outcome.rendered.ends_with("}\n"));
    let value: serde_json::Value = serde_json::from_str(&outcome.rendered).unwrap();
    assert_eq!(value["summary"]["total_lines"], 8);
}

#[test]
fn case_insensitive_flag() {
    let temp = fixture();
    let config = TempDir::new().unwrap();
    fs::write(temp.path().join("Gen.py"), "1\n").unwrap();

    let sensitive = run(temp.path(), config.path(), &["-e", ".py", "-i", "gen.py"]).unwrap();
    let insensitive = run(
        temp.path(),
        config.path(),
        &["-e", ".py", "-i", "gen.py", "--case-insensitive"],
    )
    .unwrap();
    assert_eq!(
        sensitive.report.result.total_files(),
        insensitive.report.result.total_files() + 1
    );
}
