use std::path::{Path, PathBuf};

use super::*;

fn root() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\project")
    } else {
        PathBuf::from("/project")
    }
}

fn abs(relative: &str) -> PathBuf {
    relative.split('/').fold(root(), |acc, seg| acc.join(seg))
}

fn set(patterns: &[&str]) -> IgnoreSet {
    IgnoreSet::new(root(), patterns.iter().copied())
}

#[test]
fn empty_set_ignores_nothing() {
    let ignore = IgnoreSet::empty(root());
    assert!(ignore.is_empty());
    assert!(!ignore.matches(&abs("a.py")));
    assert_eq!(ignore.matched(&abs("a.py"), false), Match::None);
}

#[test]
fn comments_and_blank_lines_produce_no_rules() {
    let ignore = set(&["# header", "", "   ", "*.tmp"]);
    assert_eq!(ignore.len(), 1);
    assert_eq!(ignore.rules()[0].line(), 4);
}

#[test]
fn negation_law() {
    let ignore = set(&["*.log", "!keep.log"]);
    assert!(!ignore.matches(&abs("keep.log")));
    assert!(ignore.matches(&abs("other.log")));
    assert!(ignore.matched(&abs("keep.log"), false).is_whitelist());
}

#[test]
fn last_match_wins_not_first_match() {
    // First-match-wins would keep a.txt because of the leading negation.
    let ignore = set(&["!a.txt", "*.txt"]);
    assert!(ignore.matches(&abs("a.txt")));
}

#[test]
fn any_match_is_not_enough() {
    // Any-match-wins would ignore keep.log because "*.log" matches it.
    let ignore = set(&["*.log", "!keep.log"]);
    assert!(!ignore.matches(&abs("nested/keep.log")));
}

#[test]
fn later_rule_overrides_earlier_negation() {
    let ignore = set(&["*.log", "!important.log", "important.log"]);
    assert!(ignore.matches(&abs("important.log")));
}

#[test]
fn anchoring_law() {
    let anchored = set(&["/build"]);
    assert!(anchored.matches(&abs("build/out.o")));
    assert!(!anchored.matches(&abs("src/build/out.o")));

    let floating = set(&["build"]);
    assert!(floating.matches(&abs("build/out.o")));
    assert!(floating.matches(&abs("src/build/out.o")));
}

#[test]
fn internal_slash_anchors_pattern() {
    let ignore = set(&["docs/*.md"]);
    assert!(ignore.matches(&abs("docs/readme.md")));
    assert!(!ignore.matches(&abs("sub/docs/readme.md")));
}

#[test]
fn directory_rule_inheritance() {
    let ignore = set(&["node_modules/"]);
    assert!(ignore.matches(&abs("node_modules/lib/index.js")));
    assert!(ignore.matches(&abs("web/node_modules/a/b/c/d.js")));
    assert!(!ignore.matches(&abs("src/node_modules.js")));
}

#[test]
fn directory_only_rule_skips_file_with_same_name() {
    let ignore = set(&["out/"]);
    assert!(!ignore.matches(&abs("out")));
    assert!(ignore.matched(&abs("out"), true).is_ignore());
}

#[test]
fn negation_reincludes_file_under_ignored_directory() {
    let ignore = set(&["vendor/", "!vendor/keep.py"]);
    assert!(ignore.matches(&abs("vendor/drop.py")));
    assert!(!ignore.matches(&abs("vendor/keep.py")));
}

#[test]
fn double_star_patterns() {
    let ignore = set(&["**/generated/**", "a/**/z.txt"]);
    assert!(ignore.matches(&abs("generated/x.rs")));
    assert!(ignore.matches(&abs("deep/er/generated/y/x.rs")));
    assert!(ignore.matches(&abs("a/z.txt")));
    assert!(ignore.matches(&abs("a/b/c/z.txt")));
    assert!(!ignore.matches(&abs("b/a/z.txt")));
}

#[test]
fn paths_outside_root_are_not_ignored() {
    let ignore = set(&["*"]);
    let outside = if cfg!(windows) {
        PathBuf::from(r"D:\elsewhere\a.py")
    } else {
        PathBuf::from("/elsewhere/a.py")
    };
    assert!(!ignore.matches(&outside));
}

#[test]
fn relative_paths_resolve_against_root() {
    let ignore = set(&["/build"]);
    assert!(ignore.matches(Path::new("build/a.o")));
    assert!(ignore.matches(Path::new("./build/a.o")));
    assert!(!ignore.matches(Path::new("../build/a.o")));
}

#[test]
fn root_itself_is_never_ignored() {
    let ignore = set(&["*"]);
    assert!(!ignore.matched(&root(), true).is_ignore());
}

#[test]
fn matching_is_deterministic() {
    let ignore = set(&["*.log", "!keep.log", "tmp/", "/dist"]);
    let paths = ["keep.log", "x.log", "tmp/a/b.py", "dist/a.js", "src/dist/a.js"];
    let first: Vec<bool> = paths.iter().map(|p| ignore.matches(&abs(p))).collect();
    for _ in 0..5 {
        let again: Vec<bool> = paths.iter().map(|p| ignore.matches(&abs(p))).collect();
        assert_eq!(first, again);
    }
    assert_eq!(first, vec![false, true, true, true, false]);
}

#[test]
fn matched_reports_deciding_rule() {
    let ignore = set(&["*.py", "!main.py", "main.py"]);
    let verdict = ignore.matched(&abs("main.py"), false);
    assert_eq!(verdict.rule().map(PatternRule::line), Some(3));
}

#[test]
fn malformed_pattern_collects_warning_and_keeps_going() {
    let ignore = set(&["*.tmp", "[oops", "*.bak"]);
    assert_eq!(ignore.len(), 3);
    assert_eq!(ignore.warnings().len(), 1);
    assert_eq!(ignore.warnings()[0].line, 2);
    assert!(ignore.matches(&abs("x.bak")));
    assert!(ignore.matches(&abs("[oops")));
}

#[test]
fn has_negations_detects_bang_rules() {
    assert!(!set(&["*.log"]).has_negations());
    assert!(set(&["*.log", "!a.log"]).has_negations());
    assert!(!set(&["\\!literal"]).has_negations());
}

#[test]
fn builder_case_insensitive() {
    let ignore = IgnoreSetBuilder::new(root())
        .case_insensitive(true)
        .add_line("README.md")
        .build();
    assert!(ignore.matches(&abs("readme.md")));
    assert!(!set(&["README.md"]).matches(&abs("readme.md")));
}

#[test]
fn verdicts_compare_by_rule() {
    let ignore = set(&["*.log", "!keep.log"]);
    let first = ignore.matched(&abs("a.log"), false);
    assert_eq!(first, Match::Ignore(&ignore.rules()[0]));
    assert_eq!(first, ignore.matched(&abs("b/c.log"), false));
    assert_eq!(
        ignore.matched(&abs("keep.log"), false),
        Match::Whitelist(&ignore.rules()[1])
    );
    assert_ne!(first, Match::Whitelist(&ignore.rules()[1]));
}
