//! Gitignore-style pattern matching.
//!
//! Pattern lines are compiled once into an [`IgnoreSet`] bound to a root
//! directory. Rules are evaluated in declaration order and the last rule that
//! matches a path decides whether it is ignored; `!` rules re-include.

mod rule;

pub use rule::{CompileWarning, PatternRule};

use std::path::{Component, Path, PathBuf};

/// Outcome of evaluating a path against an [`IgnoreSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<'a> {
    /// No rule matched.
    None,
    /// The deciding rule ignores the path.
    Ignore(&'a PatternRule),
    /// The deciding rule is a negation that re-includes the path.
    Whitelist(&'a PatternRule),
}

impl<'a> Match<'a> {
    #[must_use]
    pub const fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore(_))
    }

    #[must_use]
    pub const fn is_whitelist(&self) -> bool {
        matches!(self, Self::Whitelist(_))
    }

    /// The rule that produced this verdict, if any.
    #[must_use]
    pub const fn rule(&self) -> Option<&'a PatternRule> {
        match self {
            Self::None => None,
            Self::Ignore(rule) | Self::Whitelist(rule) => Some(rule),
        }
    }
}

/// Compiled, immutable set of ignore rules relative to a root directory.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    root: PathBuf,
    rules: Vec<PatternRule>,
    warnings: Vec<CompileWarning>,
}

impl IgnoreSet {
    /// Compile `lines` with default options. Line numbers start at 1.
    pub fn new<I, S>(root: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        IgnoreSetBuilder::new(root).add_lines(lines).build()
    }

    /// A set without rules; nothing is ignored.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Patterns that failed to compile and were matched literally instead.
    #[must_use]
    pub fn warnings(&self) -> &[CompileWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True if any rule is a `!` negation.
    #[must_use]
    pub fn has_negations(&self) -> bool {
        self.rules.iter().any(PatternRule::is_negated)
    }

    /// Whether a file at `path` is ignored.
    ///
    /// `path` may be absolute or relative to the root. Paths outside the root
    /// are never ignored.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.matched(path, false).is_ignore()
    }

    /// Evaluate `path` and report the deciding rule.
    #[must_use]
    pub fn matched(&self, path: &Path, is_dir: bool) -> Match<'_> {
        if self.rules.is_empty() {
            return Match::None;
        }
        let Some(relative) = self.relative_path(path) else {
            return Match::None;
        };
        if relative.is_empty() {
            return Match::None;
        }

        let mut verdict = Match::None;
        for rule in &self.rules {
            if rule.matches_relative(&relative, is_dir) {
                verdict = if rule.is_negated() {
                    Match::Whitelist(rule)
                } else {
                    Match::Ignore(rule)
                };
            }
        }
        verdict
    }

    /// `/`-joined components of `path` below the root.
    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.root).ok()?
        } else {
            path
        };

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_string_lossy()),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(segments.join("/"))
    }
}

/// Builder for [`IgnoreSet`].
#[derive(Debug, Clone)]
pub struct IgnoreSetBuilder {
    root: PathBuf,
    case_insensitive: bool,
    lines: Vec<String>,
}

impl IgnoreSetBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            case_insensitive: false,
            lines: Vec::new(),
        }
    }

    /// Match without regard to ASCII/Unicode case. Off by default.
    #[must_use]
    pub const fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    #[must_use]
    pub fn add_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn add_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lines
            .extend(lines.into_iter().map(|l| l.as_ref().to_string()));
        self
    }

    #[must_use]
    pub fn build(self) -> IgnoreSet {
        let mut rules = Vec::new();
        let mut warnings = Vec::new();

        for (idx, line) in self.lines.iter().enumerate() {
            let Some((rule, warning)) = PatternRule::compile(idx + 1, line, self.case_insensitive)
            else {
                continue;
            };
            tracing::debug!(
                line = rule.line(),
                pattern = rule.original(),
                glob = rule.glob(),
                negated = rule.is_negated(),
                directory_only = rule.is_directory_only(),
                "compiled ignore rule"
            );
            if let Some(warning) = warning {
                tracing::debug!(line = warning.line, "pattern matched literally: {}", warning.message);
                warnings.push(warning);
            }
            rules.push(rule);
        }

        IgnoreSet {
            root: self.root,
            rules,
            warnings,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
