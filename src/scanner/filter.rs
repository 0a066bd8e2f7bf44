use std::path::Path;

use indexmap::IndexSet;

use crate::ignore::IgnoreSet;

use super::tree::extension_of;

pub trait FileFilter {
    /// Whether the file at `path` (relative to the scan root) is counted.
    fn should_include(&self, path: &Path) -> bool;
}

/// Accepts files whose extension is allowed and which the ignore rules keep.
pub struct ScanFilter {
    extensions: IndexSet<String>,
    ignore: IgnoreSet,
}

impl ScanFilter {
    /// Extensions are compared exactly, including the leading dot.
    pub fn new<I, S>(extensions: I, ignore: IgnoreSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            ignore,
        }
    }

    #[must_use]
    pub const fn extensions(&self) -> &IndexSet<String> {
        &self.extensions
    }

    #[must_use]
    pub const fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        self.extensions.contains(extension_of(path).as_str())
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignore.matched(path, false).is_ignore()
    }

    /// Whether a directory can be skipped without losing counted files.
    ///
    /// Only safe when no `!` rule could re-include something below it.
    pub(crate) fn can_prune_dir(&self, path: &Path) -> bool {
        !self.ignore.has_negations() && self.ignore.matched(path, true).is_ignore()
    }
}

impl FileFilter for ScanFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_valid_extension(path) && !self.is_ignored(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
