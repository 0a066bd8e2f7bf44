//! Immutable snapshot of a directory tree.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanWarning;

/// A regular file seen while listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    extension: String,
    exists: bool,
}

impl FileEntry {
    /// Build an entry for `path`, checking whether it currently exists.
    #[cfg(test)]
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let exists = path.is_file();
        Self::with_existence(path, exists)
    }

    /// Entry for a file the directory listing just reported.
    pub(crate) fn listed(path: PathBuf) -> Self {
        Self::with_existence(path, true)
    }

    fn with_existence(path: PathBuf, exists: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&path);
        Self {
            path,
            name,
            extension,
            exists,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last `.`-delimited suffix including the dot, or `""`.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub const fn exists(&self) -> bool {
        self.exists
    }
}

/// Extension of `path` with its leading dot, as written. Hidden files such as
/// `.bashrc` have none.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// A directory and everything listed below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: PathBuf,
    name: String,
    children: Vec<Entry>,
}

impl DirectoryEntry {
    fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| ".".to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            path,
            name,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    /// All files below this directory in listing order (depth-first, names
    /// ascending).
    #[must_use]
    pub fn files(&self) -> Vec<&FileEntry> {
        let mut files = Vec::new();
        let mut stack: Vec<std::slice::Iter<'_, Entry>> = vec![self.children.iter()];

        while let Some(iter) = stack.last_mut() {
            match iter.next() {
                Some(Entry::File(file)) => files.push(file),
                Some(Entry::Directory(dir)) => stack.push(dir.children.iter()),
                None => {
                    stack.pop();
                }
            }
        }
        files
    }

    /// Number of directories below this one, not counting itself.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(dir) = stack.pop() {
            for child in &dir.children {
                if let Entry::Directory(sub) = child {
                    count += 1;
                    stack.push(sub);
                }
            }
        }
        count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(FileEntry),
    Directory(DirectoryEntry),
}

#[cfg(test)]
impl Entry {
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Directory(d) => d.name(),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        match self {
            Self::File(f) => f.path(),
            Self::Directory(d) => d.path(),
        }
    }

    pub(crate) const fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// List `root` into a [`DirectoryEntry`] tree.
///
/// Symbolic links and special files are skipped, never followed. `prune` is
/// called with each directory's path relative to `root`; returning `true`
/// keeps the directory out of the snapshot entirely. Listing failures below
/// the root are reported as warnings.
pub fn snapshot<P>(root: &Path, prune: P) -> (DirectoryEntry, Vec<ScanWarning>)
where
    P: Fn(&Path) -> bool,
{
    let mut warnings = Vec::new();
    let mut stack = vec![DirectoryEntry::new(root.to_path_buf())];

    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let pruned = prune(relative);
            if pruned {
                tracing::debug!(path = %entry.path().display(), "pruned ignored directory");
            }
            !pruned
        });

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("listing failed: {err}");
                warnings.push(ScanWarning::Walk {
                    path: err.path().map(Path::to_path_buf),
                    message: err.to_string(),
                });
                continue;
            }
        };

        while stack.len() > entry.depth() {
            close_directory(&mut stack);
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            stack.push(DirectoryEntry::new(entry.into_path()));
        } else if file_type.is_file() {
            if let Some(parent) = stack.last_mut() {
                parent
                    .children
                    .push(Entry::File(FileEntry::listed(entry.into_path())));
            }
        } else {
            tracing::trace!(path = %entry.path().display(), "skipping link or special file");
        }
    }

    while stack.len() > 1 {
        close_directory(&mut stack);
    }

    let root_entry = stack
        .pop()
        .unwrap_or_else(|| DirectoryEntry::new(root.to_path_buf()));
    (root_entry, warnings)
}

/// Pop the innermost open directory and attach it to its parent.
fn close_directory(stack: &mut Vec<DirectoryEntry>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(done) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.children.push(Entry::Directory(done));
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
