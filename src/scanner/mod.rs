//! Directory scanning: snapshot, filtering, line counting and aggregation.

mod filter;
mod tree;
mod walker;

pub use filter::{FileFilter, ScanFilter};
pub use tree::{DirectoryEntry, Entry, FileEntry, extension_of, snapshot};
pub use walker::{FileCount, NoProgress, ProgressSink, ScanReport, Scanner, scan_directory};

use std::fmt;
use std::path::PathBuf;

use crate::ignore::CompileWarning;

/// A non-fatal problem met during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// An ignore pattern was not a valid glob and is matched literally.
    Pattern(CompileWarning),
    /// A file could not be read; it is counted with zero lines.
    Read { path: PathBuf, message: String },
    /// A directory could not be listed.
    Walk {
        path: Option<PathBuf>,
        message: String,
    },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(w) => write!(
                f,
                "ignore pattern on line {} ({}) is matched literally: {}",
                w.line, w.pattern, w.message
            ),
            Self::Read { path, message } => {
                write!(f, "could not read {}: {message}", path.display())
            }
            Self::Walk {
                path: Some(path),
                message,
            } => write!(f, "could not list {}: {message}", path.display()),
            Self::Walk {
                path: None,
                message,
            } => write!(f, "could not list directory: {message}"),
        }
    }
}
