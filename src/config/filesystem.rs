//! Filesystem abstraction for testability.
//!
//! Provides a trait for filesystem operations that can be mocked in tests.

use std::path::{Path, PathBuf};

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Create `path` and all missing parents.
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the platform-specific configuration directory for codel.
    ///
    /// - Windows: `%APPDATA%\codel`
    /// - macOS: `~/Library/Application Support/codel`
    /// - Linux: `~/.config/codel` (XDG)
    fn config_dir(&self) -> Option<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "codel").map(|dirs| dirs.config_dir().to_path_buf())
    }
}
