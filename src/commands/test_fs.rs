use std::path::{Path, PathBuf};

use crate::config::{FileSystem, RealFileSystem};

/// Real filesystem with the user config directory moved into a temp dir.
pub struct TempConfigFs {
    config_dir: PathBuf,
}

impl TempConfigFs {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }
}

impl FileSystem for TempConfigFs {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        RealFileSystem.read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        RealFileSystem.write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        RealFileSystem.create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        RealFileSystem.exists(path)
    }

    fn config_dir(&self) -> Option<PathBuf> {
        Some(self.config_dir.clone())
    }
}
