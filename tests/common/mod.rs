#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the codel binary.
#[macro_export]
macro_rules! codel {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("codel"))
    };
}

/// A project folder plus an isolated home for user-tier settings.
pub struct TestFixture {
    pub dir: TempDir,
    pub home: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            home: TempDir::new().expect("Failed to create temp home"),
        }
    }

    /// Creates a file with the given content, including parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.dir.path().join(relative_path))
            .expect("Failed to create directory");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    /// Writes folder-tier settings.
    pub fn create_settings(&self, content: &str) {
        self.create_file(".codel/config.toml", content);
    }

    /// Root of the sample tree used across tests:
    /// `a.py` (3 lines, no trailing newline), `b.py` (empty), `sub/c.py` (5 lines).
    pub fn with_sample_tree(self) -> Self {
        self.create_file("a.py", "a = 1\nb = 2\nc = 3");
        self.create_file("b.py", "");
        self.create_file("sub/c.py", "1\n2\n3\n4\n5\n");
        self
    }

    /// A `codel` command with its working directory in the fixture and the
    /// user config directory redirected into the temp home.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = codel!();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
