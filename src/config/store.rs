//! Two-tier settings storage.
//!
//! User settings live in the platform config directory; folder settings live
//! in `<folder>/.codel/config.toml` and override the user tier key by key.

use std::path::{Path, PathBuf};

use crate::error::{CodelError, Result};

use super::filesystem::{FileSystem, RealFileSystem};
use super::model::Settings;

/// Directory holding folder-level settings.
pub const FOLDER_CONFIG_DIR: &str = ".codel";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where a settings file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    User,
    Folder,
}

impl Tier {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Folder => "folder",
        }
    }
}

/// Inputs for `codel count` after merging both tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub extensions: Option<Vec<String>>,
    pub ignore: Vec<String>,
    pub case_insensitive: bool,
}

/// Loads and saves settings for one folder.
pub struct SettingsStore<F: FileSystem = RealFileSystem> {
    fs: F,
    folder: PathBuf,
}

impl SettingsStore<RealFileSystem> {
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self::with_fs(RealFileSystem, folder)
    }
}

impl<F: FileSystem> SettingsStore<F> {
    pub fn with_fs(fs: F, folder: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            folder: folder.into(),
        }
    }

    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Settings file for `tier`. `None` if the platform has no config
    /// directory.
    #[must_use]
    pub fn path(&self, tier: Tier) -> Option<PathBuf> {
        match tier {
            Tier::User => self.fs.config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)),
            Tier::Folder => Some(self.folder.join(FOLDER_CONFIG_DIR).join(CONFIG_FILE_NAME)),
        }
    }

    /// Load `tier`. A missing file yields empty settings.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, tier: Tier) -> Result<Settings> {
        let Some(path) = self.path(tier) else {
            return Ok(Settings::default());
        };
        if !self.fs.exists(&path) {
            tracing::debug!(tier = tier.label(), path = %path.display(), "no settings file");
            return Ok(Settings::default());
        }

        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|source| CodelError::FileAccess {
                path: path.clone(),
                source,
            })?;
        let settings = Settings::parse(&content).map_err(|source| CodelError::SettingsParse {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(tier = tier.label(), path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write `settings` to `tier`, creating its directory if needed.
    ///
    /// # Errors
    /// Returns an error if the platform has no config directory or the file
    /// cannot be written.
    pub fn save(&self, tier: Tier, settings: &Settings) -> Result<PathBuf> {
        let path = self.path(tier).ok_or_else(|| {
            CodelError::Config("Could not determine the user configuration directory".to_string())
        })?;
        let content = settings.to_toml()?;

        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|source| CodelError::FileAccess {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        self.fs
            .write(&path, &content)
            .map_err(|source| CodelError::FileAccess {
                path: path.clone(),
                source,
            })?;
        tracing::info!(tier = tier.label(), path = %path.display(), "saved settings");
        Ok(path)
    }

    /// Merge both tiers; folder values win per key.
    ///
    /// # Errors
    /// Returns an error if either settings file is unreadable or malformed.
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let user = self.load(Tier::User)?.defaults;
        let folder = self.load(Tier::Folder)?.defaults;

        Ok(ResolvedSettings {
            extensions: folder.extensions.or(user.extensions),
            ignore: folder.ignore.or(user.ignore).unwrap_or_default(),
            case_insensitive: folder
                .case_insensitive
                .or(user.case_insensitive)
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
#[path = "store_tests/mod.rs"]
mod tests;
