use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Folder not found or not a directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file: {path}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl CodelError {
    /// Short category name used as the heading of error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::SettingsParse { .. } | Self::SettingsSerialize(_) => "Config",
            Self::NotFound(_) => "NotFound",
            Self::FileAccess { .. } => "FileAccess",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "JSON",
        }
    }

    /// Underlying cause, if the error wraps one.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::FileAccess { source, .. } => Some(source.to_string()),
            Self::SettingsParse { source, .. } => Some(source.message().to_string()),
            _ => None,
        }
    }

    /// Actionable hint for the user.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some(
                "pass extensions with `codel count -e .rs` or store defaults with `codel config -e .rs`",
            ),
            Self::NotFound(_) => Some("check the path given to `--folder`"),
            Self::SettingsParse { .. } => {
                Some("fix the TOML syntax or remove the file and run `codel config` again")
            }
            _ => None,
        }
    }

    /// Whether the error comes from unresolvable or invalid settings.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::SettingsParse { .. } | Self::SettingsSerialize(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CodelError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
