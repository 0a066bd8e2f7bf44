use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Contents of one settings file.
///
/// ```toml
/// [defaults]
/// extensions = [".rs", ".py"]
/// ignore = ["target/", "*.min.js"]
/// case_insensitive = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default inputs for `codel count`. Absent keys fall through to the next tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_insensitive: Option<bool>,
}

impl Settings {
    /// Parse TOML settings.
    ///
    /// # Errors
    /// Returns the TOML error if `content` is not valid settings.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defaults == Defaults::default()
    }

    #[must_use]
    pub const fn has(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Extensions => self.defaults.extensions.is_some(),
            SettingKey::Ignore => self.defaults.ignore.is_some(),
            SettingKey::CaseInsensitive => self.defaults.case_insensitive.is_some(),
        }
    }

    /// Remove `key`. Returns whether it was set.
    pub fn delete(&mut self, key: SettingKey) -> bool {
        match key {
            SettingKey::Extensions => self.defaults.extensions.take().is_some(),
            SettingKey::Ignore => self.defaults.ignore.take().is_some(),
            SettingKey::CaseInsensitive => self.defaults.case_insensitive.take().is_some(),
        }
    }

    /// `(key, rendered value)` pairs for every set key.
    #[must_use]
    pub fn entries(&self) -> Vec<(SettingKey, String)> {
        let mut entries = Vec::new();
        if let Some(ref ext) = self.defaults.extensions {
            entries.push((SettingKey::Extensions, render_list(ext)));
        }
        if let Some(ref ignore) = self.defaults.ignore {
            entries.push((SettingKey::Ignore, render_list(ignore)));
        }
        if let Some(ci) = self.defaults.case_insensitive {
            entries.push((SettingKey::CaseInsensitive, ci.to_string()));
        }
        entries
    }
}

fn render_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("{i:?}")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Keys accepted by `codel config --delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Extensions,
    Ignore,
    CaseInsensitive,
}

impl SettingKey {
    pub const ALL: [Self; 3] = [Self::Extensions, Self::Ignore, Self::CaseInsensitive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extensions => "extensions",
            Self::Ignore => "ignore",
            Self::CaseInsensitive => "case_insensitive",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown setting: {s}"))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
