mod mock_fs;

use std::path::PathBuf;

use mock_fs::MockFileSystem;

use super::*;
use crate::config::SettingKey;

const USER_FILE: &str = "/home/user/.config/codel/config.toml";
const FOLDER_FILE: &str = "/project/.codel/config.toml";

fn store(fs: MockFileSystem) -> SettingsStore<MockFileSystem> {
    SettingsStore::with_fs(fs, "/project")
}

#[test]
fn paths_per_tier() {
    let s = store(MockFileSystem::new());
    assert_eq!(s.path(Tier::User), Some(PathBuf::from(USER_FILE)));
    assert_eq!(s.path(Tier::Folder), Some(PathBuf::from(FOLDER_FILE)));
}

#[test]
fn missing_files_load_as_empty() {
    let s = store(MockFileSystem::new());
    assert!(s.load(Tier::User).unwrap().is_empty());
    assert!(s.load(Tier::Folder).unwrap().is_empty());
    assert_eq!(s.resolve().unwrap(), ResolvedSettings::default());
}

#[test]
fn no_config_dir_means_no_user_tier() {
    let s = store(MockFileSystem::new().with_config_dir(None));
    assert_eq!(s.path(Tier::User), None);
    assert!(s.load(Tier::User).unwrap().is_empty());

    let err = s.save(Tier::User, &Settings::default()).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn malformed_file_is_an_error() {
    let s = store(MockFileSystem::new().with_file(FOLDER_FILE, "[defaults\nextensions = 3"));
    let err = s.load(Tier::Folder).unwrap_err();
    assert!(matches!(err, CodelError::SettingsParse { .. }));
    assert!(err.is_config_error());
}

#[test]
fn save_creates_directory_and_writes_toml() {
    let fs = MockFileSystem::new();
    let s = store(fs);

    let mut settings = Settings::default();
    settings.defaults.extensions = Some(vec![".rs".into()]);
    let path = s.save(Tier::Folder, &settings).unwrap();

    assert_eq!(path, PathBuf::from(FOLDER_FILE));
    assert!(s.fs.has_dir("/project/.codel"));
    let written = s.fs.file(FOLDER_FILE).unwrap();
    assert!(written.contains("[defaults]"));
    assert_eq!(s.load(Tier::Folder).unwrap(), settings);
}

#[test]
fn save_failure_reports_path() {
    let s = store(MockFileSystem::new().read_only());
    let err = s.save(Tier::Folder, &Settings::default()).unwrap_err();
    assert!(matches!(err, CodelError::FileAccess { .. }));
}

#[test]
fn folder_overrides_user_per_key() {
    let fs = MockFileSystem::new()
        .with_file(
            USER_FILE,
            "[defaults]\nextensions = [\".py\"]\nignore = [\"build/\"]\ncase_insensitive = true\n",
        )
        .with_file(FOLDER_FILE, "[defaults]\nextensions = [\".rs\"]\n");
    let resolved = store(fs).resolve().unwrap();

    assert_eq!(resolved.extensions, Some(vec![".rs".to_string()]));
    assert_eq!(resolved.ignore, vec!["build/".to_string()]);
    assert!(resolved.case_insensitive);
}

#[test]
fn folder_empty_list_still_overrides() {
    let fs = MockFileSystem::new()
        .with_file(USER_FILE, "[defaults]\nignore = [\"build/\"]\n")
        .with_file(FOLDER_FILE, "[defaults]\nignore = []\n");
    let resolved = store(fs).resolve().unwrap();
    assert!(resolved.ignore.is_empty());
}

#[test]
fn delete_then_save_drops_key() {
    let fs = MockFileSystem::new().with_file(
        FOLDER_FILE,
        "[defaults]\nextensions = [\".rs\"]\nignore = [\"x\"]\n",
    );
    let s = store(fs);

    let mut settings = s.load(Tier::Folder).unwrap();
    assert!(settings.delete(SettingKey::Ignore));
    s.save(Tier::Folder, &settings).unwrap();

    let reloaded = s.load(Tier::Folder).unwrap();
    assert!(reloaded.defaults.ignore.is_none());
    assert_eq!(reloaded.defaults.extensions, Some(vec![".rs".to_string()]));
}
