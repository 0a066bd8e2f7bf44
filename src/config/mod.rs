mod filesystem;
mod model;
mod store;

pub use filesystem::{FileSystem, RealFileSystem};
pub use model::{Defaults, SettingKey, Settings};
pub use store::{
    CONFIG_FILE_NAME, FOLDER_CONFIG_DIR, ResolvedSettings, SettingsStore, Tier,
};
