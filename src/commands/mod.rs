pub mod config;
mod context;
pub mod count;

pub use config::{ConfigOutcome, run_config, run_config_impl};
pub use context::{exit_code_for, normalize_extensions, resolve_folder, write_output};
pub use count::{CountOutcome, run_count, run_count_impl};

#[cfg(test)]
mod test_fs;
