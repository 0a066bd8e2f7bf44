pub mod cli;
pub mod commands;
pub mod config;
pub mod counter;
pub mod error;
pub mod ignore;
pub mod output;
pub mod scanner;
pub mod stats;

pub use error::{CodelError, Result};
pub use ignore::{IgnoreSet, IgnoreSetBuilder};
pub use scanner::{ScanReport, Scanner, scan_directory};
pub use stats::ScanResult;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RUNTIME_ERROR: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
