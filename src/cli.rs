use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "codel")]
#[command(author, version, about = "Count lines of code per file extension")]
#[command(long_about = "Recursively count lines of files with the given extensions, \
    skipping paths matched by gitignore-style patterns.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Runtime error (folder not found, IO failure)\n  \
    2 - Configuration error")]
pub struct Cli {
    /// Increase verbosity (-v lists counted files, -vv debug logs, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide the progress bar and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count lines grouped by extension
    Count(CountArgs),

    /// Show or change stored defaults
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CountArgs {
    /// Extensions to count, e.g. `-e .py rs` (overrides stored defaults)
    #[arg(short, long, num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Gitignore-style patterns to skip (overrides stored defaults)
    #[arg(short, long, num_args = 1..)]
    pub ignore: Option<Vec<String>>,

    /// Folder to scan
    #[arg(short, long, default_value = ".")]
    pub folder: PathBuf,

    /// Output format [possible values: text, json]
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads for counting (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Match ignore patterns without regard to case
    #[arg(long)]
    pub case_insensitive: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Store default extensions
    #[arg(short, long, num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Store default ignore patterns
    #[arg(short, long, num_args = 1..)]
    pub ignore: Option<Vec<String>>,

    /// Store whether ignore patterns match case-insensitively
    #[arg(long)]
    pub case_insensitive: Option<bool>,

    /// Use the user-wide settings instead of the current folder's
    #[arg(short, long)]
    pub global: bool,

    /// Print stored settings of both tiers
    #[arg(short, long)]
    pub list: bool,

    /// Remove stored keys (extensions, ignore, case_insensitive)
    #[arg(short, long, num_args = 1..)]
    pub delete: Vec<String>,

    /// Folder whose settings are edited
    #[arg(short, long, default_value = ".")]
    pub folder: PathBuf,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
