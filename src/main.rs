use clap::Parser;
use tracing_subscriber::EnvFilter;

use codel::cli::{Cli, Commands};
use codel::commands::{run_config, run_count};

/// Log level for `-v` repetitions; `RUST_LOG` takes precedence when set.
const fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("codel={}", default_level(verbose))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Count(args) => run_count(args, &cli),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}
