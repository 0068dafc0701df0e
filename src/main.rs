//! clisynth CLI - Command-line interface
//!
//! Commands:
//!   build     - Scan, generate and bundle the CLI
//!   generate  - Print the generated source without bundling
//!   list      - Show the discovered command tree
//!   schema    - Print the config file JSON schema

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let result = match &args.command {
        Commands::Build(cmd) => cli::cmd_build(cmd),
        Commands::Generate(cmd) => cli::cmd_generate(cmd),
        Commands::List(cmd) => cli::cmd_list(cmd),
        Commands::Schema => cli::cmd_schema(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {} (phase: {})", e, e.phase());
            ExitCode::from(1)
        }
    }
}
