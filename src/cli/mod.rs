//! CLI command implementations
//!
//! - `build`: Build and generate commands
//! - `list`: Command tree listing
//! - `schema`: Config file JSON schema
//! - `util`: Config resolution and output helpers

pub mod build;
pub mod list;
pub mod schema;
pub mod util;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// Re-export all command functions for convenient access
pub use build::{cmd_build, cmd_generate};
pub use list::cmd_list;
pub use schema::cmd_schema;

#[derive(Parser, Debug)]
#[command(
    name = "clisynth",
    version,
    about = "Generate a commander CLI from a directory of command files"
)]
pub struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan, generate and bundle the CLI
    Build(BuildArgs),
    /// Print the generated source without bundling
    Generate(GenerateArgs),
    /// Show the discovered command tree
    List(ListArgs),
    /// Print the config file JSON schema
    Schema,
}

/// Options shared by every command that resolves a build configuration
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Project root (defaults to the current directory)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Explicit config file; skips discovery
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Commands directory, relative to the project root
    #[arg(short = 's', long)]
    pub commands_dir: Option<PathBuf>,

    /// Output directory, relative to the project root
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Executable name
    #[arg(short = 'b', long)]
    pub bin_name: Option<String>,

    /// Version reported by the generated CLI
    #[arg(long = "version-string")]
    pub version_string: Option<String>,

    /// Description reported by the generated CLI
    #[arg(long)]
    pub description: Option<String>,

    /// File holding a custom outer template, relative to the project directory
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Skip minification
    #[arg(long)]
    pub no_minify: bool,

    /// Stage the generated source as JavaScript
    #[arg(long)]
    pub no_typescript: bool,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write the source here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,

    /// Include best-effort metadata read from each file
    #[arg(long)]
    pub metadata: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "clisynth",
            "build",
            "-b",
            "hefs",
            "-s",
            "cmds",
            "--version-string",
            "2.0.0",
            "--no-minify",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.config.bin_name.as_deref(), Some("hefs"));
        assert_eq!(args.config.commands_dir, Some(PathBuf::from("cmds")));
        assert_eq!(args.config.version_string.as_deref(), Some("2.0.0"));
        assert!(args.config.no_minify);
        assert!(!args.config.no_typescript);
    }

    #[test]
    fn test_global_log_level() {
        let argv = ["clisynth", "list", "--json", "--log-level", "debug"];
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Commands::List(ListArgs { json: true, .. })));
    }
}
