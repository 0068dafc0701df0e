// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # clisynth: convention-based CLI generation
//!
//! Point clisynth at a directory of command files and it produces a single
//! executable [commander](https://github.com/tj/commander.js) program.
//!
//! ## Conventions
//!
//! ```text
//! src/commands/
//! ├── index.ts          →  mycli
//! ├── deploy.ts         →  mycli deploy
//! └── remote/
//!     ├── index.ts      →  mycli remote
//!     └── add.ts        →  mycli remote add
//! ```
//!
//! Each file's default export is either a config object with an `action`,
//! or a zero-argument function returning one.
//!
//! ## Pipeline
//!
//! ```text
//! BuildConfig ──► scan ──► validate ──► plan + generate ──► write (bundle)
//!                  │                        │                  │
//!            after_scan hook        after_generate hook   before_write hook
//! ```
//!
//! ```rust,ignore
//! use clisynth::{BuildConfig, EsbuildBundler, Pipeline, PluginSet};
//!
//! let config = BuildConfig::new("/path/to/project", "mycli");
//! let plugins = PluginSet::new();
//! let outcome = Pipeline::new(&config, &plugins).build(&EsbuildBundler::default())?;
//! ```

pub mod build;
pub mod codegen;
pub mod command;
pub mod config;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod plugin;
pub mod scan;
pub mod templates;
pub mod validate;
pub mod writer;

// Re-exports
pub use build::{build, BuildOutcome, Pipeline};
pub use codegen::{build_program, generate_cli, plan_registrations, Attachment, CliProgram};
pub use command::{CommandPath, ScannedCommand};
pub use config::{BuildConfig, BuildOverrides, ConfigFile};
pub use error::{Error, Phase, Result};
pub use manifest::{bin_field, PackageManifest};
pub use metadata::{extract_command_metadata, parse_command_metadata, CommandMetadata};
pub use plugin::{Plugin, PluginSet};
pub use scan::{classify, scan_commands, Scanner};
pub use validate::validate_commands;
pub use writer::{write_cli, Bundler, EsbuildBundler};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
