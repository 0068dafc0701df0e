//! Build pipeline: scan → validate → generate → write
//!
//! Phases run strictly in sequence with plugin hooks between them. Any
//! error aborts the build; there is no partial output.

use crate::codegen::generate_cli;
use crate::command::ScannedCommand;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::plugin::PluginSet;
use crate::scan::scan_commands;
use crate::validate::validate_commands;
use crate::writer::{write_cli, Bundler};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No command files were found; nothing was generated
    Empty { commands_root: PathBuf },
    /// Artifact written
    Built { output: PathBuf, commands: usize },
}

/// One build invocation over a resolved configuration
pub struct Pipeline<'a> {
    config: &'a BuildConfig,
    plugins: &'a PluginSet,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a BuildConfig, plugins: &'a PluginSet) -> Self {
        Self { config, plugins }
    }

    /// Discover commands, letting plugins replace the list
    pub fn scan(&self) -> Result<Vec<ScannedCommand>> {
        debug!(plugins = self.plugins.len(), "starting build");
        self.plugins.before_scan(self.config)?;
        info!("Scanning commands directory...");
        let commands = scan_commands(self.config)?;
        if commands.is_empty() {
            return Ok(commands);
        }
        info!("Found {} command(s)", commands.len());
        self.plugins.after_scan(commands, self.config)
    }

    /// Validate and generate source, letting plugins replace the output
    pub fn generate(&self, commands: &[ScannedCommand]) -> Result<String> {
        info!("Validating commands...");
        validate_commands(commands)?;

        self.plugins.before_generate(commands, self.config)?;
        info!("Generating CLI code...");
        let code = generate_cli(commands, self.config)?;
        self.plugins.after_generate(code, self.config)
    }

    /// Scan and generate; `None` when there is nothing to generate
    pub fn generate_source(&self) -> Result<Option<String>> {
        let commands = self.scan()?;
        if commands.is_empty() {
            self.warn_empty();
            return Ok(None);
        }
        self.generate(&commands).map(Some)
    }

    /// Run every phase and write the bundled artifact
    pub fn build(&self, bundler: &dyn Bundler) -> Result<BuildOutcome> {
        let commands = self.scan()?;
        if commands.is_empty() {
            self.warn_empty();
            return Ok(BuildOutcome::Empty {
                commands_root: self.config.commands_root(),
            });
        }

        let code = self.generate(&commands)?;
        let code = self.plugins.before_write(code, self.config)?;

        info!("Writing CLI file...");
        let output = write_cli(&code, self.config, bundler)?;

        self.plugins.after_build(self.config)?;
        info!("Build completed: {}", output.display());

        Ok(BuildOutcome::Built {
            output,
            commands: commands.len(),
        })
    }

    fn warn_empty(&self) {
        warn!(
            "No commands found in the commands directory (expected location: {})",
            self.config.commands_root().display()
        );
    }
}

/// Build with the given plugins and bundler
pub fn build(
    config: &BuildConfig,
    plugins: &PluginSet,
    bundler: &dyn Bundler,
) -> Result<BuildOutcome> {
    Pipeline::new(config, plugins).build(bundler)
}
