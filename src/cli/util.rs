//! CLI utility helpers

use super::ConfigArgs;
use clisynth::{BuildConfig, BuildOverrides, ConfigFile, Error, PackageManifest, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bin name used by commands that never emit an executable
const PLACEHOLDER_BIN: &str = "cli";

impl ConfigArgs {
    fn project_dir(&self) -> Result<PathBuf> {
        let dir = match &self.project {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(Error::Io)?,
        };
        std::path::absolute(&dir).map_err(Error::Io)
    }

    fn overrides(&self, project_dir: &Path) -> Result<BuildOverrides> {
        let template = match &self.template {
            Some(path) => Some(fs::read_to_string(project_dir.join(path)).map_err(|e| {
                Error::Config(format!("Failed to read template {}: {}", path.display(), e))
            })?),
            None => None,
        };

        Ok(BuildOverrides {
            commands_dir: self.commands_dir.clone(),
            out_dir: self.out_dir.clone(),
            bin_name: self.bin_name.clone(),
            version: self.version_string.clone(),
            description: self.description.clone(),
            template,
            minify: self.no_minify.then_some(false),
            typescript: self.no_typescript.then_some(false),
        })
    }

    fn config_file(&self, project_dir: &Path) -> Result<Option<ConfigFile>> {
        if let Some(path) = &self.config {
            return ConfigFile::load(&project_dir.join(path)).map(Some);
        }
        Ok(ConfigFile::discover(project_dir).map(|(path, file)| {
            info!("Using config file {}", path.display());
            file
        }))
    }

    /// Resolve the full build configuration
    pub fn resolve(&self) -> Result<BuildConfig> {
        let project_dir = self.project_dir()?;
        let overrides = self.overrides(&project_dir)?;
        let file = self.config_file(&project_dir)?;
        let manifest = load_manifest(&project_dir);

        BuildConfig::resolve(&project_dir, &overrides, file.as_ref(), manifest.as_ref())
    }

    /// Like [`resolve`](Self::resolve), but tolerates a missing bin name
    pub fn resolve_lenient(&self) -> Result<BuildConfig> {
        match self.resolve() {
            Err(Error::ConfigurationMissing) => {
                let project_dir = self.project_dir()?;
                let mut overrides = self.overrides(&project_dir)?;
                overrides.bin_name = Some(PLACEHOLDER_BIN.to_string());
                let file = self.config_file(&project_dir)?;
                BuildConfig::resolve(&project_dir, &overrides, file.as_ref(), None)
            }
            other => other,
        }
    }
}

/// A broken package.json only loses the fallbacks it would provide
fn load_manifest(project_dir: &Path) -> Option<PackageManifest> {
    match PackageManifest::load_from_dir(project_dir) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!("Ignoring package.json: {}", e);
            None
        }
    }
}

/// Write content to file or stdout
pub fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            info!("Written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
