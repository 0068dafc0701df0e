//! Build configuration
//!
//! A [`BuildConfig`] is resolved once per build by merging, in precedence
//! order, command-line overrides, an optional config file, `package.json`
//! and built-in defaults. It is immutable afterwards and threaded through
//! every phase explicitly.

use crate::error::{Error, Result};
use crate::manifest::PackageManifest;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file names checked in the project directory, first hit wins
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "clisynth.config.yaml",
    "clisynth.config.yml",
    "clisynth.config.json",
    ".clisynthrc.yaml",
    ".clisynthrc.json",
];

pub const DEFAULT_COMMANDS_DIR: &str = "./src/commands";
pub const DEFAULT_OUT_DIR: &str = "./dist/cli";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Staging directory (relative to the project) the generated source is written to
pub const STAGING_DIR: &str = ".temp";

/// Name of the bundled artifact inside the output directory
pub const OUTPUT_FILE: &str = "index.cjs";

/// Resolved, immutable configuration for one build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
    /// Directory relative paths are resolved against
    pub project_dir: PathBuf,
    pub commands_dir: PathBuf,
    pub out_dir: PathBuf,
    pub bin_name: String,
    pub version: String,
    pub description: String,
    /// Custom outer template text (replaces the default)
    pub template: Option<String>,
    pub minify: bool,
    pub typescript: bool,
}

impl BuildConfig {
    /// Defaults for a project directory and binary name
    pub fn new(project_dir: impl Into<PathBuf>, bin_name: impl Into<String>) -> Self {
        let bin_name = bin_name.into();
        Self {
            project_dir: project_dir.into(),
            commands_dir: PathBuf::from(DEFAULT_COMMANDS_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            description: default_description(&bin_name),
            bin_name,
            version: DEFAULT_VERSION.to_string(),
            template: None,
            minify: true,
            typescript: true,
        }
    }

    /// Merge overrides, config file and manifest on top of defaults
    pub fn resolve(
        project_dir: &Path,
        overrides: &BuildOverrides,
        file: Option<&ConfigFile>,
        manifest: Option<&PackageManifest>,
    ) -> Result<Self> {
        let empty = ConfigFile::default();
        let file = file.unwrap_or(&empty);

        let bin_name = overrides
            .bin_name
            .clone()
            .or_else(|| file.bin_name.clone())
            .or_else(|| manifest.and_then(PackageManifest::bin_name))
            .filter(|name| !name.trim().is_empty())
            .ok_or(Error::ConfigurationMissing)?;

        let version = overrides
            .version
            .clone()
            .or_else(|| file.version.clone())
            .or_else(|| manifest.and_then(|m| m.version.clone()))
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let description = overrides
            .description
            .clone()
            .or_else(|| file.description.clone())
            .or_else(|| manifest.and_then(|m| m.description.clone()))
            .unwrap_or_else(|| default_description(&bin_name));

        let template = match (&overrides.template, &file.template, &file.template_file) {
            (Some(text), _, _) => Some(text.clone()),
            (None, Some(text), _) => Some(text.clone()),
            (None, None, Some(path)) => {
                let path = project_dir.join(path);
                let text = std::fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read template {}: {}", path.display(), e))
                })?;
                Some(text)
            }
            (None, None, None) => None,
        };

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            commands_dir: overrides
                .commands_dir
                .clone()
                .or_else(|| file.commands_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMANDS_DIR)),
            out_dir: overrides
                .out_dir
                .clone()
                .or_else(|| file.out_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            bin_name,
            version,
            description,
            template,
            minify: overrides.minify.or(file.minify).unwrap_or(true),
            typescript: overrides.typescript.or(file.typescript).unwrap_or(true),
        })
    }

    /// Absolute commands root
    pub fn commands_root(&self) -> PathBuf {
        self.project_dir.join(&self.commands_dir)
    }

    /// Absolute output directory
    pub fn out_root(&self) -> PathBuf {
        self.project_dir.join(&self.out_dir)
    }

    /// Path of the bundled artifact
    pub fn output_file(&self) -> PathBuf {
        self.out_root().join(OUTPUT_FILE)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.project_dir.join(STAGING_DIR)
    }

    /// Staging source file, extension follows the language mode
    pub fn staging_file(&self) -> PathBuf {
        let ext = if self.typescript { "ts" } else { "js" };
        self.staging_dir().join(format!("index.{}", ext))
    }
}

fn default_description(bin_name: &str) -> String {
    format!("{} CLI", bin_name)
}

/// Values supplied on the command line; `None` defers to lower layers
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub commands_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub bin_name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub template: Option<String>,
    pub minify: Option<bool>,
    pub typescript: Option<bool>,
}

/// On-disk configuration (`clisynth.config.yaml` and friends)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Source directory containing commands (default `./src/commands`)
    #[serde(default, alias = "commandsDir")]
    pub commands_dir: Option<PathBuf>,

    /// Output directory for the generated CLI (default `./dist/cli`)
    #[serde(default, alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Binary name; falls back to the first `bin` key of package.json
    #[serde(default, alias = "binName")]
    pub bin_name: Option<String>,

    /// Program version (default `1.0.0`)
    #[serde(default)]
    pub version: Option<String>,

    /// Program description (default `<bin_name> CLI`)
    #[serde(default)]
    pub description: Option<String>,

    /// Inline outer template
    #[serde(default)]
    pub template: Option<String>,

    /// Outer template loaded from a file, relative to the project directory
    #[serde(default, alias = "templateFile")]
    pub template_file: Option<PathBuf>,

    /// Minify the bundle (default true)
    #[serde(default)]
    pub minify: Option<bool>,

    /// Stage the generated source as TypeScript (default true)
    #[serde(default)]
    pub typescript: Option<bool>,
}

impl ConfigFile {
    /// Load a config file, format chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_norway::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Probe [`CONFIG_FILE_NAMES`] in `dir`
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn discover(dir: &Path) -> Option<(PathBuf, Self)> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config file");
                    return Some((path, config));
                }
                Err(e) => warn!("Failed to load config from {}: {}", name, e),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn manifest() -> PackageManifest {
        PackageManifest::from_json(
            r#"{"name": "hefs", "version": "2.3.4", "description": "From manifest", "bin": {"hefs": "dist/cli/index.cjs"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = BuildConfig::new("/work", "hefs");
        assert_eq!(config.commands_dir, PathBuf::from("./src/commands"));
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.description, "hefs CLI");
        assert!(config.minify);
        assert!(config.typescript);
        assert_eq!(config.staging_file(), PathBuf::from("/work/.temp/index.ts"));
    }

    #[test]
    fn test_missing_bin_name_is_configuration_missing() {
        let overrides = BuildOverrides::default();
        let result = BuildConfig::resolve(Path::new("/work"), &overrides, None, None);
        assert!(matches!(result, Err(Error::ConfigurationMissing)));
    }

    #[test]
    fn test_precedence_flags_over_file_over_manifest() {
        let file = ConfigFile {
            bin_name: Some("from-file".into()),
            version: Some("0.9.0".into()),
            out_dir: Some("out".into()),
            minify: Some(false),
            ..Default::default()
        };
        let overrides = BuildOverrides {
            bin_name: Some("from-flag".into()),
            typescript: Some(false),
            ..Default::default()
        };

        let config = BuildConfig::resolve(
            Path::new("/work"),
            &overrides,
            Some(&file),
            Some(&manifest()),
        )
        .unwrap();

        assert_eq!(config.bin_name, "from-flag");
        assert_eq!(config.version, "0.9.0");
        assert_eq!(config.description, "From manifest");
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(!config.minify);
        assert!(!config.typescript);
        assert_eq!(config.staging_file(), PathBuf::from("/work/.temp/index.js"));
    }

    #[test]
    fn test_manifest_supplies_bin_name() {
        let config = BuildConfig::resolve(
            Path::new("/work"),
            &BuildOverrides::default(),
            None,
            Some(&manifest()),
        )
        .unwrap();
        assert_eq!(config.bin_name, "hefs");
        assert_eq!(config.version, "2.3.4");
    }

    #[test]
    fn test_load_yaml_accepts_camel_case_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clisynth.config.yaml");
        let yaml = "binName: hefs\ncommandsDir: ./cmds\nminify: false\n";
        fs::write(&path, yaml).unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.bin_name.as_deref(), Some("hefs"));
        assert_eq!(config.commands_dir, Some(PathBuf::from("./cmds")));
        assert_eq!(config.minify, Some(false));
    }

    #[test]
    fn test_discover_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("clisynth.config.yaml"),
            "bin_name: [unterminated",
        )
        .unwrap();
        fs::write(
            dir.path().join(".clisynthrc.json"),
            r#"{"bin_name": "fallback"}"#,
        )
        .unwrap();

        let (path, config) = ConfigFile::discover(dir.path()).unwrap();
        assert!(path.ends_with(".clisynthrc.json"));
        assert_eq!(config.bin_name.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_template_file_resolved_against_project() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cli.tpl"), "// {{BIN_NAME}}").unwrap();
        let file = ConfigFile {
            bin_name: Some("hefs".into()),
            template_file: Some("cli.tpl".into()),
            ..Default::default()
        };

        let overrides = BuildOverrides::default();
        let config = BuildConfig::resolve(dir.path(), &overrides, Some(&file), None).unwrap();
        assert_eq!(config.template.as_deref(), Some("// {{BIN_NAME}}"));
    }
}
