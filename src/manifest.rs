//! `package.json` access
//!
//! Only the fields the build needs are read: the binary name (first key of
//! `bin`), `version` and `description`.

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Subset of `package.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bin: Option<Value>,
}

impl PackageManifest {
    /// Load `package.json` from a directory, `None` if absent
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let manifest_file = dir.join("package.json");
        if !manifest_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&manifest_file).map_err(Error::Io)?;
        Self::from_json(&content).map(Some)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse package.json: {}", e)))
    }

    /// Binary name declared by the `bin` field
    ///
    /// An object yields its first key; a plain string yields the package
    /// name (npm's own convention for single-binary packages).
    pub fn bin_name(&self) -> Option<String> {
        match self.bin.as_ref()? {
            Value::Object(map) => map.keys().next().cloned(),
            Value::String(_) => self.name.as_ref().map(|n| unscoped(n).to_string()),
            _ => None,
        }
        .filter(|name| !name.is_empty())
    }
}

fn unscoped(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// `bin` entry pointing the configured binary name at the generated artifact
pub fn bin_field(config: &BuildConfig) -> Map<String, Value> {
    let bin_path = crate::command::normalize_separators(&config.out_dir.join("index.cjs"));
    let mut map = Map::new();
    map.insert(config.bin_name.clone(), Value::String(bin_path));
    map
}
