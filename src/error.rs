//! Error types for clisynth

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline phase an error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configure,
    Scan,
    Validate,
    Generate,
    Write,
    Build,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Configure => "configure",
            Phase::Scan => "scan",
            Phase::Validate => "validate",
            Phase::Generate => "generate",
            Phase::Write => "write",
            Phase::Build => "build",
        };
        f.write_str(name)
    }
}

/// clisynth errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("No binary name configured: set `bin_name` in the config file, pass --bin-name, or add a `bin` field to package.json")]
    ConfigurationMissing,

    #[error("Commands directory not found: {}", .0.display())]
    CommandsDirectoryNotFound(PathBuf),

    #[error(
        "Command conflict detected:\n  - {}\n  - {}\nBoth files map to command: {command}",
        first.display(),
        second.display()
    )]
    CommandConflict {
        first: PathBuf,
        second: PathBuf,
        command: String,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Plugin '{plugin}' failed during {phase}: {message}")]
    Hook {
        plugin: String,
        phase: Phase,
        message: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// The pipeline phase this error aborted
    pub fn phase(&self) -> Phase {
        match self {
            Error::ConfigurationMissing | Error::Config(_) | Error::Yaml(_) | Error::Json(_) => {
                Phase::Configure
            }
            Error::CommandsDirectoryNotFound(_) => Phase::Scan,
            Error::CommandConflict { .. } => Phase::Validate,
            Error::Generation(_) | Error::Template(_) => Phase::Generate,
            Error::Write(_) => Phase::Write,
            Error::Hook { phase, .. } => *phase,
            Error::Io(_) | Error::Other(_) => Phase::Build,
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_both_files() {
        let err = Error::CommandConflict {
            first: PathBuf::from("foo.ts"),
            second: PathBuf::from("foo/index.ts"),
            command: "foo".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("  - foo.ts"));
        assert!(msg.contains("  - foo/index.ts"));
        assert!(msg.ends_with("Both files map to command: foo"));
        assert_eq!(err.phase(), Phase::Validate);
    }

    #[test]
    fn test_hook_error_keeps_phase() {
        let err = Error::Hook {
            plugin: "banner".into(),
            phase: Phase::Generate,
            message: "boom".into(),
        };
        assert_eq!(err.phase(), Phase::Generate);
        assert_eq!(
            err.to_string(),
            "Plugin 'banner' failed during generate: boom"
        );
    }
}
