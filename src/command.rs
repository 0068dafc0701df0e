//! Scanned command model
//!
//! A [`ScannedCommand`] is one command-definition file found under the
//! commands root. Its [`CommandPath`] locates it in the command tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Sentinel used when printing the root command's (empty) path
pub const ROOT_LABEL: &str = "<root>";

/// Ordered name segments locating a command; empty is the root command
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment, the name the command is registered under
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Path with the last segment dropped (root stays root)
    pub fn parent(&self) -> CommandPath {
        let mut segments = self.0.clone();
        segments.pop();
        CommandPath(segments)
    }

    /// Space-joined lookup key; empty string for the root
    pub fn key(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(ROOT_LABEL)
        } else {
            f.write_str(&self.key())
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CommandPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CommandPath(iter.into_iter().map(Into::into).collect())
    }
}

/// One discovered command-definition file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedCommand {
    /// Resolved location of the source file
    pub absolute_path: PathBuf,
    /// Path relative to the commands root
    pub relative_path: PathBuf,
    /// Position in the command tree
    pub command_path: CommandPath,
    /// Whether this is its directory's `index` file
    pub is_index: bool,
}

impl ScannedCommand {
    pub fn depth(&self) -> usize {
        self.command_path.depth()
    }

    /// Relative path with `/` separators regardless of platform
    pub fn relative_display(&self) -> String {
        normalize_separators(&self.relative_path)
    }
}

pub(crate) fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let root = CommandPath::root();
        assert!(root.is_root());
        assert_eq!(root.key(), "");
        assert_eq!(root.to_string(), "<root>");
        assert_eq!(root.parent(), root);
        assert_eq!(root.name(), None);
    }

    #[test]
    fn test_nested_path() {
        let path: CommandPath = ["remote", "add"].into_iter().collect();
        assert_eq!(path.depth(), 2);
        assert_eq!(path.key(), "remote add");
        assert_eq!(path.name(), Some("add"));
        assert_eq!(path.parent().key(), "remote");
        assert_eq!(path.to_string(), "remote add");
    }
}
