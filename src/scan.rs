//! Command discovery
//!
//! Walks the commands root, keeps command-definition files, and turns each
//! relative path into a [`CommandPath`]:
//!
//! ```text
//! index.ts            -> <root>
//! deploy.ts           -> deploy
//! remote/index.ts     -> remote
//! remote/add.ts       -> remote add
//! ```
//!
//! The result is ordered shallow-first so registration can run in a single
//! forward pass.

use crate::command::{normalize_separators, CommandPath, ScannedCommand};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Extensions of command-definition files
pub const COMMAND_EXTENSIONS: &[&str] = &["ts", "js"];

/// File name patterns never treated as commands
pub const EXCLUDED_FILE_PATTERNS: &[&str] = &["*.d.ts", "*.test.*", "*.spec.*"];

/// Directories skipped entirely
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "__tests__", "test"];

/// Base name marking a directory's own command
pub const INDEX_STEM: &str = "index";

/// Derive the command path of a file relative to the commands root
///
/// Directory components always contribute; the file's base name (last
/// extension stripped) contributes unless it is an index file.
pub fn classify(relative_path: &Path, is_index: bool) -> CommandPath {
    let mut segments: Vec<String> = relative_path
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if !is_index {
        if let Some(stem) = relative_path.file_stem() {
            segments.push(stem.to_string_lossy().into_owned());
        }
    }

    segments.retain(|s| !s.is_empty());
    CommandPath::new(segments)
}

/// Whether the file is its directory's index file
pub fn is_index_file(relative_path: &Path) -> bool {
    relative_path
        .file_stem()
        .is_some_and(|stem| stem == INDEX_STEM)
}

/// Canonical scan order: depth, index first, then relative path
pub fn compare_commands(a: &ScannedCommand, b: &ScannedCommand) -> Ordering {
    a.depth()
        .cmp(&b.depth())
        .then_with(|| b.is_index.cmp(&a.is_index))
        .then_with(|| a.relative_display().cmp(&b.relative_display()))
}

/// Scan the configured commands root
pub fn scan_commands(config: &BuildConfig) -> Result<Vec<ScannedCommand>> {
    Scanner::new(config.commands_root())?.scan()
}

/// Filesystem scanner over one commands root
pub struct Scanner {
    root: PathBuf,
    excluded: GlobSet,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = std::path::absolute(root.into()).map_err(Error::Io)?;
        Ok(Self {
            root,
            excluded: build_globset(EXCLUDED_FILE_PATTERNS)?,
        })
    }

    /// List, classify and order every command file under the root
    pub fn scan(&self) -> Result<Vec<ScannedCommand>> {
        if !self.root.is_dir() {
            return Err(Error::CommandsDirectoryNotFound(self.root.clone()));
        }

        let mut commands = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_entry(e))
        {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            // Symlinked files count; symlinked directories are not descended into
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file || !self.is_command_file(&entry) {
                continue;
            }

            let absolute_path = entry.path().to_path_buf();
            let relative_path = absolute_path
                .strip_prefix(&self.root)
                .map_err(|e| Error::Other(format!("{}: {}", absolute_path.display(), e)))?
                .to_path_buf();
            let is_index = is_index_file(&relative_path);
            let command_path = classify(&relative_path, is_index);

            debug!(
                file = %normalize_separators(&relative_path),
                command = %command_path,
                "found command"
            );

            commands.push(ScannedCommand {
                absolute_path,
                relative_path,
                command_path,
                is_index,
            });
        }

        commands.sort_by(compare_commands);
        info!(count = commands.len(), root = %self.root.display(), "scanned commands directory");

        Ok(commands)
    }

    fn is_command_file(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| COMMAND_EXTENSIONS.contains(&ext));

        has_extension && !self.excluded.is_match(entry.file_name())
    }
}

/// Hidden entries and excluded directories
fn is_skipped_entry(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && EXCLUDED_DIRS.contains(&name.as_ref())
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)
            .map_err(|e| Error::Other(format!("invalid glob '{}': {}", pat, e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::Other(format!("invalid glob set: {}", e)))
}
