//! Command conflict detection
//!
//! Two files may never map to the same command path (`foo.ts` and
//! `foo/index.ts` both claim `foo`).

use crate::command::{CommandPath, ScannedCommand};
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Fail on the first pair of files sharing a command path
pub fn validate_commands(commands: &[ScannedCommand]) -> Result<()> {
    let mut seen: HashMap<&CommandPath, &ScannedCommand> = HashMap::with_capacity(commands.len());

    for command in commands {
        if let Some(existing) = seen.get(&command.command_path) {
            return Err(Error::CommandConflict {
                first: existing.relative_path.clone(),
                second: command.relative_path.clone(),
                command: command.command_path.to_string(),
            });
        }

        seen.insert(&command.command_path, command);
    }

    debug!(count = commands.len(), "commands validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{classify, is_index_file};
    use std::path::{Path, PathBuf};

    fn command(rel: &str) -> ScannedCommand {
        let relative_path = PathBuf::from(rel);
        let is_index = is_index_file(&relative_path);
        ScannedCommand {
            absolute_path: Path::new("/src/commands").join(rel),
            command_path: classify(&relative_path, is_index),
            relative_path,
            is_index,
        }
    }

    #[test]
    fn test_distinct_paths_pass() {
        let commands = vec![
            command("index.ts"),
            command("foo.ts"),
            command("foo/bar.ts"),
        ];
        assert!(validate_commands(&commands).is_ok());
    }

    #[test]
    fn test_empty_list_passes() {
        assert!(validate_commands(&[]).is_ok());
    }

    #[test]
    fn test_file_and_index_conflict() {
        let commands = vec![command("foo/index.ts"), command("foo.ts")];
        match validate_commands(&commands) {
            Err(Error::CommandConflict {
                first,
                second,
                command,
            }) => {
                assert_eq!(first, PathBuf::from("foo/index.ts"));
                assert_eq!(second, PathBuf::from("foo.ts"));
                assert_eq!(command, "foo");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_root_conflict_uses_sentinel() {
        let mut js_root = command("index.js");
        js_root.command_path = CommandPath::root();
        let commands = vec![command("index.ts"), js_root];
        let err = validate_commands(&commands).unwrap_err();
        assert!(err.to_string().contains("Both files map to command: <root>"));
    }

    #[test]
    fn test_paths_with_spaces_are_distinct() {
        let commands = vec![command("a b/c.ts"), command("a/b c.ts")];
        assert_eq!(
            commands[0].command_path.key(),
            commands[1].command_path.key()
        );
        assert!(validate_commands(&commands).is_ok());
    }
}
