//! Command tree listing

use super::ListArgs;
use clisynth::command::ROOT_LABEL;
use clisynth::*;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListEntry {
    command: String,
    file: String,
    is_index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<CommandMetadata>,
}

pub fn cmd_list(args: &ListArgs) -> Result<()> {
    let config = args.config.resolve_lenient()?;
    let commands = scan_commands(&config)?;
    validate_commands(&commands)?;

    let entries: Vec<ListEntry> = commands
        .iter()
        .map(|cmd| ListEntry {
            command: cmd.command_path.to_string(),
            file: cmd.relative_display(),
            is_index: cmd.is_index,
            metadata: args
                .metadata
                .then(|| extract_command_metadata(&cmd.absolute_path))
                .flatten(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No commands found in {}", config.commands_root().display());
        return Ok(());
    }

    for (cmd, entry) in commands.iter().zip(&entries) {
        let indent = "  ".repeat(cmd.depth());
        let name = cmd.command_path.name().unwrap_or(ROOT_LABEL);
        let description = entry
            .metadata
            .as_ref()
            .and_then(|m| m.description.as_deref())
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        println!("{}{} ({}){}", indent, name, entry.file, description);
    }
    Ok(())
}
