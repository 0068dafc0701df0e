//! Registration planning
//!
//! Commands are grouped by depth and emitted shallow-first, so a parent's
//! variable always exists before any child is attached to it. A child whose
//! parent path has no defining file attaches to the program itself.

use super::ir::{binding_name, Attachment, Registration, PROGRAM_VAR};
use crate::command::{CommandPath, ScannedCommand};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Plan the registration order for a validated command list
pub fn plan_registrations(commands: &[ScannedCommand]) -> Result<Vec<Registration>> {
    let mut by_depth: BTreeMap<usize, Vec<(usize, &ScannedCommand)>> = BTreeMap::new();
    for (index, command) in commands.iter().enumerate() {
        by_depth
            .entry(command.depth())
            .or_default()
            .push((index, command));
    }

    let mut vars: HashMap<CommandPath, String> = HashMap::new();
    let mut used_vars: HashSet<String> = HashSet::new();
    let mut root_seen = false;
    let mut plan = Vec::with_capacity(commands.len());

    for (index, command) in by_depth.into_values().flatten() {
        let path = &command.command_path;

        let attachment = if path.is_root() {
            if root_seen {
                return Err(Error::Generation(format!(
                    "more than one root command ({})",
                    command.relative_display()
                )));
            }
            root_seen = true;
            Attachment::Root
        } else {
            if vars.contains_key(path) {
                return Err(Error::Generation(format!(
                    "command '{}' registered twice ({})",
                    path,
                    command.relative_display()
                )));
            }

            let parent = resolve_parent(path, &vars);
            let var = unique_var(path, &mut used_vars);
            vars.insert(path.clone(), var.clone());

            Attachment::Subcommand {
                var,
                parent,
                name: path.name().unwrap_or_default().to_string(),
            }
        };

        plan.push(Registration {
            index,
            binding: binding_name(index),
            command: path.clone(),
            attachment,
        });
    }

    Ok(plan)
}

fn resolve_parent(path: &CommandPath, vars: &HashMap<CommandPath, String>) -> String {
    let parent = path.parent();
    if parent.is_root() {
        return PROGRAM_VAR.to_string();
    }

    match vars.get(&parent) {
        Some(var) => var.clone(),
        None => {
            debug!(
                command = %path,
                parent = %parent,
                "no file defines parent, attaching to program"
            );
            PROGRAM_VAR.to_string()
        }
    }
}

/// `cmd_<segments>` made identifier-safe, suffixed on collision
fn unique_var(path: &CommandPath, used: &mut HashSet<String>) -> String {
    let base = format!("cmd_{}", sanitize_ident(&path.segments().join("_")));
    let mut candidate = base.clone();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}", base, n);
        n += 1;
    }
    candidate
}

fn sanitize_ident(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
