//! Code generation - scanned commands to a commander program
//!
//! ```text
//! [ScannedCommand] ──► plan_registrations ──► CliProgram (IR)
//!                                                 │
//!                         templates (minijinja) ◄─┘
//!                                 │
//!                   outer template substitution ──► source text
//! ```

pub mod ir;
pub mod plan;
pub mod template;

pub use ir::{Attachment, CliProgram, Import, ProgramInit, Registration, PROGRAM_VAR};
pub use plan::plan_registrations;
pub use template::{substitute, DEFAULT_TEMPLATE};

use crate::command::{normalize_separators, ScannedCommand};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::templates;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Generate the program source for a validated command list
pub fn generate_cli(commands: &[ScannedCommand], config: &BuildConfig) -> Result<String> {
    let program = build_program(commands, config)?;
    let imports = templates::render_imports(&program)?;
    let registrations = templates::render_registrations(&program)?;

    let outer = config.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    let code = substitute(
        outer,
        &[
            (template::IMPORTS, imports.as_str()),
            (template::BIN_NAME, program.init.name.as_str()),
            (template::VERSION, program.init.version.as_str()),
            (template::DESCRIPTION, program.init.description.as_str()),
            (template::REGISTRATIONS, registrations.as_str()),
        ],
    );

    debug!(
        bytes = code.len(),
        commands = commands.len(),
        "generated CLI source"
    );
    Ok(code)
}

/// Assemble the IR: imports, program init and planned registrations
pub fn build_program(commands: &[ScannedCommand], config: &BuildConfig) -> Result<CliProgram> {
    let emit_dir = std::path::absolute(config.staging_dir())
        .map_err(|e| Error::Generation(format!("cannot resolve staging directory: {}", e)))?;

    let imports = commands
        .iter()
        .enumerate()
        .map(|(index, command)| {
            Ok(Import {
                binding: ir::binding_name(index),
                path: import_path(&emit_dir, &command.absolute_path)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CliProgram {
        imports,
        init: ProgramInit {
            name: config.bin_name.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        },
        registrations: plan_registrations(commands)?,
    })
}

/// Module specifier for `target` as seen from a file in `from_dir`
///
/// Separators are normalized to `/`, a trailing `.ts`/`.js` is dropped, and
/// the result always starts with `.` so it resolves as a relative import.
pub fn import_path(from_dir: &Path, target: &Path) -> Result<String> {
    let relative = relative_path(from_dir, target).ok_or_else(|| {
        Error::Generation(format!(
            "cannot import {} from {}",
            target.display(),
            from_dir.display()
        ))
    })?;

    let mut specifier = normalize_separators(&relative);
    for ext in [".ts", ".js"] {
        if let Some(stripped) = specifier.strip_suffix(ext) {
            specifier = stripped.to_string();
            break;
        }
    }

    if specifier.starts_with('.') {
        Ok(specifier)
    } else {
        Ok(format!("./{}", specifier))
    }
}

/// Lexical relative path between two absolute paths
fn relative_path(from_dir: &Path, target: &Path) -> Option<PathBuf> {
    if !from_dir.is_absolute() || !target.is_absolute() {
        return None;
    }

    let from: Vec<Component> = from_dir
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to: Vec<Component> = target
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    // Different drive or root prefix
    if from.first() != to.first() {
        return None;
    }

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}
