//! Template context structures
//!
//! Flattens the generation IR into template-friendly views.

use crate::codegen::ir::RUNTIME_MODULE;
use crate::codegen::{Attachment, CliProgram};
use serde::Serialize;

/// Context for the commander templates
#[derive(Debug, Clone, Serialize)]
pub struct CliContext {
    /// Module the `Command` class is imported from
    pub runtime: String,
    pub imports: Vec<ImportView>,
    pub init: InitView,
    pub registrations: Vec<RegistrationView>,
}

/// View of an import binding
#[derive(Debug, Clone, Serialize)]
pub struct ImportView {
    pub binding: String,
    /// Module specifier, unquoted
    pub path: String,
}

/// View of the program initializer
#[derive(Debug, Clone, Serialize)]
pub struct InitView {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// View of one registration
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationView {
    /// Import binding of the command file
    pub binding: String,
    /// Identifier the resolved config is stored in
    pub config_var: String,
    pub is_root: bool,
    /// Identifier options and action are registered against
    pub target: String,
    /// Command path for the leading comment (single line)
    pub label: String,
    /// Sub-command identifier (None for the root)
    pub var: Option<String>,
    /// Parent identifier (None for the root)
    pub parent: Option<String>,
    /// Name passed to `.command()` (None for the root)
    pub name: Option<String>,
}

impl CliContext {
    pub fn from_program(program: &CliProgram) -> Self {
        Self {
            runtime: RUNTIME_MODULE.to_string(),
            imports: program
                .imports
                .iter()
                .map(|i| ImportView {
                    binding: i.binding.clone(),
                    path: i.path.clone(),
                })
                .collect(),
            init: InitView {
                name: program.init.name.clone(),
                version: program.init.version.clone(),
                description: program.init.description.clone(),
            },
            registrations: program
                .registrations
                .iter()
                .map(|r| {
                    let (var, parent, name) = match &r.attachment {
                        Attachment::Root => (None, None, None),
                        Attachment::Subcommand { var, parent, name } => {
                            (Some(var.clone()), Some(parent.clone()), Some(name.clone()))
                        }
                    };
                    RegistrationView {
                        binding: r.binding.clone(),
                        config_var: r.config_var(),
                        is_root: matches!(r.attachment, Attachment::Root),
                        target: r.attachment.target().to_string(),
                        label: single_line(&r.command.to_string()),
                        var,
                        parent,
                        name,
                    }
                })
                .collect(),
        }
    }
}

fn single_line(s: &str) -> String {
    s.replace(['\n', '\r', '\u{2028}', '\u{2029}'], " ")
}
