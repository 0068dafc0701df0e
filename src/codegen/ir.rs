//! Intermediate representation of the generated program
//!
//! Ordering, attachment and naming decisions live here as plain data; the
//! template emitter only turns them into text.

use crate::command::CommandPath;

/// Identifier of the top-level commander program in generated code
pub const PROGRAM_VAR: &str = "program";

/// Module the runtime parser is imported from
pub const RUNTIME_MODULE: &str = "commander";

/// Whole generated program
#[derive(Debug, Clone, PartialEq)]
pub struct CliProgram {
    pub imports: Vec<Import>,
    pub init: ProgramInit,
    pub registrations: Vec<Registration>,
}

/// `import <binding> from '<path>';`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub binding: String,
    pub path: String,
}

/// `new Command()` with name, version and description
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInit {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Registration of one scanned command
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Position of the command in the scanned list
    pub index: usize,
    /// Identifier the command file is imported as
    pub binding: String,
    pub command: CommandPath,
    pub attachment: Attachment,
}

impl Registration {
    /// Identifier holding the resolved command config
    pub fn config_var(&self) -> String {
        format!("config_{}", self.index)
    }
}

/// Where a registration lands in the parser object graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Options and action go straight onto the program
    Root,
    /// `const <var> = <parent>.command('<name>')`
    Subcommand {
        var: String,
        parent: String,
        name: String,
    },
}

impl Attachment {
    /// Identifier the command's fields are registered against
    pub fn target(&self) -> &str {
        match self {
            Attachment::Root => PROGRAM_VAR,
            Attachment::Subcommand { var, .. } => var,
        }
    }
}

/// Import binding for the command at `index`
pub fn binding_name(index: usize) -> String {
    format!("command_{}", index)
}
