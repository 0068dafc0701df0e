//! Template-based emission of the generated program
//!
//! Uses MiniJinja templates compiled into the binary. The IR from
//! [`crate::codegen`] is converted to a [`context::CliContext`] and rendered
//! into two blocks: imports and registrations. Those blocks are then
//! spliced into the outer template by literal substitution.

pub mod context;
pub mod filters;

use minijinja::Environment;
use std::sync::OnceLock;

use crate::codegen::CliProgram;
use crate::error::Error;

// Embedded templates (compiled into binary)
mod embedded {
    pub const IMPORTS: &str = include_str!("../../templates/commander/imports.jinja");
    pub const REGISTRATIONS: &str = include_str!("../../templates/commander/registrations.jinja");
}

pub const IMPORTS_TEMPLATE: &str = "commander/imports.jinja";
pub const REGISTRATIONS_TEMPLATE: &str = "commander/registrations.jinja";

/// Template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

/// Initialize the template engine with embedded templates
fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);

    filters::register_filters(&mut env);

    env.add_template(IMPORTS_TEMPLATE, embedded::IMPORTS)
        .expect("Failed to load imports template");
    env.add_template(REGISTRATIONS_TEMPLATE, embedded::REGISTRATIONS)
        .expect("Failed to load registrations template");

    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

fn render(name: &str, program: &CliProgram) -> Result<String, TemplateError> {
    let template = engine()
        .get_template(name)
        .map_err(|e| TemplateError::TemplateNotFound(e.to_string()))?;

    let ctx = context::CliContext::from_program(program);
    template
        .render(&ctx)
        .map_err(|e| TemplateError::RenderError(name.to_string(), e.to_string()))
}

/// Render the import block
pub fn render_imports(program: &CliProgram) -> Result<String, TemplateError> {
    render(IMPORTS_TEMPLATE, program)
}

/// Render program init, every registration and the final parse call
pub fn render_registrations(program: &CliProgram) -> Result<String, TemplateError> {
    render(REGISTRATIONS_TEMPLATE, program)
}

/// Template errors
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// Template not found
    TemplateNotFound(String),
    /// Template render error (template name, message)
    RenderError(String, String),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::TemplateNotFound(msg) => write!(f, "Template not found: {}", msg),
            TemplateError::RenderError(name, msg) => {
                write!(f, "Template render error in {}: {}", name, msg)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<TemplateError> for Error {
    fn from(e: TemplateError) -> Self {
        Error::Template(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{Attachment, Import, ProgramInit, Registration};
    use crate::command::CommandPath;

    fn sample_program() -> CliProgram {
        CliProgram {
            imports: vec![
                Import {
                    binding: "command_0".into(),
                    path: "../src/commands/index".into(),
                },
                Import {
                    binding: "command_1".into(),
                    path: "../src/commands/deploy".into(),
                },
            ],
            init: ProgramInit {
                name: "hefs".into(),
                version: "1.0.0".into(),
                description: "HEFS's CLI".into(),
            },
            registrations: vec![
                Registration {
                    index: 0,
                    binding: "command_0".into(),
                    command: CommandPath::root(),
                    attachment: Attachment::Root,
                },
                Registration {
                    index: 1,
                    binding: "command_1".into(),
                    command: ["deploy"].into_iter().collect(),
                    attachment: Attachment::Subcommand {
                        var: "cmd_deploy".into(),
                        parent: "program".into(),
                        name: "deploy".into(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_engine_initialization() {
        let env = engine();
        assert!(env.get_template(IMPORTS_TEMPLATE).is_ok());
        assert!(env.get_template(REGISTRATIONS_TEMPLATE).is_ok());
    }

    #[test]
    fn test_render_imports() {
        let code = render_imports(&sample_program()).unwrap();
        assert!(code.starts_with("import { Command } from 'commander';\n"));
        assert!(code.contains("import command_0 from '../src/commands/index';\n"));
        assert!(code.contains("import command_1 from '../src/commands/deploy';"));
    }

    #[test]
    fn test_render_registrations() {
        let code = render_registrations(&sample_program()).unwrap();

        assert!(code.contains("const program = new Command();"), "Missing program");
        assert!(code.contains("  .name('hefs')"), "Missing name");
        assert!(code.contains("  .description('HEFS\\'s CLI');"), "Description not escaped");
        assert!(code.contains("let programVersion = '1.0.0';"), "Missing version");
        assert!(code.contains("// Register root command"));
        assert!(code.contains("registerCommand(program, config_0, true);"));
        assert!(code.contains("// Register command: deploy"));
        assert!(code.contains("const cmd_deploy = program.command('deploy');"));
        assert!(code.contains("registerCommand(cmd_deploy, config_1, false);"));
        assert!(code.contains("program.parse(process.argv);"));
    }

    #[test]
    fn test_shape_dispatch_emitted_once_per_command() {
        let code = render_registrations(&sample_program()).unwrap();
        assert!(code.contains("typeof command_1 === 'function'"));
        assert!(code.contains("command_1()"));
        assert!(code.contains("command_1 && command_1.action"));
        assert_eq!(code.matches("typeof command_1 === 'function'").count(), 1);
    }
}
