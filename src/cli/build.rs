//! Build and generate CLI commands

use super::util::write_output;
use super::{BuildArgs, GenerateArgs};
use clisynth::*;
use tracing::info;

pub fn cmd_build(args: &BuildArgs) -> Result<()> {
    let config = args.config.resolve()?;
    let plugins = PluginSet::new();

    match Pipeline::new(&config, &plugins).build(&EsbuildBundler::default())? {
        BuildOutcome::Empty { .. } => {}
        BuildOutcome::Built { output, commands } => {
            println!("✓ Built {} ({} commands)", output.display(), commands);
        }
    }
    Ok(())
}

pub fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let config = args.config.resolve()?;
    let plugins = PluginSet::new();

    match Pipeline::new(&config, &plugins).generate_source()? {
        Some(code) => write_output(&args.output, &code),
        None => {
            info!("Nothing to generate");
            Ok(())
        }
    }
}
