//! Config schema CLI command

use clisynth::{ConfigFile, Result};

pub fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(ConfigFile);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
