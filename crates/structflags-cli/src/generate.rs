//! Default command: generate flag code for one struct.

use crate::cli::TargetArgs;
use anyhow::{Context, Result};
use structflags_core::Generator;

pub fn run(generator: &Generator, target: TargetArgs) -> Result<()> {
    let config = target.into_config()?;

    generator
        .run(&config)
        .with_context(|| format!("failed to generate flags for {}", config.struct_name))?;

    Ok(())
}
