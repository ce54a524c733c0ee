//! `validate` command: check one generated file.

use crate::cli::TargetArgs;
use anyhow::{Context, Result, bail};
use structflags_core::{Generator, Validation, validate};

pub fn run(generator: &Generator, target: TargetArgs) -> Result<()> {
    let config = target.into_config()?;
    let Some(output) = config.output_file.clone() else {
        bail!("-output is required for validation");
    };

    match validate(generator, &config).context("validation failed")? {
        Validation::UpToDate => {
            println!("✓ {} is up to date", output.display());
            Ok(())
        }
        Validation::OutOfDate(mismatch) => {
            eprintln!("{}", mismatch.report());
            bail!("{} is out of date", output.display());
        }
    }
}
