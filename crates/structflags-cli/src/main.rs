//! struct-to-pflags CLI - pflag code generator for Go structs
//!
//! Commands:
//! - `struct-to-pflags -file F -struct S [-output O] [-package P]` - Generate flag code
//! - `struct-to-pflags validate -file F -struct S -output O` - Check a generated file
//! - `struct-to-pflags validate-rec [-dir D]` - Check every go:generate directive in a tree

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use structflags_core::{Generator, ToolConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;
mod generate;
mod validate;
mod validate_rec;

use cli::{Cli, Commands, normalize_args};

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.verbose);

    let tool_config = ToolConfig::discover(cli.config.as_deref(), Path::new("."))
        .context("failed to load tool configuration")?;
    debug!(?tool_config, "loaded tool configuration");
    let generator = Generator::from_config(&tool_config);

    match cli.command {
        None => {
            generate::run(&generator, cli.target)?;
        }
        Some(Commands::Validate(target)) => {
            validate::run(&generator, target)?;
        }
        Some(Commands::ValidateRec { dir }) => {
            validate_rec::run(&generator, &tool_config, &dir)?;
        }
    }

    Ok(())
}

/// Log to stderr. `-v`/`-vv` override `RUST_LOG`; the default level is warn.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
