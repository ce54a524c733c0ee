//! Command-line definition.
//!
//! Go-style single-dash long flags (`-file config.go`, `-struct=config`) are
//! rewritten to their `--` form before clap sees them, so directives copied
//! from `//go:generate` lines work unchanged.

use anyhow::{Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use structflags_core::GeneratorConfig;

/// Long flags that may be written with a single dash.
const LONG_FLAGS: &[&str] = &[
    "file", "struct", "output", "package", "pkg", "dir", "config", "verbose", "help", "version",
];

#[derive(Parser, Debug)]
#[command(name = "struct-to-pflags")]
#[command(author, version, about = "Generate pflag registration and loading code for Go structs", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Path to a struct-to-pflags.toml (default: ./struct-to-pflags.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a generated file matches its struct definition
    Validate(TargetArgs),

    /// Validate every go:generate struct-to-pflags directive under a directory
    ValidateRec {
        /// Root directory to search for go:generate directives
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Path to Go file containing the struct
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Name of the struct to convert
    #[arg(long = "struct", value_name = "NAME")]
    pub struct_name: Option<String>,

    /// Path to output file (if empty, prints to stdout)
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,

    /// Package name for generated code (if empty, extracted from input file)
    #[arg(long, visible_alias = "pkg", value_name = "NAME")]
    pub package: Option<String>,
}

impl TargetArgs {
    pub fn into_config(self) -> Result<GeneratorConfig> {
        let (Some(file), Some(struct_name)) = (self.file, self.struct_name) else {
            bail!("both -file and -struct flags are required");
        };

        let mut config = GeneratorConfig::new(file, struct_name);
        config.output_file = self.output.filter(|o| !o.is_empty()).map(PathBuf::from);
        config.package_name = self.package.filter(|p| !p.is_empty());
        Ok(config)
    }
}

/// Rewrite `-flag` / `-flag=value` to `--flag` / `--flag=value` for known long
/// flags. Everything after a bare `--` is left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_long_flag(rest) => {
                    OsString::from(format!("-{text}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_long_flag(rest: &str) -> bool {
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
