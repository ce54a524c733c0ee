//! structflags-core - Flag code generation and validation for Go structs
//!
//! This crate turns a Go struct declaration into `spf13/pflag` registration
//! and loading code, and checks previously generated files:
//! - [`Generator`] for single generation runs
//! - [`validate()`] for comparing a generated file with fresh output
//! - [`validate_recursive`] for checking every `go:generate` directive in a tree
//! - [`ToolConfig`] for the optional `struct-to-pflags.toml`
//! - [`GeneratorError`] and [`Warning`] for fatal and non-fatal problems
//!
//! Package lookup and formatting go through the [`PackageResolver`] and
//! [`SourceFormatter`] traits so callers can run without a Go toolchain.

mod config;
mod directive;
mod error;
mod extract;
mod flag_kind;
mod format;
mod generate;
mod model;
pub mod naming;
mod recursive;
mod render;
mod resolver;
mod validate;

pub use config::{DiscoverySection, ToolConfig, ToolsSection};
pub use directive::{GenerateDirective, find_directives, parse_directive};
pub use error::{GeneratorError, GeneratorResult, Warning};
pub use extract::{extract_defaults, extract_fields, resolve_embedded};
pub use flag_kind::FlagKind;
pub use format::{FormatError, Gofmt, SourceFormatter, Verbatim};
pub use generate::Generator;
pub use model::{Diagnosed, EmbeddedStructInfo, FieldInfo, GeneratorConfig};
pub use recursive::{RecursiveReport, SilentReporter, ValidationReporter, validate_recursive};
pub use render::{HEADER, RenderInput, render, render_source};
pub use resolver::{GoListResolver, MapResolver, PackageResolver, ResolveError};
pub use validate::{Mismatch, Validation, normalize, regenerate_command, unified_diff, validate};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Generator, GeneratorConfig, GeneratorError, GeneratorResult, RecursiveReport, ToolConfig,
        Validation, ValidationReporter, Warning,
    };
}
