//! Error and warning types for generation runs.

use std::path::PathBuf;
use structflags_syntax::ParseError;
use thiserror::Error;

/// Result type alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Fatal errors of a generation, validation or discovery run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Source file is not valid Go.
    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },

    /// The requested struct type is not declared in the source file.
    #[error("struct {name} not found in {}", path.display())]
    TypeNotFound { name: String, path: PathBuf },

    /// Generated code could not be written to the output file.
    #[error("failed to write output file {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Generated code could not be written to standard output.
    #[error("failed to write to stdout: {0}")]
    WriteStdout(#[source] std::io::Error),

    /// Previously generated file could not be read for validation.
    #[error("failed to read existing file {}: {source}", path.display())]
    ReadExisting {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Validation needs an output file to compare against.
    #[error("an output file is required to validate {struct_name}")]
    MissingOutput { struct_name: String },

    /// Directory traversal failed.
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A `go:generate` directive could not be parsed.
    #[error("failed to parse directive in {}:{line}: {reason}", path.display())]
    Directive {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Tool configuration is unreadable or invalid.
    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

/// Non-fatal diagnostics collected during extraction and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// An embedded field's package qualifier matches no import.
    #[error("could not find import for package alias {alias}")]
    UnmappedAlias { alias: String },

    /// The package directory for an import path could not be determined.
    #[error("failed to resolve package {import_path}: {reason}")]
    UnresolvedPackage { import_path: String, reason: String },

    /// A file of an embedded type's package failed to parse.
    #[error("failed to parse package directory {}: {reason}", dir.display())]
    UnparsablePackage { dir: PathBuf, reason: String },

    /// The embedded type is not declared in its package.
    #[error("struct {type_name} not found in package {}", dir.display())]
    EmbeddedTypeNotFound { type_name: String, dir: PathBuf },

    /// An embedded field that is not a qualified foreign type.
    #[error("embedded field {type_text} is not a package-qualified type, skipping")]
    UnsupportedEmbedding { type_text: String },

    /// The canonical formatter rejected the rendered text.
    #[error("failed to format code: {reason}")]
    FormatFailed { reason: String },
}
