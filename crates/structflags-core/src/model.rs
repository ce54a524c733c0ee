//! Values passed between the stages of a generation run.

use crate::error::Warning;
use crate::flag_kind::FlagKind;
use std::path::{Path, PathBuf};

/// One struct field to expose as a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field identifier as declared.
    pub name: String,

    /// Textual type, e.g. `int`, `time.Duration`, `[]string` or `unknown`.
    pub type_tag: String,

    /// Help text; empty when the field has no comment.
    pub comment: String,

    /// Excluded from flags via `pflags:"-"`.
    pub skip: bool,

    /// Go expression for the default, e.g. `defaultConfig.port`.
    pub default_ref: Option<String>,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            comment: String::new(),
            skip: false,
            default_ref: None,
        }
    }

    pub fn kind(&self) -> FlagKind {
        FlagKind::from_type_tag(&self.type_tag)
    }

    /// Default expression, or the kind's zero literal when none was found.
    pub fn default_expr(&self) -> &str {
        self.default_ref
            .as_deref()
            .unwrap_or_else(|| self.kind().zero_literal())
    }
}

/// A struct from another package embedded in the target struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedStructInfo {
    pub type_name: String,

    /// Qualifier used in the source file, e.g. `types`.
    pub pkg_alias: String,

    /// Import path, e.g. `github.com/example/pkg/types`.
    pub pkg_path: String,

    /// Directory the package was loaded from.
    pub dir: PathBuf,

    /// Fields of the embedded type, defaults pointing at the host's defaults.
    pub fields: Vec<FieldInfo>,
}

/// Input of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub file_path: PathBuf,
    pub struct_name: String,

    /// Destination file; standard output when `None`.
    pub output_file: Option<PathBuf>,

    /// Package clause for the output; taken from the source file when `None`.
    pub package_name: Option<String>,
}

impl GeneratorConfig {
    pub fn new(file_path: impl Into<PathBuf>, struct_name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            struct_name: struct_name.into(),
            output_file: None,
            package_name: None,
        }
    }

    pub fn with_output(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = Some(output_file.into());
        self
    }

    pub fn with_package(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Directory containing the source file, used as the working directory
    /// for package resolution.
    pub fn source_dir(&self) -> &Path {
        match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// A value together with the non-fatal diagnostics produced while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Diagnosed<T> {
    pub fn new(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// A value with no warnings.
    pub fn clean(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed::new(f(self.value), self.warnings)
    }

    /// Split into the value, appending the warnings to `sink`.
    pub fn collect_into(self, sink: &mut Vec<Warning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}
