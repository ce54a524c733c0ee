//! Checks a generated file against what the generator would produce now.
//!
//! Both texts are normalized before comparison so line-ending and
//! trailing-whitespace noise never counts as a change:
//!
//! | Input                 | Normalized  |
//! |-----------------------|-------------|
//! | `\r\n`, `\r`          | `\n`        |
//! | trailing `' '`/`\t`   | removed     |
//! | trailing `\n` at EOF  | removed     |

use crate::error::{GeneratorError, GeneratorResult};
use crate::generate::Generator;
use crate::model::GeneratorConfig;
use crate::naming::defaults_var_name;
use similar::TextDiff;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of validating one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    UpToDate,
    OutOfDate(Mismatch),
}

impl Validation {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Validation::UpToDate)
    }
}

/// Details of a stale generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The stale file.
    pub output: PathBuf,

    /// Struct the file was generated from.
    pub struct_name: String,

    /// Unified line diff from the file on disk to the expected text.
    pub diff: String,

    /// Command line that regenerates the file.
    pub command: String,
}

impl Mismatch {
    /// Explanation shown to users: likely causes, the fix and the diff.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "✗ {} is out of date", self.output.display());
        out.push('\n');
        out.push_str("The generated code does not match the current struct definition.\n");
        out.push_str("This usually happens when:\n");
        out.push_str("  - Struct fields were added, removed, or renamed\n");
        out.push_str("  - Field types were changed\n");
        out.push_str("  - Field comments were modified\n");
        let _ = writeln!(
            out,
            "  - Default values in {} were changed",
            defaults_var_name(&self.struct_name)
        );
        out.push('\n');
        out.push_str("To fix this, run:\n");
        let _ = writeln!(out, "  {}", self.command);
        out.push('\n');
        out.push_str("Diff:\n");
        out.push_str(&self.diff);
        out
    }
}

/// Normalize generated text for comparison.
pub fn normalize(code: &str) -> String {
    let unified = code.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed: Vec<&str> = unified
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect();
    trimmed.join("\n").trim_end_matches('\n').to_string()
}

/// Unified line diff between two normalized texts.
pub fn unified_diff(existing: &str, expected: &str, output: &Path) -> String {
    let old = format!("{existing}\n");
    let new = format!("{expected}\n");
    let diff = TextDiff::from_lines(&old, &new);

    let current = format!("{} (current)", output.display());
    let regenerated = format!("{} (expected)", output.display());
    diff.unified_diff()
        .context_radius(3)
        .header(&current, &regenerated)
        .to_string()
}

/// Command line that regenerates `config`'s output file.
pub fn regenerate_command(config: &GeneratorConfig) -> String {
    let mut command = format!(
        "struct-to-pflags -file {} -struct {}",
        config.file_path.display(),
        config.struct_name
    );
    if let Some(output) = &config.output_file {
        let _ = write!(command, " -output {}", output.display());
    }
    if let Some(package) = &config.package_name {
        let _ = write!(command, " -package {package}");
    }
    command
}

/// Compare the output file named by `config` with freshly generated code.
///
/// Never writes to disk.
pub fn validate(generator: &Generator, config: &GeneratorConfig) -> GeneratorResult<Validation> {
    let output = config
        .output_file
        .as_ref()
        .ok_or_else(|| GeneratorError::MissingOutput {
            struct_name: config.struct_name.clone(),
        })?;

    let expected = generator.generate(config)?;
    let existing =
        std::fs::read_to_string(output).map_err(|source| GeneratorError::ReadExisting {
            path: output.clone(),
            source,
        })?;

    let expected = normalize(&expected);
    let existing = normalize(&existing);
    if expected == existing {
        info!(output = %output.display(), "generated file is up to date");
        return Ok(Validation::UpToDate);
    }

    debug!(output = %output.display(), "generated file differs");
    Ok(Validation::OutOfDate(Mismatch {
        output: output.clone(),
        struct_name: config.struct_name.clone(),
        diff: unified_diff(&existing, &expected, output),
        command: regenerate_command(config),
    }))
}

#[cfg(test)]
#[path = "validate/validate_tests.rs"]
mod validate_tests;
