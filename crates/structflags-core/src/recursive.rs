//! Batch validation of every directive found in a source tree.

use crate::config::ToolConfig;
use crate::directive::{GenerateDirective, find_directives};
use crate::error::GeneratorResult;
use crate::generate::Generator;
use crate::validate::{Validation, validate};
use std::path::{Path, PathBuf};
use tracing::info;

/// Receives progress of a recursive validation run.
pub trait ValidationReporter {
    /// Discovery finished with `total` directives.
    fn discovered(&mut self, _root: &Path, _total: usize) {}

    /// Validation of directive `index` (1-based) is starting.
    fn start(&mut self, index: usize, total: usize, directive: &GenerateDirective);

    fn passed(&mut self, directive: &GenerateDirective);

    /// `reason` is the full out-of-date explanation including the diff.
    fn failed(&mut self, directive: &GenerateDirective, reason: &str);
}

/// Reporter that discards progress.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl ValidationReporter for SilentReporter {
    fn start(&mut self, _index: usize, _total: usize, _directive: &GenerateDirective) {}
    fn passed(&mut self, _directive: &GenerateDirective) {}
    fn failed(&mut self, _directive: &GenerateDirective, _reason: &str) {}
}

/// Summary of a recursive validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecursiveReport {
    /// Directives validated.
    pub total: usize,

    /// Source files whose directive produced stale output, in walk order.
    pub failed: Vec<PathBuf>,
}

impl RecursiveReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Validate every directive under `root`.
///
/// Stale outputs are collected in the report; discovery, generation and
/// read errors stop the run.
pub fn validate_recursive(
    root: &Path,
    generator: &Generator,
    tool_config: &ToolConfig,
    reporter: &mut dyn ValidationReporter,
) -> GeneratorResult<RecursiveReport> {
    let directives = find_directives(root, tool_config)?;
    let total = directives.len();
    reporter.discovered(root, total);

    let mut report = RecursiveReport {
        total,
        failed: Vec::new(),
    };

    for (i, directive) in directives.iter().enumerate() {
        reporter.start(i + 1, total, directive);
        match validate(generator, &directive.to_config())? {
            Validation::UpToDate => reporter.passed(directive),
            Validation::OutOfDate(mismatch) => {
                reporter.failed(directive, &mismatch.report());
                report.failed.push(directive.source_file.clone());
            }
        }
    }

    info!(
        root = %root.display(),
        total,
        failed = report.failed.len(),
        "recursive validation finished"
    );
    Ok(report)
}
