//! `validate-rec` command: check every directive under a directory.

use anyhow::{Context, Result, bail};
use std::path::Path;
use structflags_core::{
    GenerateDirective, Generator, ToolConfig, ValidationReporter, validate_recursive,
};

/// Prints progress the way `go generate` users expect to read it.
struct ConsoleReporter;

impl ValidationReporter for ConsoleReporter {
    fn discovered(&mut self, root: &Path, total: usize) {
        if total == 0 {
            println!(
                "No go:generate struct-to-pflags directives found in {}",
                root.display()
            );
        } else {
            println!("Found {total} go:generate struct-to-pflags directive(s)\n");
        }
    }

    fn start(&mut self, index: usize, total: usize, directive: &GenerateDirective) {
        println!(
            "[{index}/{total}] Validating {}...",
            directive.source_file.display()
        );
    }

    fn passed(&mut self, _directive: &GenerateDirective) {
        println!("  ✓ OK\n");
    }

    fn failed(&mut self, directive: &GenerateDirective, reason: &str) {
        eprintln!("{reason}");
        eprintln!(
            "  ✗ FAILED: {} is out of date\n",
            directive.output_file.display()
        );
    }
}

pub fn run(generator: &Generator, tool_config: &ToolConfig, dir: &Path) -> Result<()> {
    let report = validate_recursive(dir, generator, tool_config, &mut ConsoleReporter)
        .with_context(|| format!("failed to validate directives under {}", dir.display()))?;

    if report.total == 0 {
        return Ok(());
    }

    if !report.is_success() {
        eprintln!("\n{} file(s) failed validation:", report.failed.len());
        for source in &report.failed {
            eprintln!("  - {}", source.display());
        }
        bail!(
            "{} of {} generated file(s) are out of date",
            report.failed.len(),
            report.total
        );
    }

    println!("All {} file(s) validated successfully!", report.total);
    Ok(())
}
