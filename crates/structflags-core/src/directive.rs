//! Discovery of `//go:generate struct-to-pflags ...` directives in a source
//! tree.

use crate::config::ToolConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::model::GeneratorConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

#[allow(clippy::expect_used)]
static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*//\s*go:generate\s+struct-to-pflags\s+(.+)$")
        .expect("invalid directive regex")
});

/// One `go:generate` line invoking struct-to-pflags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateDirective {
    /// File containing the directive.
    pub source_file: PathBuf,

    /// 1-based line of the directive.
    pub line_number: usize,

    /// Struct source, relative to the directive's directory.
    pub file_path: PathBuf,
    pub struct_name: String,

    /// Generated file, relative to the directive's directory.
    pub output_file: PathBuf,
    pub package_name: Option<String>,
}

impl GenerateDirective {
    pub fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            file_path: self.file_path.clone(),
            struct_name: self.struct_name.clone(),
            output_file: Some(self.output_file.clone()),
            package_name: self.package_name.clone(),
        }
    }
}

/// Parse the argument text following `struct-to-pflags` on a directive line.
///
/// Accepts `-flag value` and `-flag=value`; unknown flags are ignored.
pub fn parse_directive(
    source_file: &Path,
    args: &str,
    line_number: usize,
) -> Result<GenerateDirective, String> {
    let dir = match source_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = None;
    let mut struct_name = None;
    let mut output = None;
    let mut package = None;

    let mut tokens = args.split_whitespace();
    while let Some(token) = tokens.next() {
        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (token, None),
        };
        let (slot, name) = match flag {
            "-file" => (&mut file, "-file"),
            "-struct" => (&mut struct_name, "-struct"),
            "-output" => (&mut output, "-output"),
            "-package" | "-pkg" => (&mut package, "-package"),
            _ => continue,
        };
        let value = match inline {
            Some(value) => value,
            None => tokens
                .next()
                .ok_or_else(|| format!("missing value for {name} flag"))?,
        };
        if !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }

    let file = file.ok_or("missing -file flag")?;
    let struct_name = struct_name.ok_or("missing -struct flag")?;
    let output = output.ok_or("missing -output flag")?;

    Ok(GenerateDirective {
        source_file: source_file.to_path_buf(),
        line_number,
        file_path: dir.join(file),
        struct_name,
        output_file: dir.join(output),
        package_name: package,
    })
}

/// Every struct-to-pflags directive under `root`, in walk order.
///
/// Generated files and directories named in `config`'s `skip_dirs` are not
/// scanned. The first malformed directive aborts discovery.
pub fn find_directives(
    root: &Path,
    config: &ToolConfig,
) -> GeneratorResult<Vec<GenerateDirective>> {
    let mut directives = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, config));

    for entry in walker {
        let entry = entry.map_err(|source| GeneratorError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".go") || config.is_generated(&name) {
            continue;
        }
        scan_file(entry.path(), &mut directives)?;
    }

    debug!(root = %root.display(), count = directives.len(), "discovered directives");
    Ok(directives)
}

fn is_pruned(entry: &DirEntry, config: &ToolConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && config.is_skipped_dir(&entry.file_name().to_string_lossy())
}

fn scan_file(path: &Path, directives: &mut Vec<GenerateDirective>) -> GeneratorResult<()> {
    let content = std::fs::read_to_string(path).map_err(|source| GeneratorError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, line) in content.lines().enumerate() {
        let Some(captures) = DIRECTIVE_PATTERN.captures(line) else {
            continue;
        };
        let line_number = index + 1;
        let directive = parse_directive(path, &captures[1], line_number).map_err(|reason| {
            GeneratorError::Directive {
                path: path.to_path_buf(),
                line: line_number,
                reason,
            }
        })?;
        directives.push(directive);
    }
    Ok(())
}
