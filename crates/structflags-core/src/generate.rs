//! Generation driver: parse, extract, resolve, render, write.

use crate::config::ToolConfig;
use crate::error::{GeneratorError, GeneratorResult, Warning};
use crate::extract::{extract_defaults, extract_fields, resolve_embedded};
use crate::format::{Gofmt, SourceFormatter, Verbatim};
use crate::model::{Diagnosed, GeneratorConfig};
use crate::render::{RenderInput, render};
use crate::resolver::{GoListResolver, PackageResolver};
use std::io::Write;
use structflags_syntax::parse_file;
use tracing::{debug, info, warn};

/// Runs generation for [`GeneratorConfig`]s with a fixed resolver and
/// formatter.
pub struct Generator {
    resolver: Box<dyn PackageResolver>,
    formatter: Box<dyn SourceFormatter>,
}

impl Generator {
    pub fn new(
        resolver: impl PackageResolver + 'static,
        formatter: impl SourceFormatter + 'static,
    ) -> Self {
        Self {
            resolver: Box::new(resolver),
            formatter: Box::new(formatter),
        }
    }

    /// `go list` resolution and `gofmt` formatting with the configured
    /// commands. An empty formatter command disables formatting.
    pub fn from_config(config: &ToolConfig) -> Self {
        let resolver = GoListResolver::new(config.tools.go.clone());
        if config.tools.gofmt.is_empty() {
            Self::new(resolver, Verbatim)
        } else {
            Self::new(resolver, Gofmt::new(config.tools.gofmt.clone()))
        }
    }

    /// Generate code, logging any warnings.
    pub fn generate(&self, config: &GeneratorConfig) -> GeneratorResult<String> {
        let generated = self.generate_diagnosed(config)?;
        for warning in &generated.warnings {
            warn!("{warning}");
        }
        Ok(generated.value)
    }

    /// Generate code, returning warnings to the caller.
    pub fn generate_diagnosed(&self, config: &GeneratorConfig) -> GeneratorResult<Diagnosed<String>> {
        let path = &config.file_path;
        debug!(file = %path.display(), type_name = %config.struct_name, "generating");

        let source = std::fs::read_to_string(path).map_err(|source| GeneratorError::ReadSource {
            path: path.clone(),
            source,
        })?;
        let file = parse_file(&source).map_err(|source| GeneratorError::Parse {
            path: path.clone(),
            source,
        })?;

        let package = config
            .package_name
            .as_deref()
            .unwrap_or(file.package.name.as_str());

        let mut fields = extract_fields(&file, &config.struct_name).ok_or_else(|| {
            GeneratorError::TypeNotFound {
                name: config.struct_name.clone(),
                path: path.clone(),
            }
        })?;

        let defaults = extract_defaults(&file, &config.struct_name);
        for field in &mut fields {
            if let Some(default_ref) = defaults.get(&field.name) {
                field.default_ref = Some(default_ref.clone());
            }
        }

        let mut warnings: Vec<Warning> = Vec::new();
        let embedded = resolve_embedded(
            &file,
            &config.struct_name,
            config.source_dir(),
            self.resolver.as_ref(),
        )
        .collect_into(&mut warnings);

        let input = RenderInput {
            package,
            type_name: &config.struct_name,
            fields: &fields,
            embedded: &embedded,
        };
        let code = render(&input, self.formatter.as_ref()).collect_into(&mut warnings);

        info!(
            type_name = %config.struct_name,
            fields = fields.len(),
            embedded = embedded.len(),
            "generated flag code"
        );
        Ok(Diagnosed::new(code, warnings))
    }

    /// Write generated code to the configured output file, or to standard
    /// output followed by a newline.
    pub fn write(&self, config: &GeneratorConfig, code: &str) -> GeneratorResult<()> {
        match &config.output_file {
            Some(path) => {
                std::fs::write(path, code).map_err(|source| GeneratorError::WriteOutput {
                    path: path.clone(),
                    source,
                })?;
                info!(output = %path.display(), "wrote generated code");
                Ok(())
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{code}").map_err(GeneratorError::WriteStdout)
            }
        }
    }

    /// Generate and write.
    pub fn run(&self, config: &GeneratorConfig) -> GeneratorResult<()> {
        let code = self.generate(config)?;
        self.write(config, &code)
    }
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
