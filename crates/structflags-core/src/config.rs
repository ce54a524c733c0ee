//! Tool configuration (`struct-to-pflags.toml`).

use crate::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional settings for external tools and directive discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ToolConfig {
    #[serde(default)]
    pub tools: ToolsSection,

    #[serde(default)]
    pub discovery: DiscoverySection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsSection {
    /// Go command used for package resolution
    #[serde(default = "default_go")]
    pub go: String,

    /// Formatter command; empty disables formatting
    #[serde(default = "default_gofmt")]
    pub gofmt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverySection {
    /// File name suffixes of generated files, never scanned for directives
    #[serde(default = "default_generated_suffixes")]
    pub generated_suffixes: Vec<String>,

    /// Directory names pruned from the walk
    #[serde(default)]
    pub skip_dirs: Vec<String>,
}

fn default_go() -> String {
    "go".to_string()
}

fn default_gofmt() -> String {
    "gofmt".to_string()
}

fn default_generated_suffixes() -> Vec<String> {
    vec![".gen.go".to_string(), "_gen.go".to_string()]
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            go: default_go(),
            gofmt: default_gofmt(),
        }
    }
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            generated_suffixes: default_generated_suffixes(),
            skip_dirs: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Name of the config file picked up from the working directory.
    pub const FILE_NAME: &'static str = "struct-to-pflags.toml";

    /// Load and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_str(&content).map_err(|e| GeneratorError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|reason| GeneratorError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Parse config from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Use `explicit` if given, else `struct-to-pflags.toml` in `dir` when it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> GeneratorResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate: PathBuf = dir.join(Self::FILE_NAME);
        if candidate.is_file() {
            Self::from_file(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Check values that parse but cannot work.
    pub fn validate(&self) -> Result<(), String> {
        if self.tools.go.trim().is_empty() {
            return Err("tools.go cannot be empty".to_string());
        }
        if self
            .discovery
            .generated_suffixes
            .iter()
            .any(|s| s.trim().is_empty())
        {
            return Err("discovery.generated_suffixes cannot contain empty entries".to_string());
        }
        Ok(())
    }

    /// Whether `file_name` looks like generated output.
    pub fn is_generated(&self, file_name: &str) -> bool {
        self.discovery
            .generated_suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    /// Whether a directory with this name is pruned from discovery.
    pub fn is_skipped_dir(&self, dir_name: &str) -> bool {
        self.discovery.skip_dirs.iter().any(|d| d == dir_name)
    }
}
