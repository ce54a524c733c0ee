//! Import path to package directory resolution.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Why a package directory could not be determined.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("package {0} is not known")]
    Unknown(String),
}

/// Finds the directory holding the sources of an imported package.
pub trait PackageResolver {
    /// Resolve `import_path` as seen from a file in `work_dir`.
    fn package_dir(&self, import_path: &str, work_dir: &Path) -> Result<PathBuf, ResolveError>;
}

/// Resolves packages with `go list -f {{.Dir}} <path>`.
#[derive(Debug, Clone)]
pub struct GoListResolver {
    go: String,
}

impl GoListResolver {
    /// Use `go` (a command name or path) to list packages.
    pub fn new(go: impl Into<String>) -> Self {
        Self { go: go.into() }
    }
}

impl Default for GoListResolver {
    fn default() -> Self {
        Self::new("go")
    }
}

impl PackageResolver for GoListResolver {
    fn package_dir(&self, import_path: &str, work_dir: &Path) -> Result<PathBuf, ResolveError> {
        let command = format!("{} list -f {{{{.Dir}}}} {import_path}", self.go);
        debug!(%command, work_dir = %work_dir.display(), "resolving package");

        let output = Command::new(&self.go)
            .args(["list", "-f", "{{.Dir}}", import_path])
            .current_dir(work_dir)
            .output()
            .map_err(|source| ResolveError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ResolveError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let dir = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if dir.is_empty() {
            return Err(ResolveError::Unknown(import_path.to_string()));
        }
        Ok(PathBuf::from(dir))
    }
}

/// Resolves packages from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    dirs: HashMap<String, PathBuf>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, import_path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.dirs.insert(import_path.into(), dir.into());
        self
    }
}

impl PackageResolver for MapResolver {
    fn package_dir(&self, import_path: &str, _work_dir: &Path) -> Result<PathBuf, ResolveError> {
        self.dirs
            .get(import_path)
            .cloned()
            .ok_or_else(|| ResolveError::Unknown(import_path.to_string()))
    }
}
