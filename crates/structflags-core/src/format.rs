//! Canonical formatting of rendered Go source.

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("I/O error talking to {command}: {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Rejected(String),
}

/// Rewrites Go source into canonical form.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Pipes source through `gofmt`.
#[derive(Debug, Clone)]
pub struct Gofmt {
    command: String,
}

impl Gofmt {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for Gofmt {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        debug!(command = %self.command, bytes = source.len(), "formatting source");

        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let io_err = |source| FormatError::Io {
            command: self.command.clone(),
            source,
        };

        // gofmt reads all input before writing, so the write cannot block on
        // a full stdout pipe.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).map_err(io_err)?;
        }
        let output = child.wait_with_output().map_err(io_err)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::Rejected(
                stderr.trim().replace("<standard input>:", ""),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Returns source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl SourceFormatter for Verbatim {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}
