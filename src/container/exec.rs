//! One-off command execution inside a running container

use crate::error::{ApiError, Result};
use crate::shape::{Shape, ShapeKind};
use crate::time::null_as_default;
use serde::{Deserialize, Serialize};

/// Exec create request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExecConfig {
    pub attach_stdin: bool,
    pub attach_stdout: bool,
    pub attach_stderr: bool,
    pub tty: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub cmd: Vec<String>,
    /// Target container ID or name
    pub container: String,
    /// Run without reading any attached stream
    pub detach: bool,
}

impl ExecConfig {
    /// Exec with stdout and stderr attached
    pub fn new<I, S>(container: &str, cmd: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            container: container.to_string(),
            cmd: cmd.into_iter().map(Into::into).collect(),
            attach_stdout: true,
            attach_stderr: true,
            ..Self::default()
        }
    }

    /// Run detached; the issuer reads no streams
    pub fn detached(mut self) -> Self {
        self.detach = true;
        self.attach_stdin = false;
        self.attach_stdout = false;
        self.attach_stderr = false;
        self
    }

    pub fn interactive(mut self) -> Self {
        self.attach_stdin = true;
        self.tty = true;
        self
    }

    /// Whether the issuer will read any output stream
    pub fn reads_streams(&self) -> bool {
        !self.detach && (self.attach_stdin || self.attach_stdout || self.attach_stderr)
    }
}

impl Shape for ExecConfig {
    const KIND: ShapeKind = ShapeKind::ExecConfig;

    fn validate(&self) -> Result<()> {
        if self.cmd.is_empty() {
            return Err(ApiError::validation(Self::KIND.wire_name(), "Cmd", "is required"));
        }
        Ok(())
    }
}
