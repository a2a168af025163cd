//! Running `git`.
//!
//! All process execution goes through [`GitRunner`] so the publish flow can
//! be driven by a recording fake in tests. The production implementation,
//! [`Git`], captures stdout on success and turns a non-zero exit into an
//! [`ExecError::Failed`] carrying the captured stderr.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// A failed external command.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The executable is not installed or not on `PATH`.
    #[error("'{0}' not found. Please install it and make sure it is on your PATH")]
    NotFound(String),

    /// The process could not be started.
    #[error("Failed to spawn {command}: {source}")]
    Spawn {
        /// Command line.
        command: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The process exited unsuccessfully. Displays as the captured stderr.
    #[error("{}", failure_message(.command, .status, .stderr))]
    Failed {
        /// Command line.
        command: String,
        /// Exit code, if the process was not killed by a signal.
        status: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
}

fn failure_message(command: &str, status: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match status {
        Some(code) => format!("`{command}` exited with status {code}"),
        None => format!("`{command}` was terminated by a signal"),
    }
}

/// Something that can run `git` subcommands.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` in `cwd` (the process working directory when `None`)
    /// and return its captured stdout.
    async fn git(&self, args: &[&str], cwd: Option<&Path>) -> Result<String, ExecError>;
}

/// Runs the real `git` executable.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
}

impl Default for Git {
    fn default() -> Self {
        Self::new()
    }
}

impl Git {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a specific executable instead of `git` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl GitRunner for Git {
    async fn git(&self, args: &[&str], cwd: Option<&Path>) -> Result<String, ExecError> {
        let command = format!("{} {}", self.program, args.join(" "));
        tracing::info!("> {command}");

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = match cmd.output().await {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExecError::NotFound(self.program.clone()));
            }
            Err(source) => return Err(ExecError::Spawn { command, source }),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stdout.trim().is_empty() {
            tracing::debug!("{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            tracing::debug!("{}", stderr.trim_end());
        }

        if output.status.success() {
            Ok(stdout)
        } else {
            Err(ExecError::Failed {
                command,
                status: output.status.code(),
                stderr,
            })
        }
    }
}
