//! Process execution behind the [`Executor`] trait.
use std::fmt;
use std::process::{Command, Output, Stdio};
use std::str::FromStr;

use anyhow::Result;

use crate::error::{ConfigError, ExecError, ProvisionError};
use crate::resources::ShellCommand;

/// Whether commands are only shown or actually run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecMode {
    /// Build and print every command, touch nothing.
    #[default]
    DryRun,
    /// Run every command through the shell.
    Execute,
}

impl ExecMode {
    /// `true` for [`ExecMode::DryRun`].
    #[must_use]
    pub const fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DryRun => write!(f, "dry-run"),
            Self::Execute => write!(f, "execute"),
        }
    }
}

impl FromStr for ExecMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry-run" => Ok(Self::DryRun),
            "execute" => Ok(Self::Execute),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

/// Result of a captured command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited zero.
    pub success: bool,
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs shell command lines.
///
/// Every method really executes; dry-run handling belongs to the caller
/// ([`Runner`](crate::tasks::processing::Runner)), which simply never calls
/// [`Executor::run`] in that mode.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `command` with inherited stdio and fail on non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Exec`] wrapping [`ExecError::Spawn`] if the
    /// shell cannot be started, or [`ExecError::Failed`] if the command exits
    /// non-zero.
    fn run(&self, command: &ShellCommand) -> Result<()>;

    /// Run `command` and capture its output, failing on non-zero exit.
    ///
    /// # Errors
    ///
    /// Same as [`Executor::run`].
    fn capture(&self, command: &ShellCommand) -> Result<ExecResult>;

    /// Check whether `program` is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn shell(command: &ShellCommand) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command.line());
        cmd
    }
}

fn exit_code(command: &ShellCommand, code: Option<i32>) -> ProvisionError {
    ExecError::Failed {
        command: command.line(),
        code: code.unwrap_or(-1),
    }
    .into()
}

fn spawn_failed(command: &ShellCommand, source: std::io::Error) -> ProvisionError {
    ExecError::Spawn {
        command: command.line(),
        source,
    }
    .into()
}

impl Executor for SystemExecutor {
    fn run(&self, command: &ShellCommand) -> Result<()> {
        let status = Self::shell(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| spawn_failed(command, source))?;
        if !status.success() {
            return Err(exit_code(command, status.code()).into());
        }
        Ok(())
    }

    fn capture(&self, command: &ShellCommand) -> Result<ExecResult> {
        let output = Self::shell(command)
            .output()
            .map_err(|source| spawn_failed(command, source))?;
        let result = ExecResult::from(output);
        if !result.success {
            return Err(anyhow::Error::new(exit_code(command, result.code))
                .context(result.stderr.trim().to_string()));
        }
        Ok(result)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
