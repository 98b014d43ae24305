//! Domain-specific error types for the provisioner.
//!
//! Each layer raises its own typed error and wraps it in [`ProvisionError`]
//! before it becomes an [`anyhow::Error`], so callers downcast to one type.
//!
//! # Error hierarchy
//!
//! ```text
//! ProvisionError
//! ├── Config(ConfigError)      home resolution, override file, environment
//! ├── Resource(ResourceError)  backups and directory creation
//! └── Exec(ExecError)          external command failures
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the provisioner.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Filesystem resource error.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// External command error.
    #[error("Command error: {0}")]
    Exec(#[from] ExecError),
}

/// Errors that arise while building the configuration registry.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The shell round-trip used to expand `$HOME` failed.
    #[error("could not resolve home directory: {0}")]
    HomeResolution(String),

    /// `$HOME` expanded to nothing.
    #[error("home directory resolved to an empty path")]
    EmptyHome,

    /// The override file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The override file is not valid TOML for the registry schema.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// `PROVISION_MODE` holds something other than `dry-run` or `execute`.
    #[error("Invalid execution mode '{0}': must be one of dry-run, execute")]
    InvalidMode(String),
}

/// Errors that arise from filesystem resources (backups, directories).
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A backup from a previous run is in the way.
    #[error("backup already exists: {}", .0.display())]
    BackupExists(PathBuf),

    /// Moving the destination aside failed.
    #[error("failed to back up {} to {}: {source}", from.display(), to.display())]
    Backup {
        /// Original destination.
        from: PathBuf,
        /// Intended backup path.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Removing a stale backup failed.
    #[error("failed to remove old backup {}: {source}", path.display())]
    RemoveBackup {
        /// Backup path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating a directory failed.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from running external commands.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The shell could not be spawned.
    #[error("failed to execute: {command}: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The command ran and exited non-zero.
    #[error("{command} failed (exit {code})")]
    Failed {
        /// Rendered command line.
        command: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
    },

    /// A tool the task depends on is not on `PATH`.
    #[error("required tool '{0}' not found on PATH")]
    MissingTool(String),
}
