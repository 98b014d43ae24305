//! Declarative steps and the single interpreter that applies them.
//!
//! Tasks never spawn processes or touch the filesystem themselves: they return
//! a list of [`Step`]s, and a [`Runner`] turns each step into commands and
//! filesystem changes according to its [`ExecMode`]. Every effect, planned or
//! real, is appended to the runner's journal of [`Action`]s.
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::{ProvisionError, ResourceError};
use crate::exec::{ExecMode, Executor};
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::resources::command;
use crate::resources::{BackupPolicy, FileLink, ShellCommand};

/// One unit of work, described but not yet performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Informational log line.
    Note(String),
    /// Run a shell command.
    Run(ShellCommand),
    /// Create a single directory level if nothing is at `path`.
    EnsureDir(PathBuf),
    /// Move any existing destination aside, then create the symlink.
    Link {
        /// What to link.
        link: FileLink,
        /// What to do when the backup path is taken.
        backup: BackupPolicy,
    },
}

/// An effect the runner performed (or, in dry-run mode, would have performed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A command line was issued.
    Command(String),
    /// A destination was moved aside.
    Rename {
        /// Original path.
        from: PathBuf,
        /// Backup path.
        to: PathBuf,
    },
    /// A stale backup was deleted.
    Remove(PathBuf),
    /// A directory was created.
    CreateDir(PathBuf),
    /// A link was not created because its backup path was taken.
    SkippedLink(PathBuf),
}

/// Interprets [`Step`]s against an executor and a filesystem.
pub struct Runner<'a> {
    mode: ExecMode,
    executor: &'a dyn Executor,
    fs: &'a dyn FileSystemOps,
    log: &'a dyn Log,
    journal: Vec<Action>,
}

impl fmt::Debug for Runner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("mode", &self.mode)
            .field("executor", &"<dyn Executor>")
            .field("fs", &self.fs)
            .field("log", &"<dyn Log>")
            .field("journal", &self.journal.len())
            .finish()
    }
}

impl<'a> Runner<'a> {
    /// Create a runner with an empty journal.
    #[must_use]
    pub fn new(
        mode: ExecMode,
        executor: &'a dyn Executor,
        fs: &'a dyn FileSystemOps,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            mode,
            executor,
            fs,
            log,
            journal: Vec::new(),
        }
    }

    /// The execution mode this runner was created with.
    #[must_use]
    pub const fn mode(&self) -> ExecMode {
        self.mode
    }

    /// The executor, for preflight checks.
    #[must_use]
    pub fn executor(&self) -> &dyn Executor {
        self.executor
    }

    /// Every action so far, in order.
    #[must_use]
    pub fn journal(&self) -> &[Action] {
        &self.journal
    }

    /// The command lines issued so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<&str> {
        self.journal
            .iter()
            .filter_map(|a| match a {
                Action::Command(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Apply `steps` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first step that fails.
    pub fn apply_all<'s>(&mut self, steps: impl IntoIterator<Item = &'s Step>) -> Result<()> {
        for step in steps {
            self.apply(step)?;
        }
        Ok(())
    }

    /// Apply one step.
    ///
    /// # Errors
    ///
    /// Returns an error if a command fails (execute mode), a filesystem change
    /// fails, or a backup conflict is hit under [`BackupPolicy::Fail`].
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Note(msg) => {
                self.log.info(msg);
                Ok(())
            }
            Step::Run(cmd) => self.run_command(cmd),
            Step::EnsureDir(path) => self.ensure_dir(path),
            Step::Link { link, backup } => self.link(link, *backup),
        }
    }

    /// Merge `src` into `dest` with rsync.
    ///
    /// # Errors
    ///
    /// Returns an error if rsync fails (execute mode).
    pub fn merge_directories(&mut self, src: &Path, dest: &Path, verbose: bool) -> Result<()> {
        self.run_command(&command::merge_directories(src, dest, verbose))
    }

    fn run_command(&mut self, cmd: &ShellCommand) -> Result<()> {
        let line = cmd.line();
        self.journal.push(Action::Command(line.clone()));
        if self.mode.is_dry_run() {
            self.log.dry_run(&line);
            return Ok(());
        }
        self.log.debug(&format!("running: {line}"));
        self.executor.run(cmd)
    }

    fn ensure_dir(&mut self, path: &Path) -> Result<()> {
        if self.fs.exists(path) {
            self.log
                .debug(&format!("directory exists: {}", path.display()));
            return Ok(());
        }
        self.journal.push(Action::CreateDir(path.to_path_buf()));
        if self.mode.is_dry_run() {
            self.log.dry_run(&format!("mkdir {}", path.display()));
            return Ok(());
        }
        self.fs
            .create_dir(path)
            .map_err(|source| {
                ProvisionError::from(ResourceError::CreateDir {
                    path: path.to_path_buf(),
                    source,
                })
            })?;
        Ok(())
    }

    fn link(&mut self, link: &FileLink, policy: BackupPolicy) -> Result<()> {
        let destination = link.destination();
        self.log.debug(&format!("linking {link}"));

        if self.fs.exists(&destination) {
            let backup = link.backup_path();
            if self.fs.exists(&backup) {
                match policy {
                    BackupPolicy::Fail => {
                        return Err(
                            ProvisionError::from(ResourceError::BackupExists(backup)).into()
                        );
                    }
                    BackupPolicy::Skip => {
                        self.log.warn(&format!(
                            "{} already backed up, leaving {} in place",
                            backup.display(),
                            destination.display()
                        ));
                        self.journal.push(Action::SkippedLink(destination));
                        return Ok(());
                    }
                    BackupPolicy::Overwrite => self.remove_backup(&backup, link.is_elevated())?,
                }
            }
            self.backup(&destination, &backup, link.is_elevated())?;
        }

        self.run_command(&command::symlink(
            &link.source(),
            &destination,
            link.is_elevated(),
        ))
    }

    fn backup(&mut self, from: &Path, to: &Path, elevated: bool) -> Result<()> {
        self.journal.push(Action::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        let cmd = command::rename(from, to, elevated);
        if self.mode.is_dry_run() {
            self.log.dry_run(&cmd.line());
            return Ok(());
        }
        if elevated {
            return self.executor.run(&cmd);
        }
        self.log.debug(&format!(
            "backing up {} to {}",
            from.display(),
            to.display()
        ));
        self.fs
            .rename(from, to)
            .map_err(|source| {
                ProvisionError::from(ResourceError::Backup {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source,
                })
            })?;
        Ok(())
    }

    fn remove_backup(&mut self, path: &Path, elevated: bool) -> Result<()> {
        self.journal.push(Action::Remove(path.to_path_buf()));
        let cmd = command::remove_all(path, elevated);
        if self.mode.is_dry_run() {
            self.log.dry_run(&cmd.line());
            return Ok(());
        }
        if elevated {
            return self.executor.run(&cmd);
        }
        self.fs
            .remove_all(path)
            .map_err(|source| {
                ProvisionError::from(ResourceError::RemoveBackup {
                    path: path.to_path_buf(),
                    source,
                })
            })?;
        Ok(())
    }
}
