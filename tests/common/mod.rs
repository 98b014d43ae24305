// Shared helpers for integration tests.
//
// A recording executor that never spawns anything and a temporary home
// directory with an optional override file, so each test runs the real
// runner against an isolated filesystem.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use provision::config::env::{CONFIG_ENV, MODE_ENV};
use provision::config::{Registry, Settings};
use provision::error::{ExecError, ProvisionError};
use provision::exec::{ExecResult, Executor};
use provision::resources::ShellCommand;

/// Executor that records every command line instead of running it.
///
/// `capture` only answers `echo $HOME`; `which` finds every tool.
#[derive(Debug)]
pub struct RecordingExecutor {
    home: String,
    fail_on: Option<String>,
    commands: RefCell<Vec<String>>,
}

impl RecordingExecutor {
    /// An executor whose shell reports `home` as `$HOME`.
    pub fn new(home: &Path) -> Self {
        Self {
            home: home.display().to_string(),
            fail_on: None,
            commands: RefCell::new(Vec::new()),
        }
    }

    /// Fail any command whose line contains `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    /// Command lines passed to `run`, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, command: &ShellCommand) -> anyhow::Result<()> {
        let line = command.line();
        self.commands.borrow_mut().push(line.clone());
        if let Some(needle) = &self.fail_on
            && line.contains(needle.as_str())
        {
            return Err(ProvisionError::from(ExecError::Failed {
                command: line,
                code: 1,
            })
            .into());
        }
        Ok(())
    }

    fn capture(&self, command: &ShellCommand) -> anyhow::Result<ExecResult> {
        anyhow::ensure!(
            command.line() == "echo $HOME",
            "unexpected capture: {command}"
        );
        Ok(ExecResult {
            stdout: format!("{}\n", self.home),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

/// A temporary home directory plus an override file inside it.
pub struct TestHome {
    /// Backing directory, deleted on drop.
    pub dir: tempfile::TempDir,
}

impl TestHome {
    /// Create an empty home with a `bin/` directory standing in for
    /// `/usr/local/bin`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp home");
        std::fs::create_dir(dir.path().join("bin")).expect("create bin dir");
        Self { dir }
    }

    /// The home directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where linked binaries go in these tests.
    pub fn bin(&self) -> PathBuf {
        self.path().join("bin")
    }

    /// Where the dotfiles clone lands.
    pub fn clone_dir(&self) -> PathBuf {
        self.path().join("dev").join("dotfiles")
    }

    /// Create a regular file at `relative` with `content`.
    pub fn touch(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    /// Write `overrides.toml` with small package lists and `bin/` as the
    /// link directory, followed by `extra` lines.
    pub fn write_overrides(&self, extra: &str) -> PathBuf {
        let path = self.path().join("overrides.toml");
        let content = format!(
            "base_utils = [\"git-lfs\", \"zsh\"]\n\
             base_apps = [\"tmux\", \"htop\"]\n\
             aur_apps = [{{ name = \"sakura\" }}, {{ name = \"protonvpn\", index = 2 }}]\n\
             usr_bin = \"{}\"\n\
             {extra}\n",
            self.bin().display()
        );
        std::fs::write(&path, content).expect("write overrides.toml");
        path
    }

    /// Settings for `mode`, pointing at the override file.
    pub fn settings(&self, mode: &str, overrides: &Path) -> Settings {
        let overrides = overrides.display().to_string();
        let mode = mode.to_string();
        Settings::from_lookup(move |key| match key {
            k if k == MODE_ENV => Some(mode.clone()),
            k if k == CONFIG_ENV => Some(overrides.clone()),
            _ => None,
        })
        .expect("valid settings")
    }

    /// Build the registry the way `main` does, through the executor.
    pub fn registry(&self, executor: &RecordingExecutor, settings: &Settings) -> Registry {
        Registry::load(executor, settings).expect("load registry")
    }
}
