//! Named, ordered tasks that plan provisioning steps.
mod context;
pub mod dotfiles;
pub mod packages;
mod processing;
pub mod shell;
pub mod symlinks;

pub use context::{Context, Feature, Features};
pub use processing::{Action, Runner, Step};

use anyhow::{Context as _, Result};

use crate::error::{ExecError, ProvisionError};
use crate::logging::TaskStatus;

/// A named unit of provisioning work.
///
/// Tasks only describe what to do; [`execute`] hands the plan to a
/// [`Runner`], which decides whether it is printed or performed.
pub trait Task {
    /// Human-readable task name, used as the stage header.
    fn name(&self) -> &'static str;

    /// The flag that enables this task.
    fn feature(&self) -> Feature;

    /// A program that must be on `PATH` before the plan runs for real.
    fn required_tool(&self) -> Option<&'static str> {
        None
    }

    /// Whether this task was requested.
    fn should_run(&self, ctx: &Context<'_>) -> bool {
        ctx.features.enabled(self.feature())
    }

    /// The steps this task wants applied, in order.
    fn plan(&self, ctx: &Context<'_>) -> Vec<Step>;
}

/// Every task, in the order a full run applies them.
///
/// Binaries come first so `git` exists before the dotfiles clone.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(packages::InstallBaseUtilities),
        Box::new(packages::InstallBaseApps),
        Box::new(packages::InstallAurPackages),
        Box::new(shell::InstallShellFramework),
        Box::new(dotfiles::LoadDotfiles),
        Box::new(symlinks::ImportFiles),
    ]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns an error if a required tool is missing (execute mode) or any
/// step of the plan fails. The task is recorded as failed first.
pub fn execute(task: &dyn Task, ctx: &Context<'_>, runner: &mut Runner<'_>) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not requested)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    let outcome = preflight(task, runner).and_then(|()| runner.apply_all(&task.plan(ctx)));
    match outcome {
        Ok(()) => {
            let status = if runner.mode().is_dry_run() {
                TaskStatus::DryRun
            } else {
                TaskStatus::Ok
            };
            ctx.log.record_task(task.name(), status, None);
            Ok(())
        }
        Err(e) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            Err(e).with_context(|| format!("task failed: {}", task.name()))
        }
    }
}

fn preflight(task: &dyn Task, runner: &Runner<'_>) -> Result<()> {
    match task.required_tool() {
        Some(tool) if !runner.mode().is_dry_run() && !runner.executor().which(tool) => {
            Err(ProvisionError::from(ExecError::MissingTool(tool.to_string())).into())
        }
        _ => Ok(()),
    }
}
