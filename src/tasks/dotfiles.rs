//! Shallow clone of the dotfiles repository.
use anyhow::Result;

use super::processing::{Runner, Step};
use super::{Context, Feature, Task};
use crate::config::Registry;
use crate::resources::command;

/// Steps that fetch the dotfiles repository.
///
/// The clone directory's parent is created (one level) when missing; the clone
/// directory itself is not checked, so a rerun leaves that to `git`.
#[must_use]
pub fn dotfiles_steps(registry: &Registry) -> Vec<Step> {
    let mut steps = Vec::with_capacity(2);
    if let Some(parent) = registry.clone_parent() {
        steps.push(Step::EnsureDir(parent.to_path_buf()));
    }
    steps.push(Step::Run(command::git_clone(
        &registry.dotfiles_repo,
        &registry.clone_dir,
    )));
    steps
}

/// Fetch the dotfiles repository through `runner`.
///
/// # Errors
///
/// Returns an error if creating the parent directory or the clone fails.
pub fn load_dotfiles(registry: &Registry, runner: &mut Runner<'_>) -> Result<()> {
    runner.apply_all(&dotfiles_steps(registry))
}

/// Shallow-clone the dotfiles repository.
#[derive(Debug)]
pub struct LoadDotfiles;

impl Task for LoadDotfiles {
    fn name(&self) -> &'static str {
        "clone dotfiles"
    }

    fn feature(&self) -> Feature {
        Feature::Configuration
    }

    fn required_tool(&self) -> Option<&'static str> {
        Some("git")
    }

    fn plan(&self, ctx: &Context<'_>) -> Vec<Step> {
        dotfiles_steps(ctx.registry)
    }
}
