//! oh-my-zsh bootstrap.
use super::processing::Step;
use super::{Context, Feature, Task};
use crate::resources::command;

/// Install oh-my-zsh by piping its installer into `sh`.
#[derive(Debug)]
pub struct InstallShellFramework;

impl Task for InstallShellFramework {
    fn name(&self) -> &'static str {
        "add oh-my-zsh"
    }

    fn feature(&self) -> Feature {
        Feature::Binaries
    }

    fn required_tool(&self) -> Option<&'static str> {
        Some("curl")
    }

    fn plan(&self, ctx: &Context<'_>) -> Vec<Step> {
        vec![Step::Run(command::remote_bootstrap(
            &ctx.registry.shell_framework_installer,
        ))]
    }
}
