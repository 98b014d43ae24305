//! Configuration links from the clone and the helper bin directory.
use anyhow::Result;

use super::processing::{Runner, Step};
use super::{Context, Feature, Task};
use crate::config::Registry;
use crate::resources::{BackupPolicy, FileLink};

/// A labelled batch of links applied together, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeGroup {
    label: String,
    entries: Vec<FileLink>,
}

impl ScopeGroup {
    /// Create a group.
    #[must_use]
    pub fn new(label: impl Into<String>, entries: Vec<FileLink>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Links in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[FileLink] {
        &self.entries
    }

    /// The label note followed by one link step per entry.
    #[must_use]
    pub fn steps(&self, backup: BackupPolicy) -> Vec<Step> {
        std::iter::once(Step::Note(format!(
            "load configuration for: {}",
            self.label
        )))
        .chain(self.entries.iter().map(|link| Step::Link {
            link: link.clone(),
            backup,
        }))
        .collect()
    }

    /// Back up and link every entry through `runner`.
    ///
    /// # Errors
    ///
    /// Returns the first backup or link failure.
    pub fn run(&self, runner: &mut Runner<'_>, backup: BackupPolicy) -> Result<()> {
        runner.apply_all(&self.steps(backup))
    }
}

/// Every scope group, in the order they are applied.
#[must_use]
pub fn scope_groups(registry: &Registry) -> Vec<ScopeGroup> {
    let home = &registry.home;
    let dotfiles = &registry.clone_dir;
    let home_link = |name: &str| FileLink::new(name, dotfiles, home);

    vec![
        ScopeGroup::new(
            "finder",
            vec![FileLink::new("finder", registry.scripts_dir(), &registry.usr_bin).elevated()],
        ),
        ScopeGroup::new("tmux", vec![home_link(".tmux"), home_link(".tmux.conf")]),
        ScopeGroup::new(
            "shell configuration (bash, zsh)",
            vec![home_link(".bashrc.d"), home_link(".zshrc")],
        ),
        ScopeGroup::new("applications config", vec![home_link(".vimrc")]),
        ScopeGroup::new(
            "alias helix editor to hx",
            vec![
                FileLink::new("helix", &registry.system_bin, &registry.usr_bin)
                    .output("hx")
                    .elevated(),
            ],
        ),
    ]
}

/// Link configuration files from the clone into place.
#[derive(Debug)]
pub struct ImportFiles;

impl Task for ImportFiles {
    fn name(&self) -> &'static str {
        "link configuration files"
    }

    fn feature(&self) -> Feature {
        Feature::Configuration
    }

    fn plan(&self, ctx: &Context<'_>) -> Vec<Step> {
        scope_groups(ctx.registry)
            .iter()
            .flat_map(|group| group.steps(ctx.registry.backup_policy))
            .collect()
    }
}
