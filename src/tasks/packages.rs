//! Package installation through `pacman` and `yay`.
use super::processing::Step;
use super::{Context, Feature, Task};
use crate::resources::command;

/// One pacman call for `packages`, or a note when the list is empty.
///
/// An empty list would turn `pacman -Syu` into a bare system upgrade.
fn pacman_batch(packages: &[String]) -> Vec<Step> {
    if packages.is_empty() {
        return vec![Step::Note("no packages listed".to_string())];
    }
    vec![Step::Run(command::pacman_install(packages))]
}

/// Install the base utility list via pacman.
#[derive(Debug)]
pub struct InstallBaseUtilities;

impl Task for InstallBaseUtilities {
    fn name(&self) -> &'static str {
        "install base utilities for the OS"
    }

    fn feature(&self) -> Feature {
        Feature::Binaries
    }

    fn required_tool(&self) -> Option<&'static str> {
        Some("pacman")
    }

    fn plan(&self, ctx: &Context<'_>) -> Vec<Step> {
        pacman_batch(&ctx.registry.base_utils)
    }
}

/// Install the base application list via pacman.
#[derive(Debug)]
pub struct InstallBaseApps;

impl Task for InstallBaseApps {
    fn name(&self) -> &'static str {
        "install base apps for the OS"
    }

    fn feature(&self) -> Feature {
        Feature::Binaries
    }

    fn required_tool(&self) -> Option<&'static str> {
        Some("pacman")
    }

    fn plan(&self, ctx: &Context<'_>) -> Vec<Step> {
        pacman_batch(&ctx.registry.base_apps)
    }
}

/// Build every AUR package with yay, one call each, in list order.
#[derive(Debug)]
pub struct InstallAurPackages;

impl Task for InstallAurPackages {
    fn name(&self) -> &'static str {
        "install AUR packages"
    }

    fn feature(&self) -> Feature {
        Feature::Binaries
    }

    fn required_tool(&self) -> Option<&'static str> {
        Some("yay")
    }

    fn plan(&self, ctx: &Context<'_>) -> Vec<Step> {
        ctx.registry
            .aur_apps
            .iter()
            .flat_map(|pkg| {
                [
                    Step::Note(format!(
                        "install from AUR {} -> package id: {}",
                        pkg.name, pkg.index
                    )),
                    Step::Run(command::aur_install(&pkg.name)),
                ]
            })
            .collect()
    }
}
