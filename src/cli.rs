//! Command-line flags.
use clap::Parser;

use crate::tasks::Features;

/// Build version: `PROVISION_VERSION` from `build.rs`, else the crate version.
pub const VERSION: &str = match option_env!("PROVISION_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Provision an Arch machine: packages, dotfiles and configuration links.
///
/// Commands are only printed unless `PROVISION_MODE=execute` is set.
#[derive(Parser, Debug, Clone, Copy, PartialEq, Eq)]
#[command(name = "provision", version = VERSION)]
pub struct Cli {
    /// Install base packages, AUR packages and oh-my-zsh
    #[arg(long)]
    pub bin: bool,

    /// Clone the dotfiles repository and link configuration files
    #[arg(long)]
    pub config: bool,
}

impl Cli {
    /// The features selected by the flags.
    #[must_use]
    pub const fn features(&self) -> Features {
        Features {
            binaries: self.bin,
            configuration: self.config,
        }
    }
}
