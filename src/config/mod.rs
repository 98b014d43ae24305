//! The configuration registry: what to install and where things live.
//!
//! A [`Registry`] is built once at process entry (one shell round-trip for
//! `$HOME`, then an optional TOML override file) and borrowed by every task.
pub mod env;
pub mod home;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::error::ProvisionError;
use crate::exec::Executor;
use crate::resources::BackupPolicy;
use crate::resources::command::OH_MY_ZSH_INSTALLER;

pub use env::Settings;
pub use toml_loader::RegistryOverrides;

/// Packages every machine needs before anything else.
pub const BASE_UTILS: &[&str] = &[
    "git-lfs", "zsh", "unzip", "unrar", "tree", "coreutils", "gettext", "ntfs-3g", "xz",
];

/// Desktop and CLI applications from the official repositories.
pub const BASE_APPS: &[&str] = &[
    "z",
    "tmux",
    "htop",
    "neovim",
    "vim",
    "pandoc",
    "pcmanfm",
    "mousepad",
    "celluloid",
    "guake",
    "imagemagick",
    "synapse",
    "vlc",
    "bat",
    "jq",
    "fzf",
    "ripgrep",
    "virt-manager",
    "gimp",
    "pinta",
    "clementine",
    "alacritty",
    "chromium",
    "docker",
    "kubectl",
    "k9s",
    "kubens",
    "glow",
    "helm",
    "helix",
];

/// AUR packages and their informational ordinal.
pub const AUR_APPS: &[(&str, u32)] = &[
    ("sakura", 1),
    ("brave", 1),
    ("kazam", 1),
    ("mcomix", 1),
    ("amber-search-git", 1),
    ("protonvpn", 2),
    ("sublime-text-4", 1),
    ("redshift", 1),
];

/// Repository cloned by `--config`.
pub const DOTFILES_REPO: &str = "https://github.com/dhoko/dotfiles.git";

/// Where linked executables go.
pub const USR_BIN: &str = "/usr/local/bin";

/// Where distribution packages put executables.
pub const SYSTEM_BIN: &str = "/usr/bin";

/// Things the tool does not handle, printed at the start of every run.
pub const REMINDERS: &str = "\
Missing packages:
    - nodejs
    - nvm
    From PIP:
        - litecli
        - pyenv
        - pipenv
    From NPM:
        - yarn
        - npm-check
Credentials:
    - git config from home dir (not uptodate inside github)
    - git config proton (~.gitconfig.*)
    - k8s config (~/.kube)
    - ssh keys
    - gpg keys
    - gcloud (~/.config/gcloud)
    - kubectl
    - protonvpn
    - Google Chrome/Brave/Firefox
    - docker (~/.docker)
LSP definitions:
    - typescript
    - json
    - python
    - golang
    - yaml";

fn default_index() -> u32 {
    1
}

/// An AUR package; `index` is logged alongside the name and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AurPackage {
    /// Package name.
    pub name: String,
    /// Informational ordinal.
    #[serde(default = "default_index")]
    pub index: u32,
}

impl AurPackage {
    /// Create an AUR entry.
    #[must_use]
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Immutable provisioning configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    /// Resolved home directory.
    pub home: PathBuf,
    /// First pacman batch.
    pub base_utils: Vec<String>,
    /// Second pacman batch.
    pub base_apps: Vec<String>,
    /// One yay call each, in order.
    pub aur_apps: Vec<AurPackage>,
    /// Dotfiles repository URL.
    pub dotfiles_repo: String,
    /// Clone target, `<home>/dev/dotfiles` by default.
    pub clone_dir: PathBuf,
    /// Destination for linked executables.
    pub usr_bin: PathBuf,
    /// Directory distribution binaries are linked from.
    pub system_bin: PathBuf,
    /// Installer piped to `sh` for the shell framework.
    pub shell_framework_installer: String,
    /// Conflict rule for pre-existing `.back` files.
    pub backup_policy: BackupPolicy,
}

impl Registry {
    /// The built-in registry for `home`.
    #[must_use]
    pub fn defaults(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            clone_dir: home.join("dev").join("dotfiles"),
            home,
            base_utils: BASE_UTILS.iter().map(ToString::to_string).collect(),
            base_apps: BASE_APPS.iter().map(ToString::to_string).collect(),
            aur_apps: AUR_APPS
                .iter()
                .map(|(name, index)| AurPackage::new(*name, *index))
                .collect(),
            dotfiles_repo: DOTFILES_REPO.to_string(),
            usr_bin: PathBuf::from(USR_BIN),
            system_bin: PathBuf::from(SYSTEM_BIN),
            shell_framework_installer: OH_MY_ZSH_INSTALLER.to_string(),
            backup_policy: BackupPolicy::default(),
        }
    }

    /// Resolve `$HOME`, start from the defaults and apply the override file
    /// named in `settings`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if home resolution fails or the override file cannot
    /// be read or parsed.
    pub fn load(executor: &dyn Executor, settings: &Settings) -> Result<Self> {
        let home = home::get_home_directory(executor).map_err(ProvisionError::from)?;
        let mut registry = Self::defaults(home);
        if let Some(path) = &settings.overrides {
            let overrides = toml_loader::load_overrides(path).map_err(ProvisionError::from)?;
            registry.apply(overrides);
        }
        Ok(registry)
    }

    /// Replace every field present in `overrides`.
    ///
    /// Relative `clone_dir` values are taken from the home directory.
    pub fn apply(&mut self, overrides: RegistryOverrides) {
        let RegistryOverrides {
            base_utils,
            base_apps,
            aur_apps,
            dotfiles_repo,
            clone_dir,
            usr_bin,
            shell_framework_installer,
            backup_policy,
        } = overrides;

        if let Some(v) = base_utils {
            self.base_utils = v;
        }
        if let Some(v) = base_apps {
            self.base_apps = v;
        }
        if let Some(v) = aur_apps {
            self.aur_apps = v;
        }
        if let Some(v) = dotfiles_repo {
            self.dotfiles_repo = v;
        }
        if let Some(v) = clone_dir {
            self.clone_dir = self.home.join(v);
        }
        if let Some(v) = usr_bin {
            self.usr_bin = v;
        }
        if let Some(v) = shell_framework_installer {
            self.shell_framework_installer = v;
        }
        if let Some(v) = backup_policy {
            self.backup_policy = v;
        }
    }

    /// `scripts/` inside the clone.
    #[must_use]
    pub fn scripts_dir(&self) -> PathBuf {
        self.clone_dir.join("scripts")
    }

    /// Parent of the clone directory, created before cloning.
    #[must_use]
    pub fn clone_parent(&self) -> Option<&Path> {
        self.clone_dir.parent()
    }
}
