//! TOML override file for the built-in registry.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::AurPackage;
use crate::error::ConfigError;
use crate::resources::BackupPolicy;

/// Fields of [`Registry`](super::Registry) that an override file may replace.
///
/// Every field is optional; absent fields keep their built-in value.
///
/// ```toml
/// base_utils = ["git-lfs", "zsh"]
/// aur_apps = [{ name = "sakura" }, { name = "protonvpn", index = 2 }]
/// dotfiles_repo = "https://example.com/me/dotfiles.git"
/// clone_dir = "src/dotfiles"   # relative paths are taken from $HOME
/// backup_policy = "overwrite"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryOverrides {
    /// Replacement for the base utility list.
    pub base_utils: Option<Vec<String>>,
    /// Replacement for the base application list.
    pub base_apps: Option<Vec<String>>,
    /// Replacement for the AUR list.
    pub aur_apps: Option<Vec<AurPackage>>,
    /// Replacement dotfiles repository URL.
    pub dotfiles_repo: Option<String>,
    /// Replacement clone directory.
    pub clone_dir: Option<PathBuf>,
    /// Replacement directory for linked binaries.
    pub usr_bin: Option<PathBuf>,
    /// Replacement installer URL for the shell framework bootstrap.
    pub shell_framework_installer: Option<String>,
    /// What to do when a `.back` file is already present.
    pub backup_policy: Option<BackupPolicy>,
}

/// Parse overrides from TOML text. `origin` is only used in error messages.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] for malformed TOML or unknown keys.
pub fn parse_overrides(content: &str, origin: &Path) -> Result<RegistryOverrides, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        path: origin.to_path_buf(),
        message: e.message().to_string(),
    })
}

/// Read and parse an override file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, or the errors of
/// [`parse_overrides`].
pub fn load_overrides(path: &Path) -> Result<RegistryOverrides, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_overrides(&content, path)
}
