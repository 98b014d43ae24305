//! Process settings read from the environment.
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::exec::ExecMode;

/// Selects [`ExecMode`]: `dry-run` (default) or `execute`, case-insensitive.
/// An empty value is treated as unset.
pub const MODE_ENV: &str = "PROVISION_MODE";

/// Optional path to a TOML file of [`RegistryOverrides`](super::RegistryOverrides).
pub const CONFIG_ENV: &str = "PROVISION_CONFIG";

/// Settings that are not part of the registry itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Whether commands are shown or run.
    pub mode: ExecMode,
    /// Override file to merge over the built-in registry.
    pub overrides: Option<PathBuf>,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] for an unknown `PROVISION_MODE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] for an unknown `PROVISION_MODE`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = lookup(MODE_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<ExecMode>())
            .transpose()?
            .unwrap_or_default();
        let overrides = lookup(CONFIG_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self { mode, overrides })
    }
}
