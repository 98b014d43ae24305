use crate::config::Registry;
use crate::logging::Log;

/// Which halves of the provisioning run were requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// `--bin`: packages, AUR packages and the shell framework.
    pub binaries: bool,
    /// `--config`: dotfiles clone and symlinks.
    pub configuration: bool,
}

impl Features {
    /// Whether `feature` was requested.
    #[must_use]
    pub const fn enabled(self, feature: Feature) -> bool {
        match feature {
            Feature::Binaries => self.binaries,
            Feature::Configuration => self.configuration,
        }
    }

    /// `true` when neither flag was given.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.binaries && !self.configuration
    }
}

/// The flag a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Enabled by `--bin`.
    Binaries,
    /// Enabled by `--config`.
    Configuration,
}

/// Shared context for task execution.
pub struct Context<'a> {
    /// The configuration registry, built once at startup.
    pub registry: &'a Registry,
    /// Requested features.
    pub features: Features,
    /// Logger for output and task recording.
    pub log: &'a dyn Log,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("registry", &"<Registry>")
            .field("features", &self.features)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> Context<'a> {
    /// Creates a new context for task execution.
    #[must_use]
    pub const fn new(registry: &'a Registry, features: Features, log: &'a dyn Log) -> Self {
        Self {
            registry,
            features,
            log,
        }
    }
}
