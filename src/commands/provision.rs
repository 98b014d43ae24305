//! The provisioning run: settings, registry, reminders, then every task.
use anyhow::Result;

use crate::cli::{Cli, VERSION};
use crate::config::{REMINDERS, Registry, Settings};
use crate::error::ProvisionError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::operations::SystemFileSystemOps;
use crate::tasks::{self, Context, Features, Runner};

/// Runs every task against one registry, in order.
#[derive(Debug)]
pub struct Provisioner<'a> {
    registry: &'a Registry,
    features: Features,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner for the requested features.
    #[must_use]
    pub const fn new(registry: &'a Registry, features: Features) -> Self {
        Self { registry, features }
    }

    /// Execute all tasks through `runner`; unrequested tasks are recorded as
    /// not applicable.
    ///
    /// # Errors
    ///
    /// Returns the first task failure. Later tasks are not attempted.
    pub fn run(&self, runner: &mut Runner<'_>, log: &dyn Log) -> Result<()> {
        if self.features.is_empty() {
            log.info("nothing requested: pass --bin and/or --config");
        }
        let ctx = Context::new(self.registry, self.features, log);
        for task in tasks::all_tasks() {
            tasks::execute(task.as_ref(), &ctx, runner)?;
        }
        Ok(())
    }
}

/// Print the manual follow-up list.
pub fn log_reminders(log: &dyn Log) {
    log.stage("Reminders");
    for line in REMINDERS.lines() {
        log.info(line);
    }
}

/// Run the provisioning command against the real system.
///
/// # Errors
///
/// Returns an error if the environment settings are invalid, the home
/// directory cannot be resolved, the override file cannot be loaded, or any
/// task fails.
pub fn run(cli: &Cli, log: &Logger) -> Result<()> {
    log.debug(&format!("provision {VERSION}"));

    let settings = Settings::from_env().map_err(ProvisionError::from)?;
    let executor = SystemExecutor;
    let registry = Registry::load(&executor, &settings)?;
    log.debug(&format!(
        "mode: {}, backup policy: {}",
        settings.mode, registry.backup_policy
    ));

    log_reminders(log);
    if settings.mode.is_dry_run() {
        log.info("dry run: commands are printed, not executed (PROVISION_MODE=execute to apply)");
    }

    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, log);
    let outcome = Provisioner::new(&registry, cli.features()).run(&mut runner, log);

    log.print_summary();
    outcome
}
