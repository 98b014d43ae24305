//! Home directory resolution through the login shell.
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::exec::Executor;
use crate::resources::ShellCommand;

/// Expand `$HOME` through `sh` and return it with trailing whitespace trimmed.
///
/// Always runs, regardless of execution mode: it only reads.
///
/// # Errors
///
/// Returns [`ConfigError::HomeResolution`] if the shell invocation fails and
/// [`ConfigError::EmptyHome`] if the variable expands to nothing.
pub fn get_home_directory(executor: &dyn Executor) -> Result<PathBuf, ConfigError> {
    let result = executor
        .capture(&ShellCommand::raw("echo $HOME"))
        .map_err(|e| ConfigError::HomeResolution(format!("{e:#}")))?;
    let home = result.stdout.trim_end();
    if home.is_empty() {
        return Err(ConfigError::EmptyHome);
    }
    Ok(PathBuf::from(home))
}
