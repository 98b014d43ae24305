//! Symlink descriptor and the policy applied when a backup is already present.
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Suffix appended to a destination when it is moved aside before linking.
pub const BACKUP_SUFFIX: &str = ".back";

/// One symlink to create: `dest_dir/output -> source_dir/name`.
///
/// # Examples
///
/// ```
/// use provision::resources::link::FileLink;
/// use std::path::PathBuf;
///
/// let link = FileLink::new(".zshrc", "/home/u/dev/dotfiles", "/home/u");
/// assert_eq!(link.source(), PathBuf::from("/home/u/dev/dotfiles/.zshrc"));
/// assert_eq!(link.destination(), PathBuf::from("/home/u/.zshrc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLink {
    name: String,
    output: String,
    source_dir: PathBuf,
    dest_dir: PathBuf,
    elevated: bool,
}

impl FileLink {
    /// Link `source_dir/name` to `dest_dir/name`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        let name = name.into();
        Self {
            output: name.clone(),
            name,
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            elevated: false,
        }
    }

    /// Use a different file name at the destination. Empty keeps `name`.
    #[must_use]
    pub fn output(mut self, output: impl Into<String>) -> Self {
        let output = output.into();
        if !output.is_empty() {
            self.output = output;
        }
        self
    }

    /// Create the link (and any backup) with `sudo`.
    #[must_use]
    pub const fn elevated(mut self) -> Self {
        self.elevated = true;
        self
    }

    /// Whether link creation requires superuser privileges.
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// Absolute path the link points to.
    #[must_use]
    pub fn source(&self) -> PathBuf {
        self.source_dir.join(&self.name)
    }

    /// Absolute path of the link itself.
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        self.dest_dir.join(&self.output)
    }

    /// Sibling path the current destination is moved to before linking.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        backup_path_for(&self.destination())
    }
}

impl fmt::Display for FileLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.destination().display(),
            self.source().display()
        )
    }
}

/// `<path>.back`, in the same parent directory as `path`.
#[must_use]
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(BACKUP_SUFFIX);
    PathBuf::from(raw)
}

/// What to do when `<destination>.back` already exists from a previous run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupPolicy {
    /// Abort the run; the earlier backup is never clobbered.
    #[default]
    Fail,
    /// Delete the earlier backup and take a fresh one.
    Overwrite,
    /// Leave both paths alone and do not create the link.
    Skip,
}

impl fmt::Display for BackupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Overwrite => write!(f, "overwrite"),
            Self::Skip => write!(f, "skip"),
        }
    }
}
