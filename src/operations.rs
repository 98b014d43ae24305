//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the link-with-backup logic can
//! be unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::path::Path;

/// Abstraction over the filesystem mutations the runner performs itself.
pub trait FileSystemOps: std::fmt::Debug {
    /// Returns `true` if anything is present at `path`, including a dangling
    /// symlink.
    fn exists(&self, path: &Path) -> bool;

    /// Rename `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Remove `path` whatever it is: symlink, file or directory tree.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_all(&self, path: &Path) -> std::io::Result<()>;

    /// Create a single directory; the parent must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails.
    fn create_dir(&self, path: &Path) -> std::io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_all(&self, path: &Path) -> std::io::Result<()> {
        let meta = std::fs::symlink_metadata(path)?;
        if meta.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }

    fn create_dir(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir(path)
    }
}

/// In-memory [`FileSystemOps`] for unit tests.
///
/// Tracks a set of existing paths and records every mutation in order.
///
/// ```ignore
/// let fs = MockFileSystemOps::new().with_existing("/home/u/.zshrc");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    existing: std::sync::Mutex<std::collections::BTreeSet<std::path::PathBuf>>,
    ops: std::sync::Mutex<Vec<FsOp>>,
}

/// A mutation recorded by [`MockFileSystemOps`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOp {
    /// `rename(from, to)`.
    Rename(std::path::PathBuf, std::path::PathBuf),
    /// `remove_all(path)`.
    Remove(std::path::PathBuf),
    /// `create_dir(path)`.
    CreateDir(std::path::PathBuf),
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing.
    #[must_use]
    pub fn with_existing(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.existing
            .lock()
            .expect("mock existing set poisoned")
            .insert(path.into());
        self
    }

    /// Every mutation performed so far, in call order.
    #[must_use]
    pub fn ops(&self) -> Vec<FsOp> {
        self.ops.lock().expect("mock op log poisoned").clone()
    }

    fn record(&self, op: FsOp) {
        self.ops.lock().expect("mock op log poisoned").push(op);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.existing
            .lock()
            .expect("mock existing set poisoned")
            .contains(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        let mut existing = self.existing.lock().expect("mock existing set poisoned");
        if !existing.remove(from) {
            return Err(std::io::Error::from(std::io::ErrorKind::NotFound));
        }
        existing.insert(to.to_path_buf());
        drop(existing);
        self.record(FsOp::Rename(from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> std::io::Result<()> {
        self.existing
            .lock()
            .expect("mock existing set poisoned")
            .remove(path);
        self.record(FsOp::Remove(path.to_path_buf()));
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> std::io::Result<()> {
        self.existing
            .lock()
            .expect("mock existing set poisoned")
            .insert(path.to_path_buf());
        self.record(FsOp::CreateDir(path.to_path_buf()));
        Ok(())
    }
}
