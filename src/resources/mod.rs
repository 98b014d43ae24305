//! Value types describing what the provisioner changes on the machine.
//!
//! Nothing in this module performs I/O: [`command`] renders shell lines and
//! [`link`] computes symlink paths. Interpretation lives in
//! [`Runner`](crate::tasks::Runner).
pub mod command;
pub mod link;

pub use command::ShellCommand;
pub use link::{BackupPolicy, FileLink};
