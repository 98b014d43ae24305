//! Personal Arch Linux provisioning.
//!
//! Installs the package lists with `pacman` and `yay`, bootstraps oh-my-zsh,
//! shallow-clones the dotfiles repository and links configuration files into
//! place, moving anything already there to `<file>.back`.
//!
//! The crate is organised in layers:
//!
//! - **[`config`]**: the immutable [`config::Registry`] built at startup
//! - **[`resources`]**: shell command builders and file-link descriptors
//! - **[`tasks`]**: ordered tasks that plan [`tasks::Step`]s, and the
//!   [`tasks::Runner`] that prints or performs them
//! - **[`commands`]**: top-level orchestration behind the CLI flags
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod resources;
pub mod tasks;
