//! Top-level command orchestration.
pub mod provision;

pub use provision::{Provisioner, run};
