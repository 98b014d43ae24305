//! Logging infrastructure for structured console output.

mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::{LOG_LEVEL_ENV, env_filter, init_subscriber, parse_filter};
pub use types::{Log, TaskEntry, TaskStatus};
