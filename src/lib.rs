//! # `daybook`
//!
//! A to-do list for each calendar day. Tasks are grouped under a day key
//! (`YYYY-MM-DD`); one day is selected at a time and every add, toggle or
//! delete saves that day's whole list and re-renders it.

pub mod action_log;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod day;
pub mod error;
pub mod paths;
pub mod planner;
pub mod render;
pub mod tasks;
pub mod templates;
pub mod testing;
pub mod traits;

pub use day::DayKey;
pub use error::{Error, Result};
pub use planner::{Outcome, Planner};
pub use tasks::{Task, TaskStore};
pub use traits::{Clock, SystemClock};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
