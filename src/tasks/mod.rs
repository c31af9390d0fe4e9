//! Per-day task lists.
//!
//! This module provides:
//! - The [`Task`] record (text plus a completed flag)
//! - The [`TaskStore`] trait: read a day's list, replace a day's list
//! - `SQLite`, JSON-directory and in-memory backends
//!
//! # Example
//!
//! ```no_run
//! use daybook::day::DayKey;
//! use daybook::tasks::{SqliteTaskStore, Task, TaskStore};
//!
//! let store = SqliteTaskStore::new("/tmp/daybook.sqlite3").unwrap();
//! let day = DayKey::parse("2026-10-19").unwrap();
//!
//! let mut tasks = store.list(day);
//! tasks.extend(Task::new("Water the plants"));
//! store.save(day, &tasks).unwrap();
//! ```

pub mod models;
pub mod store;

pub use models::{completed_count, Task};
pub use store::{JsonDirTaskStore, MemoryTaskStore, SqliteTaskStore, TaskStore};
