//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

use crate::day::DayKey;
use crate::error::{Error, Result};
use crate::tasks::{MemoryTaskStore, Task, TaskStore};
use crate::traits::Clock;
use chrono::NaiveDate;
use std::cell::Cell;

/// A clock that always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// A clock stuck on the given year, month and day.
    ///
    /// # Panics
    ///
    /// Panics if the date does not exist.
    #[must_use]
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"))
    }

    /// The clock's day as a key.
    #[must_use]
    pub const fn key(&self) -> DayKey {
        DayKey::from_date(self.0)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// A store whose writes fail, for exercising error paths.
///
/// Reads come from an inner in-memory store; every `save` returns an I/O
/// error and is counted.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryTaskStore,
    save_attempts: Cell<usize>,
}

impl FailingStore {
    /// Create a store with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a day's list, bypassing the failing write path.
    ///
    /// # Panics
    ///
    /// Panics if the tasks cannot be encoded.
    pub fn seed(&self, day: DayKey, tasks: &[Task]) {
        self.inner.save(day, tasks).expect("in-memory save");
    }

    /// How many times `save` has been called.
    #[must_use]
    pub fn save_attempts(&self) -> usize {
        self.save_attempts.get()
    }
}

impl TaskStore for FailingStore {
    fn list(&self, day: DayKey) -> Vec<Task> {
        self.inner.list(day)
    }

    fn save(&self, _day: DayKey, _tasks: &[Task]) -> Result<()> {
        self.save_attempts.set(self.save_attempts.get() + 1);
        Err(Error::Io(std::io::Error::other("disk full")))
    }

    fn days(&self) -> Result<Vec<DayKey>> {
        self.inner.days()
    }
}
