//! Core traits for testability and abstraction.

use chrono::{Local, NaiveDate};

/// Trait for reading the current calendar date.
///
/// "Today" decides both the initial selection and the "Today" label, so it is
/// kept behind a trait that tests can pin to a fixed date.
pub trait Clock {
    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// The real clock, using the local timezone of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
