//! Day keys: the calendar dates that partition task lists.
//!
//! A [`DayKey`] is always a valid calendar date. Its string form is
//! `YYYY-MM-DD`, which is also the key used by every storage backend.

use crate::traits::Clock;
use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Label shown instead of the formatted date for the current day.
pub const TODAY_LABEL: &str = "Today";

/// A calendar day used as the lookup key for a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wrap a calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's key according to the given clock.
    #[must_use]
    pub fn today(clock: &dyn Clock) -> Self {
        Self(clock.today())
    }

    /// The underlying calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Parse an absolute date such as `2026-10-19` or `2026/10/19`.
    ///
    /// Month and day may be written with one or two digits; the key is
    /// normalized to `YYYY-MM-DD` either way.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDayKey`] if the input is not a real calendar date in
    /// one of those forms.
    pub fn parse(input: &str) -> Result<Self, InvalidDayKey> {
        let invalid = || InvalidDayKey(input.to_string());
        let trimmed = input.trim();

        let parts: Vec<&str> = trimmed.split(['-', '/']).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(invalid());
        };

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) {
            return Err(invalid());
        }
        if month.len() > 2 || day.len() > 2 || !all_digits(month) || !all_digits(day) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day).map(Self).ok_or_else(invalid)
    }

    /// Resolve a date-like string, including `today`, `yesterday` and
    /// `tomorrow`, against the given clock.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDayKey`] if the input is neither a relative word nor
    /// an absolute date accepted by [`DayKey::parse`].
    pub fn resolve(input: &str, clock: &dyn Clock) -> Result<Self, InvalidDayKey> {
        let today = clock.today();
        match input.trim().to_lowercase().as_str() {
            "today" => Ok(Self(today)),
            "yesterday" => Ok(Self(today - Duration::days(1))),
            "tomorrow" => Ok(Self(today + Duration::days(1))),
            _ => Self::parse(input),
        }
    }

    /// Whether the input is one of the words [`DayKey::resolve`] reads
    /// relative to today.
    #[must_use]
    pub fn is_relative(input: &str) -> bool {
        matches!(input.trim().to_lowercase().as_str(), "today" | "yesterday" | "tomorrow")
    }

    /// Human-readable label: `Today` for the current day, otherwise an en-US
    /// short form like `Mon, Oct 19, 2026`.
    #[must_use]
    pub fn label(self, today: Self) -> String {
        if self == today {
            return TODAY_LABEL.to_string();
        }
        self.0.format("%a, %b %-d, %Y").to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = InvalidDayKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error when a string cannot be read as a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDayKey(pub String);

impl fmt::Display for InvalidDayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid date: '{}' (expected YYYY-MM-DD, today, yesterday or tomorrow)",
            self.0
        )
    }
}

impl std::error::Error for InvalidDayKey {}
