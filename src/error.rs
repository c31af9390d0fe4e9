//! Error types for `daybook`.

use crate::day::InvalidDayKey;

/// Errors that can occur while reading, changing, or showing a day's tasks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON encoding or decoding error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// A string could not be read as a date.
    #[error(transparent)]
    InvalidDayKey(#[from] InvalidDayKey),

    /// The home directory could not be determined.
    #[error("Could not determine the home directory; set DAYBOOK_HOME")]
    NoHomeDir,
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
