//! Path utilities for determining data storage locations.
//!
//! Everything daybook writes lives under one base directory: `~/.daybook/`
//! by default, or the directory named by `DAYBOOK_HOME`.

use std::path::{Path, PathBuf};

/// The base directory name for daybook data, relative to the home directory.
const DATA_DIR_NAME: &str = ".daybook";

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "DAYBOOK_HOME";

/// The `SQLite` database filename.
pub const DATABASE_FILENAME: &str = "daybook.sqlite3";

/// Directory holding one JSON file per day for the `json-dir` backend.
pub const DAYS_DIRNAME: &str = "days";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// The action log filename.
pub const ACTION_LOG_FILENAME: &str = "actions.jsonl";

/// Get the base data directory.
///
/// Returns `$DAYBOOK_HOME` when set and non-empty, otherwise `~/.daybook/`,
/// or `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(DATA_DIR_NAME)),
    }
}

/// Get the config file path inside a base directory.
#[must_use]
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_FILENAME)
}

/// Get the database path inside a storage directory.
#[must_use]
pub fn database_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join(DATABASE_FILENAME)
}

/// Get the per-day JSON directory inside a storage directory.
#[must_use]
pub fn days_dir(storage_dir: &Path) -> PathBuf {
    storage_dir.join(DAYS_DIRNAME)
}

/// Get the action log path inside a base directory.
#[must_use]
pub fn action_log_path(base_dir: &Path) -> PathBuf {
    base_dir.join(ACTION_LOG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Sets `DAYBOOK_HOME` for the lifetime of the guard.
    struct HomeEnvGuard {
        original: Option<std::ffi::OsString>,
    }

    impl HomeEnvGuard {
        fn set(value: &str) -> Self {
            let original = std::env::var_os(HOME_ENV);
            std::env::set_var(HOME_ENV, value);
            Self { original }
        }
    }

    impl Drop for HomeEnvGuard {
        fn drop(&mut self) {
            match self.original.take() {
                Some(v) => std::env::set_var(HOME_ENV, v),
                None => std::env::remove_var(HOME_ENV),
            }
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_honours_env_override() {
        let _guard = HomeEnvGuard::set("/tmp/daybook-test-home");
        assert_eq!(data_dir().unwrap(), PathBuf::from("/tmp/daybook-test-home"));
    }

    #[test]
    #[serial]
    fn test_data_dir_ignores_empty_override() {
        let _guard = HomeEnvGuard::set("");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(data_dir().unwrap(), home.join(".daybook"));
        }
    }

    #[test]
    fn test_file_paths_live_in_given_dir() {
        let base = PathBuf::from("/base");
        assert_eq!(config_path(&base), base.join("config.yaml"));
        assert_eq!(database_path(&base), base.join("daybook.sqlite3"));
        assert_eq!(days_dir(&base), base.join("days"));
        assert_eq!(action_log_path(&base), base.join("actions.jsonl"));
    }
}
