//! Debug action logging.
//!
//! When `debug_logging` is enabled in the config, every add, toggle, and
//! delete (applied, rejected, or ignored) is appended as a JSONL line to
//! `actions.jsonl` in the data directory.

use crate::config::Config;
use crate::day::DayKey;
use crate::paths;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only JSONL log of user actions.
#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    /// Log to the given file.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// The action log for a base directory, if the config enables it.
    #[must_use]
    pub fn from_config(config: &Config, base_dir: &Path) -> Option<Self> {
        config.debug_logging.then(|| Self::new(paths::action_log_path(base_dir)))
    }

    /// Get the log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one action.
    ///
    /// Errors are ignored: a broken log never blocks an action.
    pub fn record(&self, action: &str, day: DayKey, detail: &serde_json::Value) {
        if let Some(parent) = self.path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        let entry = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "action": action,
            "day": day.to_string(),
            "detail": detail,
        });

        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) else {
            return;
        };

        let _ = writeln!(file, "{entry}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn read_log_lines(path: &Path) -> Vec<serde_json::Value> {
        if !path.exists() {
            return vec![];
        }
        let content = std::fs::read_to_string(path).unwrap();
        content
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn day() -> DayKey {
        DayKey::parse("2026-10-19").unwrap()
    }

    #[test]
    fn test_record_appends_lines() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path().join("nested/actions.jsonl"));

        log.record("add", day(), &json!({"text": "buy milk", "outcome": "applied"}));
        log.record("toggle", day(), &json!({"index": 0, "outcome": "applied"}));

        let lines = read_log_lines(log.path());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["action"], "add");
        assert_eq!(lines[0]["day"], "2026-10-19");
        assert_eq!(lines[0]["detail"]["text"], "buy milk");
        assert_eq!(lines[1]["detail"]["index"], 0);
        let ts = lines[0]["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn test_from_config_respects_flag() {
        let dir = TempDir::new().unwrap();
        assert!(ActionLog::from_config(&Config::default(), dir.path()).is_none());

        let config = Config { debug_logging: true, ..Default::default() };
        let log = ActionLog::from_config(&config, dir.path()).unwrap();
        assert_eq!(log.path(), paths::action_log_path(dir.path()));
    }

    #[test]
    fn test_record_to_unwritable_path_is_silent() {
        let dir = TempDir::new().unwrap();
        // The log path is a directory, so opening it for append fails
        let log = ActionLog::new(dir.path());
        log.record("add", day(), &json!({}));
        assert!(dir.path().is_dir());
    }
}
