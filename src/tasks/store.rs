//! Task store trait and its backends.
//!
//! Every backend keeps one entry per day: the full task list for that day,
//! encoded as a JSON array of `{"text", "completed"}` objects. Writes always
//! replace the whole list.

use crate::day::DayKey;
use crate::error::Result;
use crate::tasks::models::Task;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Trait for per-day task list storage.
///
/// Reads never fail: a missing, unreadable, or malformed entry reads as an
/// empty list so the day can always be shown. Writes report errors.
pub trait TaskStore {
    /// The stored tasks for a day, in insertion order.
    fn list(&self, day: DayKey) -> Vec<Task>;

    /// Replace the stored list for a day.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, day: DayKey, tasks: &[Task]) -> Result<()>;

    /// The days that have a stored entry, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be enumerated.
    fn days(&self) -> Result<Vec<DayKey>>;
}

/// Decode a stored entry, degrading to an empty list on any problem.
fn decode_tasks(day: DayKey, raw: Result<Option<String>>) -> Vec<Task> {
    match raw {
        Ok(None) => Vec::new(),
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed task list for {day}: {e}");
            Vec::new()
        }),
        Err(e) => {
            log::warn!("Could not read task list for {day}: {e}");
            Vec::new()
        }
    }
}

/// Parse stored keys into days, skipping anything that is not a date.
///
/// Only canonical `YYYY-MM-DD` keys count: `list` looks days up by that form,
/// so an entry stored as `2026/10/19` or `2026-1-5` could never be read back.
fn parse_day_keys<I: IntoIterator<Item = String>>(keys: I) -> Vec<DayKey> {
    let mut days: Vec<DayKey> = keys
        .into_iter()
        .filter_map(|k| match DayKey::parse(&k) {
            Ok(day) if day.to_string() == k => Some(day),
            Ok(day) => {
                log::warn!("Skipping stored entry '{k}': not stored under its key {day}");
                None
            }
            Err(e) => {
                log::warn!("Skipping stored entry with {e}");
                None
            }
        })
        .collect();
    days.sort();
    days.dedup();
    days
}

/// SQLite-based task store.
///
/// Each operation opens a new connection to the database file.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Create a new `SQLite` task store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            -- One row per day; tasks_json holds the whole ordered list
            CREATE TABLE IF NOT EXISTS day_tasks (
                day_key TEXT PRIMARY KEY,
                tasks_json TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;

        Ok(())
    }

    fn read_raw(&self, day: DayKey) -> Result<Option<String>> {
        let conn = self.open()?;
        let raw = conn
            .query_row(
                "SELECT tasks_json FROM day_tasks WHERE day_key = ?1",
                params![day.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(raw)
    }

    /// Store a raw value for a key, bypassing encoding.
    ///
    /// Lets callers (and tests) reproduce entries written by other tools.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be written.
    pub fn put_raw(&self, key: &str, raw: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO day_tasks (day_key, tasks_json, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(day_key) DO UPDATE SET
                tasks_json = excluded.tasks_json,
                updated_at = excluded.updated_at",
            params![key, raw],
        )?;
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore {
    fn list(&self, day: DayKey) -> Vec<Task> {
        decode_tasks(day, self.read_raw(day))
    }

    fn save(&self, day: DayKey, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        self.put_raw(&day.to_string(), &json)?;
        log::debug!("Saved {} task(s) for {day} to {}", tasks.len(), self.db_path.display());
        Ok(())
    }

    fn days(&self) -> Result<Vec<DayKey>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT day_key FROM day_tasks")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(parse_day_keys(keys))
    }
}

/// Directory-based task store: one `<YYYY-MM-DD>.json` file per day.
#[derive(Debug, Clone)]
pub struct JsonDirTaskStore {
    dir: PathBuf,
}

impl JsonDirTaskStore {
    /// File extension of day files.
    const EXTENSION: &'static str = "json";

    /// Create a store rooted at the given directory.
    ///
    /// The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Get the root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding a day's list.
    #[must_use]
    pub fn day_path(&self, day: DayKey) -> PathBuf {
        self.dir.join(format!("{day}.{}", Self::EXTENSION))
    }

    fn read_raw(&self, day: DayKey) -> Result<Option<String>> {
        match fs::read_to_string(self.day_path(day)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl TaskStore for JsonDirTaskStore {
    fn list(&self, day: DayKey) -> Vec<Task> {
        decode_tasks(day, self.read_raw(day))
    }

    fn save(&self, day: DayKey, tasks: &[Task]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(tasks)?;

        // Write beside the target and rename so a day file is never half-written.
        let path = self.day_path(day);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        log::debug!("Saved {} task(s) for {day} to {}", tasks.len(), path.display());
        Ok(())
    }

    fn days(&self) -> Result<Vec<DayKey>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(Self::EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(parse_day_keys(keys))
    }
}

/// In-memory task store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryTaskStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value for a key, bypassing encoding.
    pub fn put_raw(&self, key: &str, raw: &str) {
        self.entries.borrow_mut().insert(key.to_string(), raw.to_string());
    }

    /// The raw stored value for a key, if any.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl TaskStore for MemoryTaskStore {
    fn list(&self, day: DayKey) -> Vec<Task> {
        decode_tasks(day, Ok(self.get_raw(&day.to_string())))
    }

    fn save(&self, day: DayKey, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        self.put_raw(&day.to_string(), &json);
        Ok(())
    }

    fn days(&self) -> Result<Vec<DayKey>> {
        Ok(parse_day_keys(self.entries.borrow().keys().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn task(text: &str, completed: bool) -> Task {
        Task { text: text.to_string(), completed }
    }

    /// Behaviour every backend must share.
    fn check_store_contract(store: &dyn TaskStore) {
        let d1 = day("2026-10-19");
        let d2 = day("2026-10-20");

        assert!(store.list(d1).is_empty());
        assert!(store.days().unwrap().is_empty());

        let tasks = vec![task("first", false), task("second", true)];
        store.save(d1, &tasks).unwrap();
        assert_eq!(store.list(d1), tasks);
        assert!(store.list(d2).is_empty());

        // Whole-list replacement
        store.save(d1, &[task("only", false)]).unwrap();
        assert_eq!(store.list(d1), vec![task("only", false)]);

        store.save(d2, &[task("other day", false)]).unwrap();
        assert_eq!(store.days().unwrap(), vec![d1, d2]);

        // An emptied day keeps its entry but reads as empty
        store.save(d1, &[]).unwrap();
        assert!(store.list(d1).is_empty());
        assert_eq!(store.list(d2), vec![task("other day", false)]);
    }

    #[test]
    fn test_memory_store_contract() {
        check_store_contract(&MemoryTaskStore::new());
    }

    #[test]
    fn test_sqlite_store_contract() {
        let dir = TempDir::new().unwrap();
        let store = SqliteTaskStore::new(dir.path().join("daybook.sqlite3")).unwrap();
        check_store_contract(&store);
    }

    #[test]
    fn test_json_dir_store_contract() {
        let dir = TempDir::new().unwrap();
        check_store_contract(&JsonDirTaskStore::new(dir.path().join("days")));
    }

    #[test]
    fn test_stored_value_is_json_array() {
        let store = MemoryTaskStore::new();
        store.save(day("2026-10-19"), &[task("a", false)]).unwrap();
        assert_eq!(
            store.get_raw("2026-10-19").unwrap(),
            r#"[{"text":"a","completed":false}]"#
        );
    }

    #[test]
    fn test_memory_malformed_reads_empty() {
        let store = MemoryTaskStore::new();
        store.put_raw("2026-10-19", "{not json");
        assert!(store.list(day("2026-10-19")).is_empty());

        store.put_raw("2026-10-20", r#"[{"text": 3}]"#);
        assert!(store.list(day("2026-10-20")).is_empty());
    }

    #[test]
    fn test_sqlite_malformed_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = SqliteTaskStore::new(dir.path().join("db.sqlite3")).unwrap();
        store.put_raw("2026-10-19", "null").unwrap();
        assert!(store.list(day("2026-10-19")).is_empty());
    }

    #[test]
    fn test_json_dir_malformed_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirTaskStore::new(dir.path());
        std::fs::write(store.day_path(day("2026-10-19")), "garbage").unwrap();
        assert!(store.list(day("2026-10-19")).is_empty());
    }

    #[test]
    fn test_sqlite_unreadable_database_reads_empty() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("db.sqlite3");
        let store = SqliteTaskStore::new(&db_path).unwrap();
        store.save(day("2026-10-19"), &[task("a", false)]).unwrap();

        // Replace the database with something that is not SQLite
        std::fs::remove_file(&db_path).unwrap();
        let _ = std::fs::remove_file(dir.path().join("db.sqlite3-wal"));
        let _ = std::fs::remove_file(dir.path().join("db.sqlite3-shm"));
        std::fs::write(&db_path, "this is not a valid sqlite database").unwrap();

        assert!(store.list(day("2026-10-19")).is_empty());
    }

    #[test]
    fn test_sqlite_new_fails_on_directory_path() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("is-a-dir");
        std::fs::create_dir_all(&db_path).unwrap();
        assert!(SqliteTaskStore::new(&db_path).is_err());
    }

    #[test]
    fn test_sqlite_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("db.sqlite3");
        SqliteTaskStore::new(&db_path).unwrap().save(day("2026-10-19"), &[task("a", true)]).unwrap();

        let reopened = SqliteTaskStore::new(&db_path).unwrap();
        assert_eq!(reopened.db_path(), db_path);
        assert_eq!(reopened.list(day("2026-10-19")), vec![task("a", true)]);
    }

    #[test]
    fn test_days_skips_non_date_keys() {
        let store = MemoryTaskStore::new();
        store.put_raw("not-a-date", "[]");
        store.put_raw("2026-10-19", "[]");
        assert_eq!(store.days().unwrap(), vec![day("2026-10-19")]);
    }

    #[test]
    fn test_entry_without_completed_flag_is_kept() {
        let store = MemoryTaskStore::new();
        store.put_raw("2026-10-19", r#"[{"text":"a","completed":true},{"text":"b"}]"#);
        assert_eq!(store.list(day("2026-10-19")), vec![task("a", true), task("b", false)]);

        let dir = TempDir::new().unwrap();
        let sqlite = SqliteTaskStore::new(dir.path().join("db.sqlite3")).unwrap();
        sqlite.put_raw("2026-10-19", r#"[{"text":"a","completed":true},{"text":"b"}]"#).unwrap();
        assert_eq!(sqlite.list(day("2026-10-19")), vec![task("a", true), task("b", false)]);
    }

    #[test]
    fn test_days_skips_non_canonical_keys() {
        let store = MemoryTaskStore::new();
        store.put_raw("2026/10/19", r#"[{"text":"a","completed":false}]"#);
        store.put_raw("2026-10-20", r#"[{"text":"b","completed":false}]"#);
        assert_eq!(store.days().unwrap(), vec![day("2026-10-20")]);

        let dir = TempDir::new().unwrap();
        let json_dir = JsonDirTaskStore::new(dir.path());
        std::fs::write(dir.path().join("2026-1-5.json"), "[]").unwrap();
        assert!(json_dir.days().unwrap().is_empty());
    }

    #[test]
    fn test_json_dir_days_ignores_other_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirTaskStore::new(dir.path());
        store.save(day("2026-10-19"), &[task("a", false)]).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        assert_eq!(store.days().unwrap(), vec![day("2026-10-19")]);
        assert!(!dir.path().join("2026-10-19.json.tmp").exists());
    }

    #[test]
    fn test_json_dir_missing_dir_has_no_days() {
        let dir = TempDir::new().unwrap();
        let store = JsonDirTaskStore::new(dir.path().join("missing"));
        assert!(store.days().unwrap().is_empty());
        assert_eq!(store.dir(), dir.path().join("missing"));
    }
}
