//! Key/value record store.
//!
//! Each key holds one JSON document (an ordered collection). Writes replace
//! the whole value for a key; the last write wins.

use crate::db::log::audit_log;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Employees,
    Performances,
    Salaries,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [StoreKey::Employees, StoreKey::Performances, StoreKey::Salaries];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Employees => "employees",
            StoreKey::Performances => "performances",
            StoreKey::Salaries => "salaries",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait RecordStore {
    /// Raw JSON stored under `key`, if any.
    fn load(&self, key: StoreKey) -> AppResult<Option<String>>;

    /// Replace the value under `key`.
    fn save(&mut self, key: StoreKey, json: &str) -> AppResult<()>;

    /// Append an audit line. Stores without an audit trail ignore it.
    fn audit(&self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }

    /// Read `key`, writing the value produced by `init` first if the key is absent.
    /// An existing value is never overwritten.
    fn get_or_init<T, F>(&mut self, key: StoreKey, init: F) -> AppResult<T>
    where
        Self: Sized,
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> AppResult<T>,
    {
        if let Some(raw) = self.load(key)? {
            return Ok(serde_json::from_str(&raw)?);
        }

        let value = init()?;
        self.set(key, &value)?;
        Ok(value)
    }

    fn set<T>(&mut self, key: StoreKey, value: &T) -> AppResult<()>
    where
        Self: Sized,
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.save(key, &raw)
    }
}

/// Store backed by the `records` table of a SQLite database.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = if path == ":memory:" {
            DbPool::in_memory()?
        } else {
            DbPool::new(path)?
        };
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        run_pending_migrations(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl RecordStore for SqliteStore {
    fn load(&self, key: StoreKey) -> AppResult<Option<String>> {
        let raw = self
            .pool
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }

    fn save(&mut self, key: StoreKey, json: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO records (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key.as_str(), json, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        audit_log(&self.pool.conn, operation, target, message)
    }
}

/// Ephemeral store, gone when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<StoreKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: StoreKey) -> AppResult<Option<String>> {
        Ok(self.values.get(&key).cloned())
    }

    fn save(&mut self, key: StoreKey, json: &str) -> AppResult<()> {
        self.values.insert(key, json.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn exercise_store<S: RecordStore>(store: &mut S) {
        let calls = Cell::new(0);
        let init = || {
            calls.set(calls.get() + 1);
            Ok(vec![1, 2, 3])
        };

        let first: Vec<i32> = store.get_or_init(StoreKey::Salaries, init).unwrap();
        assert_eq!(first, vec![1, 2, 3]);

        store.set(StoreKey::Salaries, &vec![9]).unwrap();

        let second: Vec<i32> = store
            .get_or_init(StoreKey::Salaries, || {
                calls.set(calls.get() + 1);
                Ok(vec![1, 2, 3])
            })
            .unwrap();

        // the seed ran once and did not overwrite the later write
        assert_eq!(second, vec![9]);
        assert_eq!(calls.get(), 1);

        // keys are independent
        assert!(store.load(StoreKey::Employees).unwrap().is_none());
    }

    #[test]
    fn memory_store_initializes_only_when_absent() {
        exercise_store(&mut MemoryStore::new());
    }

    #[test]
    fn sqlite_store_initializes_only_when_absent() {
        let mut store = SqliteStore::open(":memory:").unwrap();
        exercise_store(&mut store);
    }

    #[test]
    fn sqlite_store_last_write_wins() {
        let mut store = SqliteStore::open(":memory:").unwrap();
        store.set(StoreKey::Employees, &["a"]).unwrap();
        store.set(StoreKey::Employees, &["b", "c"]).unwrap();

        let got: Vec<String> = store.get_or_init(StoreKey::Employees, || Ok(vec![])).unwrap();
        assert_eq!(got, vec!["b", "c"]);

        let rows: i64 = store
            .pool()
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn sqlite_store_writes_audit_rows() {
        let store = SqliteStore::open(":memory:").unwrap();
        store.audit("self_submit", "perf#1", "submitted").unwrap();

        let rows = crate::db::log::load_log(store.pool(), Some(1)).unwrap();
        assert_eq!(rows[0].operation, "self_submit");
        assert_eq!(rows[0].target, "perf#1");
    }
}
