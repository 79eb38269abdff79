//! `SQLite` cache backend.
//!
//! Keeps every cache entry in a single `cache_entries` table. Useful when
//! several processes share a data directory: `SQLite` serializes writers, so
//! a save is never torn, though the last writer still wins.

use super::traits::CacheBackend;
use crate::{Error, Result, current_timestamp};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS cache_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)";

/// Cache backend storing entries in a `SQLite` database.
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Opens (or creates) a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be opened, or the schema cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_cache_dir".to_string(),
                cause: e.to_string(),
            })?;
        }
        let conn = Connection::open(path).map_err(|e| sqlite_error("open_cache_db", &e))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        configure_connection(&conn);
        conn.execute(SCHEMA, [])
            .map_err(|e| sqlite_error("create_cache_schema", &e))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        acquire_lock(&self.conn)
    }
}

/// Acquires a mutex, recovering the inner value if a previous holder
/// panicked.
fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite cache mutex was poisoned, recovering");
            metrics::counter!("fieldstore_sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        },
    }
}

/// Applies WAL journaling and a busy timeout.
///
/// Pragma results are ignored: `journal_mode` returns a row, and a database
/// on a filesystem without shared memory refuses WAL.
fn configure_connection(conn: &Connection) {
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", "5000");
}

fn sqlite_error(operation: &str, e: &rusqlite::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}

impl CacheBackend for SqliteCache {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.conn()
            .query_row(
                "SELECT value FROM cache_entries WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| sqlite_error("load_cache_entry", &e))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = i64::try_from(current_timestamp()).unwrap_or(i64::MAX);
        self.conn()
            .execute(
                "INSERT INTO cache_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .map_err(|e| sqlite_error("save_cache_entry", &e))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT key FROM cache_entries ORDER BY key")
            .map_err(|e| sqlite_error("list_cache_keys", &e))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| sqlite_error("list_cache_keys", &e))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| sqlite_error("list_cache_keys", &e))
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
