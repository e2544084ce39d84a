//! Key/value blob repository contracts and implementations.
//!
//! # Responsibility
//! - Provide opaque get/set-by-key persistence for whole-object JSON blobs.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set` replaces the full value for a key (last write wins).
//! - A missing key reads as `Ok(None)`, never as an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Blob key holding the serialized task list.
pub const TASKS_KEY: &str = "tasks";
/// Blob key holding the serialized user profile.
pub const USER_DATA_KEY: &str = "userData";

pub type BlobResult<T> = Result<T, BlobError>;

#[derive(Debug)]
pub enum BlobError {
    Db(DbError),
    /// Backend refused the operation (poisoned lock, injected fault).
    Unavailable(String),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "blob store unavailable: {message}"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for BlobError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque blob persistence used by the task and profile stores.
pub trait BlobRepository: Send + Sync {
    fn get(&self, key: &str) -> BlobResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> BlobResult<()>;
}

impl<R: BlobRepository + ?Sized> BlobRepository for Arc<R> {
    fn get(&self, key: &str) -> BlobResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> BlobResult<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed blob repository over the `blobs` table.
pub struct SqliteBlobRepository {
    conn: Mutex<Connection>,
}

impl SqliteBlobRepository {
    /// Wraps a connection returned by `db::open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> BlobResult<T>) -> BlobResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| BlobError::Unavailable("connection lock poisoned".to_string()))?;
        f(&conn)
    }
}

impl BlobRepository for SqliteBlobRepository {
    fn get(&self, key: &str) -> BlobResult<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                    row.get::<_, String>(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> BlobResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO blobs (key, value, updated_at)
                 VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key, value],
            )?;
            Ok(())
        })
    }
}

/// In-process blob repository with optional fault injection.
#[derive(Debug, Default)]
pub struct MemoryBlobRepository {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryBlobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobRepository for MemoryBlobRepository {
    fn get(&self, key: &str) -> BlobResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BlobError::Unavailable(format!("read of `{key}` rejected")));
        }
        let entries = self
            .entries
            .lock()
            .map_err(|_| BlobError::Unavailable("entries lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BlobResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BlobError::Unavailable(format!("write of `{key}` rejected")));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BlobError::Unavailable("entries lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BlobRepository, MemoryBlobRepository};

    #[test]
    fn memory_repo_overwrites_and_injects_faults() {
        let repo = MemoryBlobRepository::new();
        assert_eq!(repo.get("tasks").unwrap(), None);

        repo.set("tasks", "[]").unwrap();
        repo.set("tasks", "[1]").unwrap();
        assert_eq!(repo.get("tasks").unwrap().as_deref(), Some("[1]"));
        assert_eq!(repo.len(), 1);

        repo.set_fail_writes(true);
        assert!(repo.set("tasks", "[2]").is_err());
        assert_eq!(repo.get("tasks").unwrap().as_deref(), Some("[1]"));

        repo.set_fail_reads(true);
        assert!(repo.get("tasks").is_err());
    }
}
