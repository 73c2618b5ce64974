//! Named-slot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and write opaque JSON payloads under stable slot keys.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write_slot` is a single upsert statement, so readers observe either the
//!   previous payload or the new one.
//! - `read_slot` returns `None` for keys that were never written.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SlotResult<T> = Result<T, SlotError>;

/// Persistence failure surfaced by slot repositories.
#[derive(Debug)]
pub enum SlotError {
    Db(DbError),
    /// Failure from a non-SQLite backend, carried as its message.
    Backend(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "slot backend failure: {message}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value persistence contract used by the record store.
pub trait SlotRepository {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>>;
    fn write_slot(&self, key: &str, payload: &str) -> SlotResult<()>;
    fn remove_slot(&self, key: &str) -> SlotResult<bool>;
}

impl<T: SlotRepository + ?Sized> SlotRepository for &T {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, payload: &str) -> SlotResult<()> {
        (**self).write_slot(key, payload)
    }

    fn remove_slot(&self, key: &str) -> SlotResult<bool> {
        (**self).remove_slot(key)
    }
}

/// SQLite-backed slot repository over the `slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM slots WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_slot(&self, key: &str, payload: &str) -> SlotResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> SlotResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM slots WHERE key = ?1;", params![key])?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{SlotRepository, SqliteSlotRepository};
    use crate::db::open_db_in_memory;

    #[test]
    fn missing_slot_reads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSlotRepository::new(&conn);
        assert_eq!(repo.read_slot("timeAxisRecords").unwrap(), None);
    }

    #[test]
    fn write_replaces_previous_payload() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSlotRepository::new(&conn);

        repo.write_slot("k", "[1]").unwrap();
        repo.write_slot("k", "[1,2]").unwrap();

        assert_eq!(repo.read_slot("k").unwrap().as_deref(), Some("[1,2]"));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM slots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn remove_reports_whether_slot_existed() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSlotRepository::new(&conn);
        repo.write_slot("k", "{}").unwrap();

        assert!(repo.remove_slot("k").unwrap());
        assert!(!repo.remove_slot("k").unwrap());
        assert_eq!(repo.read_slot("k").unwrap(), None);
    }
}
