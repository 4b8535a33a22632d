//! SQLite-backed key-value slot storage.
//!
//! # Invariants
//! - Operates only on connections returned by `db::open_db*`.
//! - One row per key; `set` is an upsert that refreshes `updated_at`.

use super::{KeyValueStore, KvError, KvResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over the `kv_store` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the connection was not migrated.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        if !table_exists(conn, "kv_store")? {
            return Err(KvError::MissingRequiredTable("kv_store"));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> KvResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::SqliteKeyValueStore;
    use crate::db::open_db_in_memory;
    use crate::storage::{KeyValueStore, KvError};
    use rusqlite::Connection;

    #[test]
    fn rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKeyValueStore::try_new(&conn)
            .err()
            .expect("raw connection has no kv_store table");
        assert!(matches!(err, KvError::MissingRequiredTable("kv_store")));
    }

    #[test]
    fn upsert_keeps_single_row_per_key() {
        let conn = open_db_in_memory().unwrap();
        let mut store = SqliteKeyValueStore::try_new(&conn).unwrap();
        assert_eq!(store.get("notes").unwrap(), None);

        store.set("notes", "[]").unwrap();
        store.set("notes", "[\"x\"]").unwrap();
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[\"x\"]"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);

        store.remove("notes").unwrap();
        assert_eq!(store.get("notes").unwrap(), None);
    }
}
