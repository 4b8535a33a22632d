//! Key-value persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the single-slot storage seam the note store writes through.
//! - Keep SQL details inside the SQLite implementation.
//!
//! # Invariants
//! - `set` overwrites the full value for a key.
//! - `get` on a missing key is `Ok(None)`, never an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Storage-layer error for key-value reads and writes.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backing connection is missing the expected schema.
    MissingRequiredTable(&'static str),
    /// Backend refused the write (quota, read-only medium, injected failure).
    WriteRejected(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
            Self::WriteRejected(message) => write!(f, "storage write rejected: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::WriteRejected(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-to-string persistent slot storage.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
    /// Removes `key`; removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> KvResult<()>;
}
