//! Error types for the todo core.
//!
//! # Design
//! "Not found" is not an error anywhere in this crate: stores and the
//! service report it as `None` or `false`. What remains are genuine storage
//! failures, which callers propagate unchanged.

use thiserror::Error;

use crate::types::TodoId;

pub type DbResult<T> = Result<T, DbError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures while opening or migrating the database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

/// Failures reported by a `TodoStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] DbError),

    /// A persisted row could not be decoded into a `Todo`.
    #[error("invalid persisted todo {id}: {message}")]
    InvalidData { id: TodoId, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
