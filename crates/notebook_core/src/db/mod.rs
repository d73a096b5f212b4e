//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections from an explicit [`StoreConfig`].
//! - Apply schema migrations in deterministic order.
//! - Record and verify database metadata (name/version/description).
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No note rows are read or written before migrations succeed.
//! - A database created with one configured version is never opened with
//!   another.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod config;
mod metadata;
pub mod migrations;
mod open;

pub use config::{StoreConfig, StoreLocation};
pub use metadata::{read_metadata, DatabaseMetadata};
pub use open::{initialize_database, open_store_db};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    VersionMismatch {
        expected: String,
        found: String,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::VersionMismatch { expected, found } => write!(
                f,
                "database version mismatch: expected `{expected}`, found `{found}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::VersionMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
