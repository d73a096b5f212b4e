//! Database identity stored in the `database_info` table.

use super::{DbError, DbResult, StoreConfig};
use rusqlite::{params, Connection, OptionalExtension};

const KEY_NAME: &str = "name";
const KEY_VERSION: &str = "version";
const KEY_DESCRIPTION: &str = "description";

/// Identity recorded the first time a database is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Reads stored metadata, or `None` when the database was never stamped.
pub fn read_metadata(conn: &Connection) -> DbResult<Option<DatabaseMetadata>> {
    let Some(version) = read_value(conn, KEY_VERSION)? else {
        return Ok(None);
    };

    Ok(Some(DatabaseMetadata {
        name: read_value(conn, KEY_NAME)?.unwrap_or_default(),
        version,
        description: read_value(conn, KEY_DESCRIPTION)?.unwrap_or_default(),
    }))
}

/// Stamps a fresh database or verifies the stored version.
///
/// The description is refreshed on every open; the version is immutable.
pub(crate) fn reconcile_metadata(conn: &Connection, config: &StoreConfig) -> DbResult<()> {
    if let Some(found) = read_value(conn, KEY_VERSION)? {
        if found != config.version {
            return Err(DbError::VersionMismatch {
                expected: config.version.clone(),
                found,
            });
        }
    } else {
        write_value(conn, KEY_VERSION, &config.version)?;
    }

    write_value(conn, KEY_NAME, &config.name)?;
    write_value(conn, KEY_DESCRIPTION, &config.description)?;
    Ok(())
}

fn read_value(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM database_info WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

fn write_value(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        "INSERT INTO database_info (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        params![key, value],
    )?;
    Ok(())
}
