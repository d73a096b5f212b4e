//! Store configuration.
//!
//! Replaces fixed module-level database constants with a value passed to the
//! store, so tests can run against isolated databases.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_NAME: &str = "NotesAppDB";
const DEFAULT_VERSION: &str = "1.0";
const DEFAULT_DESCRIPTION: &str = "Notes Application Database";
const DEFAULT_ESTIMATED_SIZE_BYTES: u64 = 100 * 1_000_000;
const DB_FILE_EXTENSION: &str = "sqlite3";

/// Where the SQLite database lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreLocation {
    /// Private in-memory database, dropped with the connection.
    #[default]
    Memory,
    /// Database file `<dir>/<name>.sqlite3`.
    Directory(PathBuf),
}

/// Identity and capacity of a notes database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub name: String,
    /// Schema-compatibility label; a database is only opened with the
    /// version it was created with.
    pub version: String,
    pub description: String,
    /// Upper bound on the database size. `0` disables the limit.
    pub estimated_size_bytes: u64,
    pub location: StoreLocation,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            estimated_size_bytes: DEFAULT_ESTIMATED_SIZE_BYTES,
            location: StoreLocation::Memory,
        }
    }
}

impl StoreConfig {
    /// Default identity backed by an in-memory database.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Default identity backed by a file in `dir`.
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::Directory(dir.into()),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_estimated_size(mut self, bytes: u64) -> Self {
        self.estimated_size_bytes = bytes;
        self
    }

    /// Returns the database file path, or `None` for in-memory stores.
    pub fn database_path(&self) -> Option<PathBuf> {
        match &self.location {
            StoreLocation::Memory => None,
            StoreLocation::Directory(dir) => Some(database_file(dir, &self.name)),
        }
    }
}

fn database_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{DB_FILE_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, StoreLocation};
    use std::path::PathBuf;

    #[test]
    fn defaults_match_notes_app_identity() {
        let config = StoreConfig::default();
        assert_eq!(config.name, "NotesAppDB");
        assert_eq!(config.version, "1.0");
        assert_eq!(config.estimated_size_bytes, 100_000_000);
        assert_eq!(config.location, StoreLocation::Memory);
        assert_eq!(config.database_path(), None);
    }

    #[test]
    fn directory_store_uses_name_as_file_stem() {
        let config = StoreConfig::in_directory("/tmp/notes");
        assert_eq!(
            config.database_path(),
            Some(PathBuf::from("/tmp/notes/NotesAppDB.sqlite3"))
        );
    }

    #[test]
    fn json_config_fills_missing_fields_with_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"location":{"directory":"/x"}}"#).unwrap();
        assert_eq!(config.name, "NotesAppDB");
        assert_eq!(config.version, "1.0");
        assert_eq!(config.description, "Notes Application Database");
        assert_eq!(config.estimated_size_bytes, 100_000_000);
        assert_eq!(config.location, StoreLocation::Directory(PathBuf::from("/x")));
    }

    #[test]
    fn json_memory_location_is_unit_variant() {
        let config: StoreConfig = serde_json::from_str(r#"{"location":"memory"}"#).unwrap();
        assert_eq!(config.location, StoreLocation::Memory);

        let empty: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, StoreConfig::default());
    }
}
