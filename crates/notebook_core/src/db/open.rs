//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections described by [`StoreConfig`].
//! - Configure connection pragmas required by core behavior.
//! - Run migrations, metadata checks and the capacity limit before returning.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::metadata::reconcile_metadata;
use super::migrations::apply_migrations;
use super::{DbResult, StoreConfig, StoreLocation};
use log::{debug, error, info};
use rusqlite::Connection;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the database described by `config` and prepares it for use.
///
/// # Side effects
/// - Creates the store directory for file-backed configs.
/// - Emits `db_open` logging events with duration and status.
pub fn open_store_db(config: &StoreConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = location_mode(&config.location);
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect(config) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    match bootstrap_connection(&mut conn, config) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Creates missing schema objects and verifies database metadata.
///
/// Idempotent: safe to call on every startup.
pub fn initialize_database(conn: &mut Connection, config: &StoreConfig) -> DbResult<()> {
    apply_migrations(conn)?;
    reconcile_metadata(conn, config)?;
    Ok(())
}

fn connect(config: &StoreConfig) -> DbResult<Connection> {
    match (&config.location, config.database_path()) {
        (StoreLocation::Directory(dir), Some(path)) => {
            std::fs::create_dir_all(dir)?;
            Ok(Connection::open(path)?)
        }
        _ => Ok(Connection::open_in_memory()?),
    }
}

fn bootstrap_connection(conn: &mut Connection, config: &StoreConfig) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    initialize_database(conn, config)?;
    apply_capacity_limit(conn, config.estimated_size_bytes)?;
    Ok(())
}

// Why: SQLite clamps max_page_count to the current page count, so the limit
// is applied only after migrations have created the schema.
fn apply_capacity_limit(conn: &Connection, estimated_size_bytes: u64) -> DbResult<()> {
    if estimated_size_bytes == 0 {
        return Ok(());
    }

    let page_size: i64 = conn.pragma_query_value(None, "page_size", |row| row.get(0))?;
    let page_size = u64::try_from(page_size).unwrap_or(1).max(1);
    let max_pages = i64::try_from(estimated_size_bytes / page_size).unwrap_or(i64::MAX);
    let applied: i64 =
        conn.pragma_update_and_check(None, "max_page_count", max_pages, |row| row.get(0))?;
    debug!("event=db_capacity module=db status=ok page_size={page_size} max_page_count={applied}");
    Ok(())
}

fn location_mode(location: &StoreLocation) -> &'static str {
    match location {
        StoreLocation::Memory => "memory",
        StoreLocation::Directory(_) => "file",
    }
}
