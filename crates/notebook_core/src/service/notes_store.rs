//! Connection-owning notes store.
//!
//! # Responsibility
//! - Open the configured database once and reuse the connection.
//! - Expose the note operations consumed by UI/controller code.
//!
//! # Invariants
//! - The schema is initialized before any operation is served.
//! - Returned notes are owned copies; callers never hold storage references.

use crate::db::{self, StoreConfig};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::SqliteNoteRepository;
use crate::service::note_service::{NoteService, StoreResult};
use log::info;
use rusqlite::Connection;

/// Notes store backed by one SQLite connection.
pub struct NotesStore {
    config: StoreConfig,
    conn: Connection,
}

impl NotesStore {
    /// Opens (or creates) the database described by `config`.
    ///
    /// # Errors
    /// - `Storage` when the database cannot be opened, migrated, or was
    ///   created with a different configured version.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let conn = db::open_store_db(&config)?;
        info!(
            "event=store_open module=store status=ok name={} version={}",
            config.name, config.version
        );
        Ok(Self { config, conn })
    }

    /// Opens a private in-memory store with the default identity.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(StoreConfig::in_memory())
    }

    /// Returns the configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates missing schema objects. Safe to call repeatedly.
    pub fn initialize_database(&mut self) -> StoreResult<()> {
        db::initialize_database(&mut self.conn, &self.config)?;
        Ok(())
    }

    /// All notes, most recently updated first.
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        self.service().list_notes()
    }

    pub fn create_note(&self, title: &str, body: &str) -> StoreResult<Note> {
        self.service().create_note(title, body)
    }

    pub fn update_note(&self, id: NoteId, title: &str, body: &str) -> StoreResult<Note> {
        self.service().update_note(id, title, body)
    }

    pub fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        self.service().delete_note(id)
    }

    pub fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        self.service().get_note(id)
    }

    /// Notes whose title or body contains `term`; blank terms list everything.
    pub fn search_notes(&self, term: &str) -> StoreResult<Vec<Note>> {
        self.service().search_notes(term)
    }

    pub fn count_notes(&self) -> StoreResult<u64> {
        self.service().count_notes()
    }

    /// Deletes every note; returns the number removed.
    pub fn clear_notes(&self) -> StoreResult<u64> {
        self.service().clear_notes()
    }

    fn service(&self) -> NoteService<SqliteNoteRepository<'_>> {
        NoteService::new(SqliteNoteRepository::new(&self.conn))
    }
}
